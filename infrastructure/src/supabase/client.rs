//! Thin PostgREST client for a Supabase project.
//!
//! Requests go to `<url>/rest/v1/<table>` with the service-role key in both
//! the `apikey` and bearer `Authorization` headers.

use forum_application::ports::forum_store::StoreError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `Prefer` header values used by the store
pub mod prefer {
    pub const MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=minimal";
    pub const IGNORE_DUPLICATES: &str = "resolution=ignore-duplicates,return=minimal";
    pub const REPRESENTATION: &str = "return=representation";
}

pub struct SupabaseClient {
    http: reqwest::Client,
    rest_url: String,
}

impl SupabaseClient {
    pub fn new(url: &str, service_role_key: &str) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(service_role_key)
            .map_err(|_| StoreError::RequestFailed("service role key is not a valid header".to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", service_role_key))
            .map_err(|_| StoreError::RequestFailed("service role key is not a valid header".to_string()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", url.trim_end_matches('/')),
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http.request(method, format!("{}/{}", self.rest_url, table))
    }

    /// `GET /<table>?<query>` decoded as a JSON array.
    pub async fn select<T: DeserializeOwned>(
        &self,
        operation: &str,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self.send(operation, self.request(Method::GET, table).query(query)).await?;
        decode(operation, response).await
    }

    /// `POST /<table>` with a JSON body and a `Prefer` header.
    pub async fn insert<B: Serialize + ?Sized>(
        &self,
        operation: &str,
        table: &str,
        query: &[(&str, String)],
        body: &B,
        prefer: &str,
    ) -> Result<Response, StoreError> {
        let builder = self
            .request(Method::POST, table)
            .query(query)
            .header("Prefer", prefer)
            .json(body);
        self.send(operation, builder).await
    }

    /// `PATCH /<table>?<filter>` with a JSON body, returning the updated
    /// rows.
    pub async fn update<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        operation: &str,
        table: &str,
        filter: &[(&str, String)],
        body: &B,
    ) -> Result<Vec<T>, StoreError> {
        let builder = self
            .request(Method::PATCH, table)
            .query(filter)
            .header("Prefer", prefer::REPRESENTATION)
            .json(body);
        let response = self.send(operation, builder).await?;
        decode(operation, response).await
    }

    async fn send(&self, operation: &str, builder: RequestBuilder) -> Result<Response, StoreError> {
        let response = builder
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(format!("{}: {}", operation, e)))?;

        let status = response.status();
        debug!("{} -> {}", operation, status);
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            operation: operation.to_string(),
            status: status.as_u16(),
            message: message.trim().to_string(),
        })
    }
}

/// Decode a JSON array response body.
pub async fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> Result<Vec<T>, StoreError> {
    let body = response
        .text()
        .await
        .map_err(|e| StoreError::RequestFailed(format!("{}: {}", operation, e)))?;
    serde_json::from_str(&body).map_err(|e| StoreError::Decode(format!("{}: {}", operation, e)))
}
