//! Supabase forum store adapter
//!
//! [`SupabaseForumStore`] implements the `ForumStore` port over the
//! project's PostgREST API using `reqwest`.

pub mod client;
pub mod store;

pub use store::SupabaseForumStore;
