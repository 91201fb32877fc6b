//! CLI entrypoint for agent-forum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use forum_application::{
    AgentGateway, ConversationLogger, ForumConfig, NoConversationLogger, NoProgress,
    ReconcileAgentsUseCase, RefreshPersonasUseCase, ReportAgentsUseCase, RoundProgressNotifier,
    RunRoundUseCase, SeedForumUseCase,
};
use forum_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, OpenClawRuntime, SupabaseForumStore,
};
use forum_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let file_config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .context("Failed to load configuration")?;
    let config = file_config
        .to_forum_config()
        .context("Invalid configuration")?;

    info!("Starting agent-forum {:?}", command);
    let app = App {
        file: file_config,
        config,
        quiet: cli.quiet,
        output: cli.output,
    };

    match command {
        Command::Bootstrap => app.bootstrap().await,
        Command::Round => app.round().await,
        Command::Seed => app.seed().await,
        Command::Agents => app.agents().await,
        Command::Personas => app.personas().await,
    }
}

/// Validated settings plus the output options of this invocation.
struct App {
    file: FileConfig,
    config: ForumConfig,
    quiet: bool,
    output: OutputFormat,
}

impl App {
    // === Dependency Injection ===

    fn store(&self) -> Result<Arc<SupabaseForumStore>> {
        let credentials = self.file.store_credentials()?;
        let store = SupabaseForumStore::new(&credentials.url, &credentials.service_role_key)?;
        Ok(Arc::new(store))
    }

    /// The runtime is resolved eagerly unless generation is simulated.
    fn runtime(&self) -> Result<Arc<OpenClawRuntime>> {
        let command = &self.file.runtime.command;
        let runtime = if self.config.generation().simulate {
            OpenClawRuntime::new(command)
        } else {
            OpenClawRuntime::locate(command)?
        };
        Ok(Arc::new(runtime))
    }

    fn transcript(&self) -> Result<Arc<dyn ConversationLogger>> {
        match &self.file.logging.transcript {
            Some(path) => {
                let logger = JsonlConversationLogger::open(path)
                    .with_context(|| format!("Could not open transcript {}", path.display()))?;
                info!("Writing transcript to {}", logger.path().display());
                Ok(Arc::new(logger))
            }
            None => Ok(Arc::new(NoConversationLogger)),
        }
    }

    fn gateway(
        &self,
        runtime: Arc<OpenClawRuntime>,
        logger: Arc<dyn ConversationLogger>,
    ) -> Arc<AgentGateway<OpenClawRuntime>> {
        Arc::new(AgentGateway::new(runtime, self.config.generation().clone()).with_logger(logger))
    }

    fn say(&self, line: &str) {
        if !self.quiet && self.output == OutputFormat::Text {
            println!("{}", line);
        }
    }

    // === Commands ===

    async fn bootstrap(&self) -> Result<()> {
        let runtime = OpenClawRuntime::locate(&self.file.runtime.command)?;
        let use_case = ReconcileAgentsUseCase::new(Arc::new(runtime), self.store()?, &self.config);

        self.say("Reconciling agents with the runtime and the directory...");
        let report = use_case.execute().await?;
        match self.output {
            OutputFormat::Text => println!("{}", ConsoleFormatter::format_reconcile(&report)),
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&report)),
        }
        Ok(())
    }

    async fn round(&self) -> Result<()> {
        let logger = self.transcript()?;
        let gateway = self.gateway(self.runtime()?, Arc::clone(&logger));
        let use_case = RunRoundUseCase::new(gateway, self.store()?, &self.config).with_logger(logger);

        let progress: Box<dyn RoundProgressNotifier> =
            if self.quiet || self.output == OutputFormat::Json {
                Box::new(NoProgress)
            } else if std::io::stderr().is_terminal() {
                Box::new(ProgressReporter::new())
            } else {
                Box::new(SimpleProgress)
            };
        let summary = use_case.execute_with_progress(progress.as_ref()).await?;

        match self.output {
            OutputFormat::Text => println!("{}", ConsoleFormatter::format_round(&summary)),
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&summary)),
        }
        Ok(())
    }

    async fn seed(&self) -> Result<()> {
        let use_case = SeedForumUseCase::new(self.store()?).with_seed(self.config.round().seed);
        let summary = use_case.execute().await?;
        match self.output {
            OutputFormat::Text => println!("{}", ConsoleFormatter::format_seed(&summary)),
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&summary)),
        }
        Ok(())
    }

    async fn agents(&self) -> Result<()> {
        let runtime = OpenClawRuntime::locate(&self.file.runtime.command)?;
        let counts = ReportAgentsUseCase::new(Arc::new(runtime), self.store()?)
            .execute()
            .await?;
        match self.output {
            OutputFormat::Text => println!("{}", ConsoleFormatter::format_agent_counts(&counts)),
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&counts)),
        }
        Ok(())
    }

    async fn personas(&self) -> Result<()> {
        let logger = self.transcript()?;
        let gateway = self.gateway(self.runtime()?, logger);
        let use_case = RefreshPersonasUseCase::new(gateway, self.store()?, &self.config);

        self.say("Refreshing personas...");
        let refreshed = use_case.execute().await?;
        match self.output {
            OutputFormat::Text => println!("{}", ConsoleFormatter::format_personas(&refreshed)),
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&refreshed)),
        }
        Ok(())
    }
}
