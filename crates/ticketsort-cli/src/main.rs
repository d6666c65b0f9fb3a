mod display;
mod lambda;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use ticketsort_ai::{CategoryResolver, ChatModel, OpenAiClient};
use ticketsort_core::{Category, CategorySet, ModelSettings};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ticketsort", version, about = "Support-ticket category recommendation")]
struct Cli {
    #[command(flatten)]
    model: ModelArgs,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "TICKETSORT_LOG_JSON")]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

/// Overrides for the model settings read from the environment.
#[derive(Args)]
struct ModelArgs {
    /// Chat model identifier (default: $TICKETSORT_MODEL or gpt-4o-mini).
    #[arg(long, global = true)]
    model: Option<String>,

    /// OpenAI-compatible API root (default: $OPENAI_BASE_URL or https://api.openai.com/v1).
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve invocations from the AWS Lambda runtime API.
    Serve,
    /// Handle one event from a JSON file (or `-` for stdin) and print the response.
    Invoke {
        #[arg(default_value = "-")]
        event: PathBuf,
    },
    /// Classify a single description against the given options.
    Classify {
        /// Ticket description.
        #[arg(long, short)]
        description: String,
        /// Category as `id=label`; repeat in display order.
        #[arg(long = "option", short = 'o', required = true, value_parser = parse_option)]
        options: Vec<Category>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);
    tracing::info!("ticketsort v{}", env!("CARGO_PKG_VERSION"));

    // A missing credential aborts here, before any request is served.
    let settings = cli.model.apply(ModelSettings::from_env().context("loading model settings")?);

    match cli.command {
        Command::Serve => lambda::serve(&settings).await,
        Command::Invoke { event } => {
            let event = read_event(&event)?;
            let dispatcher = ticketsort_service::bootstrap_with(&settings);
            let response = dispatcher.handle_event(event).await;
            display::print_response(&response)
        }
        Command::Classify {
            description,
            options,
        } => {
            let categories = CategorySet::new(options)?;
            let model: Arc<dyn ChatModel> = Arc::new(OpenAiClient::new(&settings));
            let resolver = CategoryResolver::new(model);
            let resolution = resolver
                .resolve_detailed(&description, &categories)
                .await
                .context("classifying ticket")?;
            display::print_resolution(&resolution);
            Ok(())
        }
    }
}

impl ModelArgs {
    fn apply(&self, mut settings: ModelSettings) -> ModelSettings {
        if let Some(model) = &self.model {
            settings = settings.with_model(model.clone());
        }
        if let Some(base_url) = &self.base_url {
            settings = settings.with_base_url(base_url);
        }
        settings
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_event(path: &Path) -> anyhow::Result<Value> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading event from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading event file {}", path.display()))?
    };
    serde_json::from_str(&raw).context("parsing event JSON")
}

/// Parse `id=label`. Numeric ids become JSON numbers, anything else a string.
fn parse_option(s: &str) -> anyhow::Result<Category> {
    let Some((id, label)) = s.split_once('=') else {
        bail!("expected `id=label`, got `{s}`");
    };
    let label = label.trim();
    if label.is_empty() {
        bail!("empty label in `{s}`");
    }
    let id = id.trim();
    let id = match id.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(id),
    };
    Ok(Category::new(id, label))
}
