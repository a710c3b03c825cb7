use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use insight_core::{AnalysisMode, AnalyzeRequest};
use server::config::ServiceConfig;
use server::{create_router, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Parser)]
#[command(name = "insight2spec")]
#[command(about = "Turn raw product feedback into themes, opportunities and a PRD outline", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        /// Overrides INSIGHT2SPEC_ANALYZE_MODE
        #[arg(long)]
        mode: Option<AnalysisMode>,

        /// Overrides INSIGHT2SPEC_THEMES_FILE
        #[arg(long)]
        themes: Option<PathBuf>,
    },
    /// Analyze feedback lines from FILE, or stdin when omitted
    Analyze {
        file: Option<PathBuf>,

        #[arg(short, long)]
        context: Option<String>,

        #[arg(long)]
        mode: Option<AnalysisMode>,

        #[arg(long)]
        pretty: bool,
    },
    /// Print the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    match cli.command {
        Some(Commands::Serve {
            port,
            host,
            mode,
            themes,
        }) => serve(&host, port, mode, themes).await,
        Some(Commands::Analyze {
            file,
            context,
            mode,
            pretty,
        }) => analyze(file, context, mode, pretty).await,
        Some(Commands::Config) => show_config(),
        None => serve(DEFAULT_HOST, cli.port, None, None).await,
    }
}

fn load_config(mode: Option<AnalysisMode>, themes: Option<PathBuf>) -> Result<ServiceConfig> {
    let mut config = ServiceConfig::from_env().context("Invalid environment configuration")?;
    if let Some(mode) = mode {
        config.mode = mode;
    }
    if themes.is_some() {
        config.themes_file = themes;
    }
    Ok(config)
}

async fn serve(
    host: &str,
    port: u16,
    mode: Option<AnalysisMode>,
    themes: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(mode, themes)?;
    let state = AppState::new(&config).context("Failed to initialize analyzer")?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;

    println!();
    println!("Insight2Spec");
    println!("════════════════════════════════════════");
    println!();
    println!("  API Server:  http://localhost:{}", port);
    println!("  Swagger UI:  http://localhost:{}/swagger-ui", port);
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app).await?;

    Ok(())
}

async fn analyze(
    file: Option<PathBuf>,
    context: Option<String>,
    mode: Option<AnalysisMode>,
    pretty: bool,
) -> Result<()> {
    let input = match &file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read feedback from stdin")?;
            buf
        }
    };

    let mut request = AnalyzeRequest::new(feedback_lines(&input));
    if let Some(context) = context {
        request = request.with_context(context);
    }
    request.validate()?;

    let config = load_config(mode, None)?;
    let dispatcher = config.build_dispatcher()?;

    let result = dispatcher
        .analyze(&request)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", e.code(), e))?;

    let output = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", output);

    Ok(())
}

fn show_config() -> Result<()> {
    let config = load_config(None, None)?;

    println!();
    println!("Mode:        {}", config.mode);
    println!("Model:       {}", config.model);
    println!("Base URL:    {}", config.base_url);
    println!("Timeout:     {}s", config.timeout.as_secs_f64());
    println!("API key:     {}", config.masked_api_key());
    match &config.themes_file {
        Some(path) => println!("Themes:      {}", path.display()),
        None => println!("Themes:      built-in"),
    }
    println!();

    Ok(())
}

/// One feedback item per non-blank line
fn feedback_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "insight2spec=info,server=info,analyzer=info,openrouter=info,tower_http=info".into()
            }),
        )
        .init();
}
