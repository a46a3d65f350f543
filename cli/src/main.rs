//! mvtgen binary: serve the HTTP API (default) or run one generate / validate / explain call.

mod log_format;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use cli::{execute, Action};
use mvtgen::{BedrockConfig, BedrockGateway, ConfigurationService};
use serve::ServeConfig;

#[derive(Parser, Debug)]
#[command(name = "mvtgen")]
#[command(about = "mvtgen: natural-language multivariate test configuration generator")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run the HTTP server (default; HOST/PORT/STATIC_DIR from env)
    Serve(ServeArgs),
    /// Generate a configuration from a description, or update an existing one
    Generate(GenerateArgs),
    /// Check whether a file (or stdin) is well-formed JSON
    Validate(InputArgs),
    /// Explain a configuration in plain language
    Explain(InputArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
struct ServeArgs {
    /// Listen address, e.g. 0.0.0.0:8000 (overrides HOST and PORT)
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,
    /// Directory holding index.html and its assets
    #[arg(long, value_name = "DIR")]
    static_dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
struct GenerateArgs {
    /// What the test should look like, or the change to apply with --existing
    #[arg(required = true, num_args = 1..)]
    description: Vec<String>,
    /// Existing configuration JSON to update
    #[arg(short, long, value_name = "FILE")]
    existing: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
struct InputArgs {
    /// JSON file; `-` or omitted reads stdin
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

fn serve_config(sa: &ServeArgs) -> ServeConfig {
    let mut cfg = ServeConfig::from_env();
    if let Some(addr) = &sa.addr {
        match addr.rsplit_once(':').map(|(h, p)| (h, p.parse::<u16>())) {
            Some((host, Ok(port))) => {
                cfg.host = host.to_string();
                cfg.port = port;
            }
            _ => tracing::warn!(addr = %addr, "ignoring --addr, expected HOST:PORT"),
        }
    }
    if let Some(dir) = &sa.static_dir {
        cfg.static_dir = dir.clone();
    }
    cfg
}

async fn build_service() -> ConfigurationService {
    let bedrock = BedrockConfig::from_env();
    tracing::info!(region = %bedrock.region, model = %bedrock.model_id, "using Bedrock");
    let gateway = BedrockGateway::new(bedrock).await;
    if !gateway.has_credentials().await {
        tracing::warn!("no AWS credentials found; Bedrock calls will fail");
        eprintln!(
            "mvtgen: no AWS credentials found (env, profile, SSO or instance role); generate and explain will fail"
        );
    }
    ConfigurationService::new(Arc::new(gateway))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::load_and_apply("mvtgen", None::<&std::path::Path>).ok();
    logging::init()?;

    let args = Args::parse();
    let service = build_service().await;

    let action = match args.cmd.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(sa) => {
            let cfg = serve_config(&sa);
            if let Err(e) = serve::run_serve(&cfg, service).await {
                eprintln!("serve error: {}", e);
                std::process::exit(1);
            }
            return Ok(());
        }
        Command::Generate(ga) => Action::Generate {
            description: ga.description.join(" "),
            existing: ga.existing,
        },
        Command::Validate(ia) => Action::Validate { input: ia.input },
        Command::Explain(ia) => Action::Explain { input: ia.input },
    };

    let mut stdout = std::io::stdout().lock();
    match execute(&action, &service, &mut stdout).await {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("mvtgen: {}", e);
            std::process::exit(1);
        }
    }
}
