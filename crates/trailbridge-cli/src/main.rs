use clap::{Parser, Subcommand};
use trailbridge_client::HttpControlPlane;
use trailbridge_core::ToolConfig;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "trailbridge", version, about = "Audit-trail event-bus diagnostics")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enable event-bus delivery for a trail and report before/after state.
    EnableEventBus {
        /// Trail name. Defaults to the configured trail.
        #[arg(env = "TRAILBRIDGE_TRAIL")]
        trail: Option<String>,
    },

    /// Show a trail's current configuration.
    Status {
        /// Trail name. Defaults to the configured trail.
        #[arg(env = "TRAILBRIDGE_TRAIL")]
        trail: Option<String>,

        /// Print the raw configuration as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

// This tool is a diagnostic: whatever goes wrong is reported on stdout and
// the process still exits 0. Callers cannot rely on the exit status to
// detect a failed toggle.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();

    let config = match ToolConfig::load_from_cwd() {
        Ok(config) => config,
        Err(error) => {
            println!("Error: {error}");
            return Ok(());
        }
    };
    tracing::debug!(trail = %config.trail, region = %config.region, "loaded configuration");

    match cli.cmd {
        Command::EnableEventBus { trail } => {
            let trail = trail.unwrap_or_else(|| config.trail.clone());
            match HttpControlPlane::from_config(&config) {
                Ok(client) => commands::enable::run(&client, &trail).await,
                Err(error) => {
                    println!("Error: {error}");
                    println!();
                    println!("{}", commands::enable::REMEDIATION_HINT);
                }
            }
        }

        Command::Status { trail, json } => {
            let trail = trail.unwrap_or_else(|| config.trail.clone());
            match HttpControlPlane::from_config(&config) {
                Ok(client) => commands::status::run(&client, &trail, json).await,
                Err(error) => println!("Error: {error}"),
            }
        }
    }

    Ok(())
}
