//! Tune CLI - fetch remote scripts with on-demand authentication.
//!
//! This CLI provides a `tune` command that downloads single-file scripts from
//! gists, prompting for credentials when the remote end requires them.

mod commands;
mod config;
mod session;

use clap::{Parser, Subcommand};
use tracing_subscriber::FmtSubscriber;

use commands::{AuthCommand, auth, fetch};

/// Tune CLI - fetch remote scripts
#[derive(Parser, Debug)]
#[command(
    name = "tune",
    author,
    version,
    about = "Fetch remote scripts with on-demand authentication"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a resource and print its content
    ///
    /// Prompts for credentials when the resource requires authentication and
    /// stores the resulting token for later runs.
    Fetch {
        /// Resource URI (e.g. https://gist.github.com/<owner>/<id>)
        uri: String,

        /// Output content and metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Authentication management
    ///
    /// Log in, log out, and show stored tokens.
    #[command(subcommand)]
    Auth(AuthCommand),
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let cli_config = config::load_config();

    // Initialize tracing
    let level = config::log_level(args.log_level.as_deref(), &cli_config);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Fetch { uri, json } => fetch::execute(&cli_config, &uri, json),
        Command::Auth(command) => auth::execute(&cli_config, command),
    }
}
