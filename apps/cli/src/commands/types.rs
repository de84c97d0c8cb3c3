//! Command type definitions.

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Authenticate for a resource kind
    Login {
        /// Resource kind (e.g. gist)
        kind: String,
    },

    /// Remove stored tokens
    Logout {
        /// Remove every stored token
        #[arg(long)]
        all: bool,

        /// Resource kind to log out from
        kind: Option<String>,
    },

    /// Show authentication status
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
