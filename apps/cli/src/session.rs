//! Loader construction shared by commands.

use std::io::{self, Stderr};

use anyhow::{Context, Result};
use tune_core::auth::{
    AuthResult, Prompter, ProviderAuthFile, ResourceAuthenticationHelper, ScriptedPrompter,
    TerminalPrompter, TokenStorage,
};
use tune_core::{ResourceLoader, TuneConfig};

/// Environment variable holding a non-interactive username.
pub const USERNAME_ENV: &str = "TUNE_USERNAME";

/// Environment variable holding a non-interactive password.
pub const PASSWORD_ENV: &str = "TUNE_PASSWORD";

/// Answers credential questions from the terminal or from the environment.
#[derive(Debug)]
pub enum CliPrompter {
    Terminal(TerminalPrompter),
    Scripted(ScriptedPrompter),
}

impl CliPrompter {
    /// Uses `TUNE_USERNAME`/`TUNE_PASSWORD` when both are set.
    ///
    /// Scripted answers cover a single round; a rejected round ends the run.
    pub fn from_env() -> Self {
        match (std::env::var(USERNAME_ENV), std::env::var(PASSWORD_ENV)) {
            (Ok(username), Ok(password)) => {
                Self::Scripted(ScriptedPrompter::new([username, password]))
            }
            _ => Self::Terminal(TerminalPrompter::new()),
        }
    }
}

impl Prompter for CliPrompter {
    fn ask(&mut self, question: &str, hidden: bool) -> AuthResult<String> {
        match self {
            Self::Terminal(prompter) => prompter.ask(question, hidden),
            Self::Scripted(prompter) => prompter.ask(question, hidden),
        }
    }
}

pub type CliLoader = ResourceLoader<CliPrompter, Stderr>;

/// Loads the token file.
pub fn open_storage(config: &TuneConfig) -> Result<TokenStorage> {
    let path = config.token_file();
    TokenStorage::load(&path)
        .with_context(|| format!("Failed to load tokens from {}", path.display()))
}

/// Builds a gist-capable loader from configuration.
pub fn open_loader(config: &TuneConfig) -> Result<CliLoader> {
    let storage = open_storage(config)?;
    let helper = ResourceAuthenticationHelper::new(CliPrompter::from_env(), io::stderr());
    let provider_file = ProviderAuthFile::new(config.auth_file());
    let loader =
        ResourceLoader::with_gist(config.http_config(), Some(provider_file), storage, helper)?;
    Ok(loader)
}
