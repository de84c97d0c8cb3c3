//! Interactive authentication loop.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use super::credentials::Credentials;
use super::error::{AuthError, AuthResult};
use super::handler::AuthenticationHandler;
use super::prompt::Prompter;
use super::token::Token;

/// Line written before every round of questions.
pub const AUTHENTICATION_REQUIRED_BANNER: &str =
    "Authentication required. Please, provide the following information:";

/// Asks for credentials until a handler accepts them.
///
/// Each round asks every required field again, in declaration order, and
/// calls [`AuthenticationHandler::authenticate`] with the collected answers.
/// Invalid credentials are reported to `output` and start a new round; any
/// other error ends the loop. There is no attempt limit: the loop stops on
/// success, on closed input, or when the cancellation flag is raised.
pub struct ResourceAuthenticationHelper<P, W> {
    prompter: P,
    output: W,
    cancelled: Option<Arc<AtomicBool>>,
}

impl<P: Prompter, W: Write> ResourceAuthenticationHelper<P, W> {
    /// Creates a helper asking questions with `prompter` and reporting to `output`.
    pub fn new(prompter: P, output: W) -> Self {
        Self { prompter, output, cancelled: None }
    }

    /// Stops the loop at the next round boundary once `flag` is set.
    #[must_use]
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(flag);
        self
    }

    /// Runs the loop for `handler` and returns the accepted token.
    pub fn ask_credentials(&mut self, handler: &dyn AuthenticationHandler) -> AuthResult<Token> {
        let fields = handler.required_credentials().normalize();
        let mut attempt: u32 = 0;

        loop {
            if self.is_cancelled() {
                return Err(AuthError::Cancelled);
            }
            attempt = attempt.saturating_add(1);

            writeln!(self.output, "{}", AUTHENTICATION_REQUIRED_BANNER)?;
            let mut credentials = Credentials::new();
            for (name, kind) in &fields {
                let answer = self.prompter.ask(&format!("{}: ", name), kind.is_hidden())?;
                credentials.insert(name.clone(), answer);
            }

            debug!(key = handler.key(), attempt, "Submitting credentials");
            match handler.authenticate(&credentials) {
                Ok(token) => {
                    debug!(key = handler.key(), attempt, "Authentication succeeded");
                    return Ok(token);
                }
                Err(e) if e.is_recoverable() => {
                    warn!(key = handler.key(), attempt, "Invalid credentials: {}", e);
                    writeln!(self.output, "Something wrong happened: {}.", e)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Returns the output sink.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Returns the prompter.
    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.as_ref().is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}
