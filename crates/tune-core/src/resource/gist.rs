//! GitHub Gist resources.

use chrono::{DateTime, Local, Utc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::traits::ResourceHandler;
use super::types::{Metadata, Resource, ResourceError, ResourceKind, ResourceResult};
use crate::auth::{
    AuthError, AuthResult, AuthenticationHandler, CredentialKind, Credentials, OAUTH_TOKEN,
    ProviderAuthFile, RequiredCredentials, Token, TokenStorage,
};
use crate::http::HttpConfig;

/// Media type requested from the GitHub API.
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Provider domain used to look up fallback tokens.
const GITHUB_DOMAIN: &str = "github.com";

/// Scopes requested for new authorizations.
const AUTHORIZATION_SCOPES: &[&str] = &["public_repo"];

const EMPTY_CREDENTIALS: &str =
    "You should provide non-empty \"username\" and \"password\" information.";
const NO_TOKEN: &str = "Unable to get token.";
const URL_ISSUE: &str = "There is an issue with your gist URL: ";

/// Gist URIs: a bare id, optionally prefixed by `gist.github.com/` and an owner.
static URI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(?:https?://)?gist\.github\.com/)?",
        r"(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,38})/)?",
        r"(?P<id>[0-9a-fA-F]+)/?$",
    ))
    .expect("Gist URI regex should be valid")
});

/// Extracts the gist id from a gist URI.
pub fn parse_gist_id(uri: &str) -> Option<&str> {
    URI_PATTERN
        .captures(uri.trim())
        .and_then(|captures| captures.name("id"))
        .map(|id| id.as_str())
}

#[derive(Debug, Deserialize)]
struct GistOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct GistPayload {
    id: String,
    #[serde(default)]
    owner: Option<GistOwner>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    history: Vec<Value>,
    html_url: String,
    files: IndexMap<String, GistFile>,
}

#[derive(Debug, Serialize)]
struct AuthorizationRequest {
    scopes: Vec<String>,
    note: String,
}

#[derive(Debug, Default, Deserialize)]
struct AuthorizationResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Creates and authenticates single-file GitHub gists.
///
/// Gists are fetched with the OAuth token stored under `"gist"`, falling back
/// to the GitHub token of a provider `auth.json` file. Authentication trades a
/// GitHub username and password for a new personal authorization.
#[derive(Debug, Clone)]
pub struct GistHandler {
    client: Client,
    http: HttpConfig,
    auth_file: Option<ProviderAuthFile>,
}

impl GistHandler {
    /// Creates a gist handler using `http` for every request.
    pub fn new(http: HttpConfig) -> ResourceResult<Self> {
        let client = http.build_client()?;
        Ok(Self { client, http, auth_file: None })
    }

    /// Consults `auth_file` when no token is stored.
    #[must_use]
    pub fn with_auth_file(mut self, auth_file: ProviderAuthFile) -> Self {
        self.auth_file = Some(auth_file);
        self
    }

    /// Finds the OAuth token to send with gist requests.
    pub fn oauth_token(&self, tokens: &TokenStorage) -> Option<String> {
        if let Some(token) = tokens.get(ResourceKind::Gist.as_str()).and_then(Token::oauth_token) {
            return Some(token.to_string());
        }

        self.auth_file.as_ref().and_then(|file| {
            let token = file.github_oauth(GITHUB_DOMAIN);
            if token.is_some() {
                debug!(path = %file.path().display(), "Using GitHub token from provider auth file");
            }
            token
        })
    }

    fn fetch(&self, id: &str, token: Option<&str>) -> ResourceResult<(StatusCode, Value)> {
        let mut request = self
            .client
            .get(self.http.endpoint(&format!("gists/{}", id)))
            .header(ACCEPT, GITHUB_ACCEPT);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        let content = serde_json::from_str(&body).unwrap_or(Value::Null);
        debug!(id, status = status.as_u16(), "Fetched gist");

        Ok((status, content))
    }
}

/// Returns the `message` field of a GitHub error payload.
fn remote_message(content: &Value) -> Option<&str> {
    content.get("message").and_then(Value::as_str)
}

/// Describes the authorization so it can be recognized in GitHub settings.
fn authorization_note() -> String {
    let host = sysinfo::System::host_name().unwrap_or_else(|| "localhost".to_string());
    format!("tune on {} {}", host, Local::now().format("%Y-%m-%d %H%M"))
}

fn into_resource(content: Value) -> ResourceResult<Resource> {
    let payload: GistPayload =
        serde_json::from_value(content).map_err(|e| {
            ResourceError::InvalidResponse(format!("malformed gist: {}", e))
        })?;

    let mut files = payload.files.into_values();
    let (Some(file), None) = (files.next(), files.next()) else {
        return Err(ResourceError::validation("The gist should contain a single file"));
    };

    let metadata = Metadata {
        id: payload.id,
        owner: payload.owner.map_or_else(|| "anonymous".to_string(), |owner| owner.login),
        created_at: payload.created_at,
        updated_at: payload.updated_at,
        revision: payload.history.len(),
        uri: payload.html_url,
    };

    Ok(Resource::new(ResourceKind::Gist, file.content, metadata))
}

impl ResourceHandler for GistHandler {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Gist
    }

    fn supports(&self, uri: &str) -> bool {
        parse_gist_id(uri).is_some()
    }

    fn create_resource(&self, uri: &str, tokens: &TokenStorage) -> ResourceResult<Resource> {
        let id = parse_gist_id(uri).ok_or_else(|| {
            ResourceError::validation(format!("{}{} is not a gist", URL_ISSUE, uri))
        })?;
        let token = self.oauth_token(tokens);

        let (status, content) = self.fetch(id, token.as_deref())?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = remote_message(&content).unwrap_or("Authentication required");
            info!(id, status = status.as_u16(), "Gist requires authentication");
            return Err(ResourceError::authentication_required(
                Resource::placeholder(ResourceKind::Gist),
                message,
            ));
        }

        if status != StatusCode::OK {
            return Err(match remote_message(&content) {
                Some(message) => ResourceError::validation(format!("{}{}", URL_ISSUE, message)),
                None => ResourceError::validation(format!(
                    "{}Expected 200 status, got {}",
                    URL_ISSUE,
                    status.as_u16()
                )),
            });
        }

        into_resource(content)
    }
}

impl AuthenticationHandler for GistHandler {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Gist
    }

    fn required_credentials(&self) -> RequiredCredentials {
        RequiredCredentials::tagged([
            ("username", CredentialKind::Normal),
            ("password", CredentialKind::Secret),
        ])
    }

    fn authenticate(&self, credentials: &Credentials) -> AuthResult<Token> {
        let (Some(username), Some(password)) =
            (credentials.non_empty("username"), credentials.non_empty("password"))
        else {
            return Err(AuthError::invalid_credentials(EMPTY_CREDENTIALS));
        };

        let payload = AuthorizationRequest {
            scopes: AUTHORIZATION_SCOPES.iter().map(|s| (*s).to_string()).collect(),
            note: authorization_note(),
        };

        let response = self
            .client
            .post(self.http.endpoint("authorizations"))
            .basic_auth(username, Some(password))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&payload)?)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        let parsed: AuthorizationResponse = serde_json::from_str(&body).unwrap_or_default();
        debug!(
            status = status.as_u16(),
            has_token = parsed.token.is_some(),
            "Authorization exchange finished"
        );

        match parsed.token {
            Some(token) => Ok(Token::safe([(OAUTH_TOKEN, token)])),
            None => Err(AuthError::invalid_credentials(
                parsed.message.unwrap_or_else(|| NO_TOKEN.to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn handler() -> GistHandler {
        GistHandler::new(HttpConfig::with_api_url("http://127.0.0.1:9")).unwrap()
    }

    #[test]
    fn test_parse_gist_id() {
        let id = Some("aa5a315d61ae9438b18d");
        assert_eq!(parse_gist_id("https://gist.github.com/octocat/aa5a315d61ae9438b18d"), id);
        assert_eq!(parse_gist_id("https://gist.github.com/aa5a315d61ae9438b18d"), id);
        assert_eq!(parse_gist_id("gist.github.com/octo-cat/aa5a315d"), Some("aa5a315d"));
        assert_eq!(parse_gist_id("aa5a315d61ae9438b18d"), Some("aa5a315d61ae9438b18d"));
        assert_eq!(parse_gist_id("1234567"), Some("1234567"));
    }

    #[test]
    fn test_rejects_non_gist_uris() {
        assert_eq!(parse_gist_id("https://github.com/octocat/aa5a315d"), None);
        assert_eq!(parse_gist_id("script.php"), None);
        assert_eq!(parse_gist_id("https://gist.github.com/octocat/not-an-id"), None);
        assert_eq!(parse_gist_id(""), None);
    }

    #[test]
    fn test_required_credentials() {
        let normalized = AuthenticationHandler::required_credentials(&handler()).normalize();
        let fields: Vec<_> = normalized.iter().map(|(name, kind)| (name.as_str(), *kind)).collect();
        assert_eq!(
            fields,
            vec![("username", CredentialKind::Normal), ("password", CredentialKind::Secret)]
        );
    }

    #[test]
    fn test_empty_credentials_fail_without_request() {
        let handler = handler();
        for credentials in [
            Credentials::new(),
            [("username", "octocat")].into_iter().collect(),
            [("password", "hunter2")].into_iter().collect(),
            [("username", ""), ("password", "hunter2")].into_iter().collect(),
            [("username", "octocat"), ("password", "")].into_iter().collect(),
            [("username", ""), ("password", ""), ("otp", "123456")].into_iter().collect(),
        ] {
            match handler.authenticate(&credentials) {
                Err(AuthError::InvalidCredentials(message)) => {
                    assert_eq!(message, EMPTY_CREDENTIALS);
                }
                other => panic!("Expected InvalidCredentials, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_supports_and_key() {
        let handler = handler();
        assert!(handler.supports("https://gist.github.com/octocat/aa5a315d"));
        assert!(!handler.supports("https://example.com/script.php"));
        assert_eq!(AuthenticationHandler::key(&handler), "gist");
        assert!(handler.supports_authenticate(&Resource::placeholder(ResourceKind::Gist)));
    }

    #[test]
    fn test_stored_token_wins_over_auth_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("auth.json");
        std::fs::write(&path, r#"{"github-oauth": {"github.com": "from-file"}}"#).unwrap();
        let handler = handler().with_auth_file(ProviderAuthFile::new(&path));

        let mut tokens = TokenStorage::in_memory();
        assert_eq!(handler.oauth_token(&tokens), Some("from-file".to_string()));

        tokens.set("gist", Token::safe([(OAUTH_TOKEN, "stored")]));
        assert_eq!(handler.oauth_token(&tokens), Some("stored".to_string()));
    }

    #[test]
    fn test_into_resource_single_file() {
        let content = json!({
            "id": "aa5a315d",
            "owner": {"login": "octocat"},
            "created_at": "2020-01-01T10:00:00Z",
            "updated_at": "2020-01-02T10:00:00Z",
            "history": [{}, {}, {}],
            "html_url": "https://gist.github.com/aa5a315d",
            "files": {"hello.php": {"content": "<?php echo 'hi';"}}
        });

        let resource = into_resource(content).unwrap();
        assert_eq!(resource.content(), "<?php echo 'hi';");
        let metadata = resource.metadata().unwrap();
        assert_eq!(metadata.owner, "octocat");
        assert_eq!(metadata.revision, 3);
        assert_eq!(metadata.created_at.to_rfc3339(), "2020-01-01T10:00:00+00:00");
    }

    #[test]
    fn test_into_resource_anonymous_owner() {
        let content = json!({
            "id": "aa5a315d",
            "created_at": "2020-01-01T10:00:00Z",
            "updated_at": "2020-01-01T10:00:00Z",
            "html_url": "https://gist.github.com/aa5a315d",
            "files": {"a.php": {"content": ""}}
        });
        let resource = into_resource(content).unwrap();
        assert_eq!(resource.metadata().unwrap().owner, "anonymous");
        assert_eq!(resource.metadata().unwrap().revision, 0);
    }

    #[test]
    fn test_into_resource_rejects_multiple_files() {
        let content = json!({
            "id": "aa5a315d",
            "created_at": "2020-01-01T10:00:00Z",
            "updated_at": "2020-01-01T10:00:00Z",
            "html_url": "https://gist.github.com/aa5a315d",
            "files": {"a.php": {"content": "a"}, "b.php": {"content": "b"}}
        });
        let err = into_resource(content).unwrap_err();
        assert_eq!(err.to_string(), "The gist should contain a single file");
    }

    #[test]
    fn test_authorization_note() {
        let note = authorization_note();
        assert!(note.starts_with("tune on "));
    }
}
