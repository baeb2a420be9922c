use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::models::Contributor;

/// Error surfaced for any failed contributor lookup.
///
/// Only the message is meant for display; the variants exist for logging.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("{status_text}")]
    Status {
        status: StatusCode,
        status_text: String,
    },
    /// The request never produced a response.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
    /// A 2xx response whose body is not a contributor record.
    #[error("{0}")]
    Decode(#[source] reqwest::Error),
}

impl FetchError {
    pub fn from_status(status: StatusCode) -> Self {
        Self::Status {
            status,
            status_text: status_text(status),
        }
    }
}

/// Reason phrase for a status, falling back to the bare code.
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_string(), str::to_string)
}

/// Upper bound for an avatar download. Contributor lookups have none.
pub const AVATAR_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the achievements backend.
#[derive(Debug, Clone)]
pub struct ContributorClient {
    http: Client,
    base_url: Url,
}

/// Errors building a [`ContributorClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Base URL cannot carry a path: {0}")]
    InvalidBaseUrl(Url),
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

impl ContributorClient {
    /// Creates a client for the given backend base address.
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }

        let http = Client::builder().build()?;
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Address of `GET /contributors/{username}/` below the base URL.
    ///
    /// The username is pushed as a single path segment and percent-encoded
    /// accordingly. `.` and `..` are dot segments, which the url crate skips
    /// rather than escapes, so those usernames address `{base}/contributors/`.
    pub fn contributor_url(&self, username: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["contributors", username, ""]);
        }
        url
    }

    /// Fetches a contributor with their achievements by GitHub username.
    ///
    /// Exactly one request is made; failures are never retried.
    pub async fn fetch_contributor(&self, username: &str) -> Result<Contributor, FetchError> {
        let url = self.contributor_url(username);
        debug!(%url, "fetching contributor");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, username, "contributor request failed");
                FetchError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, username, "backend rejected contributor lookup");
            return Err(FetchError::from_status(status));
        }

        let contributor = response.json::<Contributor>().await.map_err(|e| {
            warn!(error = %e, username, "malformed contributor response");
            FetchError::Decode(e)
        })?;

        debug!(
            username = %contributor.github_username,
            achievements = contributor.achievements.len(),
            "contributor fetched"
        );
        Ok(contributor)
    }

    /// Downloads an avatar and decodes it into a square RGBA thumbnail.
    ///
    /// Avatars are decoration; any failure yields `None`.
    pub async fn fetch_avatar(&self, avatar_url: &str, size: u32) -> Option<crate::avatar::AvatarPixels> {
        let url = crate::avatar::sized_avatar_url(avatar_url, size)?;

        let response = match self.http.get(url).timeout(AVATAR_TIMEOUT).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!(status = %response.status(), avatar_url, "avatar not available");
                return None;
            }
            Err(e) => {
                debug!(error = %e, avatar_url, "avatar download failed");
                return None;
            }
        };

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(error = %e, avatar_url, "avatar body not received");
                return None;
            }
        };
        crate::avatar::decode_avatar(&bytes, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ContributorClient {
        ContributorClient::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn test_contributor_url_from_bare_host() {
        let url = client("http://127.0.0.1:8000").contributor_url("torvalds");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/contributors/torvalds/");
    }

    #[test]
    fn test_contributor_url_keeps_base_path() {
        let with_slash = client("https://example.org/api/").contributor_url("linus");
        let without_slash = client("https://example.org/api").contributor_url("linus");
        assert_eq!(with_slash.as_str(), "https://example.org/api/contributors/linus/");
        assert_eq!(with_slash, without_slash);
    }

    #[test]
    fn test_contributor_url_escapes_reserved_characters() {
        let url = client("http://localhost:8000/").contributor_url("a b/c?d#e");
        assert_eq!(url.path(), "/contributors/a%20b%2Fc%3Fd%23e/");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_dot_usernames_collapse_to_collection_path() {
        let client = client("http://h:8000/api/");
        for username in [".", ".."] {
            assert_eq!(
                client.contributor_url(username).as_str(),
                "http://h:8000/api/contributors/",
                "{username}"
            );
        }
        assert_eq!(
            client.contributor_url("...").path(),
            "/api/contributors/.../"
        );
    }

    #[test]
    fn test_rejects_cannot_be_a_base_url() {
        let err = ContributorClient::new(Url::parse("mailto:a@example.org").unwrap()).unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(StatusCode::NOT_FOUND), "Not Found");
        assert_eq!(status_text(StatusCode::INTERNAL_SERVER_ERROR), "Internal Server Error");
        assert_eq!(status_text(StatusCode::from_u16(599).unwrap()), "599");
    }

    #[test]
    fn test_status_error_message_is_status_text() {
        let err = FetchError::from_status(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Not Found");
    }
}
