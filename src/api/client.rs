use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

use crate::core::outcome::{ActivationError, ActivationOutcome};
use crate::core::ports::ActivationApi;
use crate::core::token::ActivationToken;

/// `PUT {base_url}/users/activate/{token}` over reqwest.
pub struct HttpActivationApi {
    http_client: Client,
    base_url: Url,
}

impl HttpActivationApi {
    /// Create the client. `timeout` bounds the whole request; `None` lets it
    /// run to completion.
    ///
    /// # Errors
    /// If the underlying HTTP client can't be built (TLS backend init).
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, ActivationError> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            http_client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Activation URL for `token`; the token becomes one percent-encoded
    /// path segment, an empty token leaves a trailing slash.
    ///
    /// # Errors
    /// `UnroutableToken` for `.` and `..`, which would otherwise drop out of
    /// the path and leave `/users/activate` without a token segment.
    pub fn endpoint(&self, token: &ActivationToken) -> Result<Url, ActivationError> {
        if matches!(token.expose(), "." | "..") {
            return Err(ActivationError::UnroutableToken);
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ActivationError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("users")
            .push("activate")
            .push(token.expose());
        Ok(url)
    }
}

#[async_trait]
impl ActivationApi for HttpActivationApi {
    async fn activate(&self, token: &ActivationToken) -> ActivationOutcome {
        let url = match self.endpoint(token) {
            Ok(url) => url,
            Err(e) => return ActivationOutcome::TransportError(e),
        };
        debug!(base = %self.base_url, "PUT /users/activate/<token>");
        match self.http_client.put(url).send().await {
            Ok(response) => {
                let status = response.status();
                debug!(status = status.as_u16(), "activation response received");
                ActivationOutcome::from_status(status)
            }
            Err(e) => ActivationOutcome::TransportError(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpActivationApi {
        HttpActivationApi::new(Url::parse(base).unwrap(), None).unwrap()
    }

    #[test]
    fn endpoint_appends_token_segment() {
        let url = api("http://localhost:8080/v1").endpoint(&"abc123".into()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v1/users/activate/abc123");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_in_base() {
        let url = api("http://localhost:8080/v1/").endpoint(&"abc123".into()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v1/users/activate/abc123");
        let url = api("http://localhost:8080").endpoint(&"t".into()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/users/activate/t");
    }

    #[test]
    fn empty_token_leaves_empty_segment() {
        let url = api("http://localhost:8080/v1").endpoint(&"".into()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v1/users/activate/");
    }

    #[test]
    fn token_cannot_escape_its_segment() {
        let url = api("http://localhost/v1").endpoint(&"a/../b?c".into()).unwrap();
        assert_eq!(url.path(), "/v1/users/activate/a%2F..%2Fb%3Fc");
    }

    #[test]
    fn dot_segment_tokens_are_refused() {
        let api = api("http://localhost/v1");
        for token in [".", ".."] {
            assert!(matches!(
                api.endpoint(&token.into()),
                Err(ActivationError::UnroutableToken)
            ));
        }
        let url = api.endpoint(&"...".into()).unwrap();
        assert_eq!(url.path(), "/v1/users/activate/...");
        let url = api.endpoint(&".a".into()).unwrap();
        assert_eq!(url.path(), "/v1/users/activate/.a");
    }
}
