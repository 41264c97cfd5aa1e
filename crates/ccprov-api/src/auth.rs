// Token authentication
//
// The controller exchanges HTTP basic credentials for a bearer token at
// `POST /dna/system/api/v1/auth/token`. Every other call carries that
// token in the `X-Auth-Token` header. Tokens are plain values: a refresh
// produces a new `AuthToken`, nothing is mutated in place.

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::client::CatalystClient;
use crate::error::{Error, body_preview};

/// Username/password pair used for the token exchange.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// Bearer token returned by the controller.
///
/// Immutable; re-authenticating yields a fresh value.
#[derive(Debug, Clone)]
pub struct AuthToken(SecretString);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Header value for `X-Auth-Token`, marked sensitive so it never
    /// shows up in reqwest's debug output.
    pub(crate) fn header_value(&self) -> Result<HeaderValue, Error> {
        let mut value =
            HeaderValue::from_str(self.0.expose_secret()).map_err(|e| Error::Authentication {
                message: format!("token is not a valid header value: {e}"),
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(rename = "Token")]
    token: String,
}

impl CatalystClient {
    /// Exchange credentials for a bearer token.
    ///
    /// `POST /dna/system/api/v1/auth/token` with HTTP basic auth.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, Error> {
        let url = self.system_url("auth/token")?;
        debug!("requesting token at {}", url);

        let resp = self
            .http()
            .post(url)
            .basic_auth(
                &credentials.username,
                Some(credentials.password.expose_secret()),
            )
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("token request failed (HTTP {status}): {}", body_preview(&body)),
            });
        }

        let body = resp.text().await?;
        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| Error::Authentication {
                message: format!("malformed token response: {e}"),
            })?;

        debug!("authentication successful");
        Ok(AuthToken::new(parsed.token))
    }
}
