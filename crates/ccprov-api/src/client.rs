// Intent API HTTP client
//
// Wraps `reqwest::Client` with controller URL construction, the
// `{ "response": [...] }` list envelope, and task-reference extraction
// from mutating calls. Endpoint groups (sites, pools, reservations,
// tasks) are implemented as inherent methods in their own files to keep
// this module focused on transport mechanics.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::AuthToken;
use crate::error::{Error, body_preview};
use crate::tasks::TaskRef;
use crate::transport::TransportConfig;

/// Header carrying the bearer token on every authenticated call.
pub const TOKEN_HEADER: &str = "X-Auth-Token";

const INTENT_PREFIX: &str = "dna/intent/api/v1";
const SYSTEM_PREFIX: &str = "dna/system/api/v1";

/// List endpoints wrap their payload as `{ "response": [...] }`.
#[derive(serde::Deserialize)]
struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    response: Vec<T>,
}

/// Raw HTTP client for the controller's intent API.
///
/// Stateless with respect to authentication: every call takes the
/// [`AuthToken`] to use, so a refreshed token never has to be written
/// back into the client.
#[derive(Debug, Clone)]
pub struct CatalystClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalystClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the controller root, e.g. `https://198.18.129.100`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/dna/intent/api/v1/{path}`
    pub(crate) fn intent_url(&self, path: &str) -> Result<Url, Error> {
        self.join(&format!("{INTENT_PREFIX}/{path}"))
    }

    /// `{base}/dna/system/api/v1/{path}`
    pub(crate) fn system_url(&self, path: &str) -> Result<Url, Error> {
        self.join(&format!("{SYSTEM_PREFIX}/{path}"))
    }

    /// Resolve a URL handed back by the controller.
    ///
    /// Absolute URLs are used as-is; anything else is treated as a path
    /// relative to the controller root.
    pub fn resolve(&self, raw: &str) -> Result<Url, Error> {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(Url::parse(raw)?)
        } else {
            self.join(raw)
        }
    }

    fn join(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn authorized(
        &self,
        builder: reqwest::RequestBuilder,
        token: &AuthToken,
    ) -> Result<reqwest::RequestBuilder, Error> {
        Ok(builder.header(TOKEN_HEADER, token.header_value()?))
    }

    /// Authenticated GET returning the raw response (used by task polling,
    /// which interprets status codes itself).
    pub(crate) async fn get_raw(
        &self,
        token: &AuthToken,
        url: Url,
    ) -> Result<reqwest::Response, Error> {
        debug!("GET {}", url);
        Ok(self.authorized(self.http.get(url), token)?.send().await?)
    }

    /// GET a list endpoint and unwrap the `response` envelope.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        token: &AuthToken,
        url: Url,
    ) -> Result<Vec<T>, Error> {
        let resp = self.get_raw(token, url).await?;
        let body = Self::success_body(resp).await?;
        let envelope: ListEnvelope<T> = decode(&body)?;
        Ok(envelope.response)
    }

    /// POST a JSON body and extract the task reference from the reply.
    pub(crate) async fn post_task(
        &self,
        token: &AuthToken,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<TaskRef, Error> {
        debug!("POST {}", url);
        let resp = self
            .authorized(self.http.post(url), token)?
            .json(body)
            .send()
            .await?;
        Self::task_ref(resp).await
    }

    /// DELETE a resource and extract the task reference from the reply.
    pub(crate) async fn delete_task(&self, token: &AuthToken, url: Url) -> Result<TaskRef, Error> {
        debug!("DELETE {}", url);
        let resp = self.authorized(self.http.delete(url), token)?.send().await?;
        Self::task_ref(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn task_ref(resp: reqwest::Response) -> Result<TaskRef, Error> {
        let body = Self::success_body(resp).await?;
        if body.trim().is_empty() {
            return Ok(TaskRef::default());
        }
        decode(&body)
    }

    /// Return the body of a 2xx response, mapping everything else to an error.
    async fn success_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                body: body_preview(&body),
            });
        }

        Ok(resp.text().await?)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", body_preview(body)),
        body: body.to_owned(),
    })
}
