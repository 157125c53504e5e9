//! Single-request probe executor.

use std::{fmt, str::FromStr, time::Duration};

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue},
    redirect,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{candidate::Candidate, error::Result};

/// Sent on every probe unless configuration overrides it.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; pathprobe/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(2500);

const MAX_REDIRECTS: usize = 10;

/// Why a probe produced no status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeFailure {
    Timeout,
    Connect,
    Other,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProbeFailure::Timeout => "timeout",
            ProbeFailure::Connect => "connect",
            ProbeFailure::Other => "transport",
        })
    }
}

impl From<&reqwest::Error> for ProbeFailure {
    fn from(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeFailure::Timeout
        } else if err.is_connect() {
            ProbeFailure::Connect
        } else {
            ProbeFailure::Other
        }
    }
}

/// Classification of one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Final status was exactly 200.
    Found,
    /// Any other final status.
    NotFound(u16),
    /// No status was received.
    Errored(ProbeFailure),
}

impl ProbeOutcome {
    pub fn from_status(status: u16) -> Self {
        if status == 200 {
            ProbeOutcome::Found
        } else {
            ProbeOutcome::NotFound(status)
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ProbeOutcome::Found)
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeMethod {
    #[default]
    Head,
    Get,
}

impl ProbeMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ProbeMethod::Head => "HEAD",
            ProbeMethod::Get => "GET",
        }
    }
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProbeMethod {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "HEAD" => Ok(ProbeMethod::Head),
            "GET" => Ok(ProbeMethod::Get),
            other => Err(format!(
                "unsupported probe method '{other}' (expected HEAD or GET)"
            )),
        }
    }
}

impl From<ProbeMethod> for reqwest::Method {
    fn from(method: ProbeMethod) -> Self {
        match method {
            ProbeMethod::Head => reqwest::Method::HEAD,
            ProbeMethod::Get => reqwest::Method::GET,
        }
    }
}

/// Per-request behaviour of [`HttpProber`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    pub method: ProbeMethod,
    pub timeout: Duration,
    pub user_agent: String,
    pub follow_redirects: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            method: ProbeMethod::default(),
            timeout: DEFAULT_PROBE_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            follow_redirects: true,
        }
    }
}

/// Issues exactly one request for a candidate and classifies the result.
///
/// Implementations never fail: transport problems are reported as
/// [`ProbeOutcome::Errored`].
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, candidate: &Candidate) -> ProbeOutcome;
}

/// [`Prober`] backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpProber {
    client: Client,
    method: ProbeMethod,
    timeout: Duration,
}

impl fmt::Debug for HttpProber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpProber")
            .field("method", &self.method)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HttpProber {
    pub fn new(settings: &ProbeSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        let redirects = if settings.follow_redirects {
            redirect::Policy::limited(MAX_REDIRECTS)
        } else {
            redirect::Policy::none()
        };

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout)
            .connect_timeout(settings.timeout)
            .redirect(redirects)
            .build()?;

        Ok(Self::with_client(client, settings))
    }

    /// Reuse an existing client. The per-request timeout still applies.
    pub fn with_client(client: Client, settings: &ProbeSettings) -> Self {
        Self {
            client,
            method: settings.method,
            timeout: settings.timeout,
        }
    }

    pub fn method(&self) -> ProbeMethod {
        self.method
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, candidate: &Candidate) -> ProbeOutcome {
        let response = self
            .client
            .request(self.method.into(), candidate.url())
            .timeout(self.timeout)
            .send()
            .await;

        // Dropping the response closes the body without reading it.
        let outcome = match response {
            Ok(response) => {
                ProbeOutcome::from_status(response.status().as_u16())
            }
            Err(err) => {
                let failure = ProbeFailure::from(&err);
                debug!(
                    target: "scan::probe",
                    url = %candidate,
                    failure = %failure,
                    error = %err,
                    "probe failed"
                );
                ProbeOutcome::Errored(failure)
            }
        };

        match outcome {
            ProbeOutcome::Found => {
                info!(target: "scan::probe", url = %candidate, "found")
            }
            ProbeOutcome::NotFound(status) => {
                debug!(target: "scan::probe", url = %candidate, status, "miss")
            }
            ProbeOutcome::Errored(_) => {}
        }
        outcome
    }
}
