//! Validation of the inbound site URL and derivation of the probe prefix.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ScanError};

/// Which part of the submitted site URL candidates are appended to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TargetScope {
    /// `scheme://host[:port]/` regardless of the submitted path.
    #[default]
    Origin,
    /// The directory of the submitted path, up to and including its last `/`.
    Path,
}

impl TargetScope {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetScope::Origin => "origin",
            TargetScope::Path => "path",
        }
    }
}

impl fmt::Display for TargetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetScope {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "origin" => Ok(TargetScope::Origin),
            "path" | "directory" => Ok(TargetScope::Path),
            other => Err(format!(
                "unknown target scope '{other}' (expected 'origin' or 'path')"
            )),
        }
    }
}

/// A validated site plus the prefix every candidate is built on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    site: Url,
    prefix: Url,
}

impl ScanTarget {
    /// Validate `raw` as an absolute `http`/`https` URL with a host.
    ///
    /// Runs before any network activity; every rejection is
    /// [`ScanError::InvalidInput`].
    pub fn parse(raw: Option<&str>, scope: TargetScope) -> Result<Self> {
        let raw = raw
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ScanError::invalid_site("missing `site` field"))?;

        let site = Url::parse(raw).map_err(ScanError::invalid_site)?;

        if !matches!(site.scheme(), "http" | "https") {
            return Err(ScanError::invalid_site(format!(
                "unsupported scheme '{}'",
                site.scheme()
            )));
        }
        if site.host_str().is_none_or(str::is_empty) {
            return Err(ScanError::invalid_site("missing host"));
        }

        let prefix = base_prefix(&site, scope)?;
        Ok(Self { site, prefix })
    }

    pub fn site(&self) -> &Url {
        &self.site
    }

    /// Always ends in `/`.
    pub fn prefix(&self) -> &Url {
        &self.prefix
    }
}

fn base_prefix(site: &Url, scope: TargetScope) -> Result<Url> {
    let origin = site.origin().ascii_serialization();
    let directory = match scope {
        TargetScope::Origin => "/",
        TargetScope::Path => {
            let path = site.path();
            match path.rfind('/') {
                Some(last) => &path[..=last],
                None => "/",
            }
        }
    };

    Url::parse(&format!("{origin}{directory}")).map_err(ScanError::invalid_site)
}
