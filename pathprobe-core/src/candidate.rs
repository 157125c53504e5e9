//! Candidate URL generation.
//!
//! Each dictionary entry expands into one candidate per configured
//! [`SuffixVariant`], in configuration order. Generation is pure string work.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::dictionary::{Dictionary, DictionaryEntry};

/// A named transform applied to an entry before it is joined to the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixVariant {
    /// `entry`
    Plain,
    /// `entry.html`
    Html,
    /// `entry.js`
    Js,
    /// `entry/`
    Dir,
}

impl SuffixVariant {
    pub const ALL: [SuffixVariant; 4] = [
        SuffixVariant::Plain,
        SuffixVariant::Html,
        SuffixVariant::Js,
        SuffixVariant::Dir,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SuffixVariant::Plain => "plain",
            SuffixVariant::Html => "html",
            SuffixVariant::Js => "js",
            SuffixVariant::Dir => "dir",
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            SuffixVariant::Plain => "",
            SuffixVariant::Html => ".html",
            SuffixVariant::Js => ".js",
            SuffixVariant::Dir => "/",
        }
    }
}

impl fmt::Display for SuffixVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuffixVariant {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "plain" | "" => Ok(SuffixVariant::Plain),
            "html" | ".html" => Ok(SuffixVariant::Html),
            "js" | ".js" => Ok(SuffixVariant::Js),
            "dir" | "/" | "slash" => Ok(SuffixVariant::Dir),
            other => Err(format!(
                "unknown suffix variant '{other}' \
                 (expected plain, html, js or dir)"
            )),
        }
    }
}

/// A fully-qualified guess URL for one entry and one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    url: String,
    entry_index: usize,
    variant: SuffixVariant,
}

impl Candidate {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn into_url(self) -> String {
        self.url
    }

    /// Position of the source entry in the dictionary.
    pub fn entry_index(&self) -> usize {
        self.entry_index
    }

    pub fn variant(&self) -> SuffixVariant {
        self.variant
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Expands entries into candidates according to a suffix policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGenerator {
    suffixes: Vec<SuffixVariant>,
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self {
            suffixes: vec![SuffixVariant::Plain],
        }
    }
}

impl CandidateGenerator {
    /// An empty list falls back to `[Plain]` so every entry yields at least
    /// one candidate.
    pub fn new(suffixes: Vec<SuffixVariant>) -> Self {
        if suffixes.is_empty() {
            Self::default()
        } else {
            Self { suffixes }
        }
    }

    pub fn suffixes(&self) -> &[SuffixVariant] {
        &self.suffixes
    }

    pub fn variants_per_entry(&self) -> usize {
        self.suffixes.len()
    }

    /// Total candidates a dictionary expands to.
    pub fn candidate_count(&self, dictionary: &Dictionary) -> usize {
        dictionary.len().saturating_mul(self.variants_per_entry())
    }

    /// All candidates for one entry, in suffix order.
    pub fn generate(
        &self,
        prefix: &Url,
        entry_index: usize,
        entry: &DictionaryEntry,
    ) -> Vec<Candidate> {
        self.suffixes
            .iter()
            .map(|&variant| build(prefix, entry_index, entry, variant))
            .collect()
    }

    /// The `index`th candidate of the flattened plan
    /// (entry-major, suffix-minor), or `None` past the end.
    pub fn nth(
        &self,
        prefix: &Url,
        dictionary: &Dictionary,
        index: usize,
    ) -> Option<Candidate> {
        let per_entry = self.variants_per_entry();
        let entry_index = index / per_entry;
        let entry = dictionary.get(entry_index)?;
        let variant = self.suffixes[index % per_entry];
        Some(build(prefix, entry_index, entry, variant))
    }
}

fn build(
    prefix: &Url,
    entry_index: usize,
    entry: &DictionaryEntry,
    variant: SuffixVariant,
) -> Candidate {
    // The prefix already ends in '/'.
    let segment = entry.as_str().trim_start_matches('/');
    let url = format!("{}{}{}", prefix.as_str(), segment, variant.suffix());
    Candidate {
        url,
        entry_index,
        variant,
    }
}
