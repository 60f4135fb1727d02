// File: ./src/client/provider.rs
//! The two public Bible-text APIs: URL shapes, response bodies and the
//! versions each one offers.
use crate::config::ProviderKind;
use crate::model::{BibleVerse, Book};
use anyhow::{Context, Result};
use http::Uri;
use isolang::Language;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Deserializer};

use super::text::clean_text;

/// A translation offered by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub id: &'static str,
    pub name: &'static str,
    /// ISO 639-1 code.
    pub lang: &'static str,
}

impl VersionInfo {
    /// Language label in its own script when known ("中文", "English").
    pub fn language_name(&self) -> String {
        Language::from_639_1(self.lang)
            .map(|l| l.to_autonym().unwrap_or_else(|| l.to_name()).to_string())
            .unwrap_or_else(|| self.lang.to_string())
    }

    /// Version picker filter: case-insensitive match on id or name.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty() || self.id.to_lowercase().contains(&q) || self.name.to_lowercase().contains(&q)
    }
}

const fn version(id: &'static str, name: &'static str, lang: &'static str) -> VersionInfo {
    VersionInfo { id, name, lang }
}

pub static BOLLS_VERSIONS: &[VersionInfo] = &[
    version("CUNP", "新標點和合本", "zh"),
    version("CUV", "和合本", "zh"),
    version("KJV", "King James Version", "en"),
    version("NIV", "New International Version", "en"),
    version("ESV", "English Standard Version", "en"),
    version("NKJV", "New King James Version", "en"),
    version("WEB", "World English Bible", "en"),
];

pub static FHL_VERSIONS: &[VersionInfo] = &[
    version("unv", "和合本", "zh"),
    version("rcuv", "和合本2010", "zh"),
    version("ncv", "新譯本", "zh"),
    version("lzz", "呂振中譯本", "zh"),
    version("kjv", "King James Version", "en"),
    version("bbe", "Bible in Basic English", "en"),
    version("web", "World English Bible", "en"),
];

#[derive(Deserialize)]
struct BollsVerse {
    #[serde(deserialize_with = "number_or_string")]
    verse: u32,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct FhlResponse {
    status: String,
    #[serde(default)]
    record: Vec<FhlRecord>,
}

#[derive(Deserialize)]
struct FhlRecord {
    #[serde(deserialize_with = "number_or_string")]
    sec: u32,
    #[serde(default)]
    bible_text: Option<String>,
}

/// Verse numbers arrive as numbers from one API and sometimes as strings from the other.
fn number_or_string<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Text(String),
    }
    match Raw::deserialize(de)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A configured provider endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub kind: ProviderKind,
    base_url: String,
}

impl Provider {
    pub fn new(kind: ProviderKind, base_url: &str) -> Self {
        Self {
            kind,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn versions(&self) -> &'static [VersionInfo] {
        match self.kind {
            ProviderKind::Bolls => BOLLS_VERSIONS,
            ProviderKind::Fhl => FHL_VERSIONS,
        }
    }

    pub fn default_version(&self) -> &'static str {
        self.versions()[0].id
    }

    pub fn chapter_uri(&self, version: &str, book: &Book, chapter: u32) -> Result<Uri> {
        let version = utf8_percent_encode(version, NON_ALPHANUMERIC);
        let url = match self.kind {
            ProviderKind::Bolls => format!(
                "{}/get-chapter/{}/{}/{}/",
                self.base_url, version, book.number, chapter
            ),
            ProviderKind::Fhl => format!(
                "{}/json/qb.php?chineses={}&chap={}&version={}&gb=0",
                self.base_url,
                utf8_percent_encode(book.abbr, NON_ALPHANUMERIC),
                chapter,
                version
            ),
        };
        url.parse::<Uri>()
            .with_context(|| format!("Invalid request URL '{}'", url))
    }

    /// Decodes a chapter body into cleaned verses, ordered by verse number.
    pub fn parse_chapter(&self, body: &str) -> Result<Vec<BibleVerse>> {
        let mut verses: Vec<BibleVerse> = match self.kind {
            ProviderKind::Bolls => {
                let raw: Vec<BollsVerse> =
                    serde_json::from_str(body).context("Unexpected bolls.life response")?;
                raw.into_iter()
                    .map(|v| BibleVerse {
                        verse: v.verse,
                        text: clean_text(v.text.as_deref().unwrap_or_default()),
                    })
                    .collect()
            }
            ProviderKind::Fhl => {
                let raw: FhlResponse =
                    serde_json::from_str(body).context("Unexpected bible.fhl.net response")?;
                if raw.status != "success" {
                    anyhow::bail!("bible.fhl.net returned status '{}'", raw.status);
                }
                raw.record
                    .into_iter()
                    .map(|r| BibleVerse {
                        verse: r.sec,
                        text: clean_text(r.bible_text.as_deref().unwrap_or_default()),
                    })
                    .collect()
            }
        };
        verses.sort_by_key(|v| v.verse);
        Ok(verses)
    }
}
