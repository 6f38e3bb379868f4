//! Content model structs for frontmatter, destinations and run results.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::PathBuf;

/// `type` value that routes a document to the notes collection
pub const NOTE_TYPE: &str = "note";

/// Destination collection inside the site directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Notes,
    Posts,
}

impl Collection {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Collection::Notes => "_notes",
            Collection::Posts => "_posts",
        }
    }

    pub fn all() -> [Collection; 2] {
        [Collection::Notes, Collection::Posts]
    }
}

/// A scalar header value, kept as written so it re-serializes unchanged
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Scalar(Value);

impl Scalar {
    /// Textual form: strings as-is, numbers and booleans formatted
    pub fn text(&self) -> String {
        scalar_text(&self.0).ok().flatten().unwrap_or_default()
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar(Value::String(s.to_string()))
    }
}

/// Frontmatter metadata from vault notes
///
/// The recognized keys are typed; every other key is kept in `extra` and
/// written back unchanged when the document is published.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub publish: bool,

    #[serde(
        default,
        deserialize_with = "deserialize_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<Scalar>,

    #[serde(
        default,
        deserialize_with = "deserialize_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Scalar>,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub note_type: Option<Scalar>,

    #[serde(flatten)]
    pub extra: Mapping,
}

impl Frontmatter {
    pub fn date_text(&self) -> Option<String> {
        self.date.as_ref().map(Scalar::text)
    }

    pub fn title_text(&self) -> Option<String> {
        self.title.as_ref().map(Scalar::text)
    }

    pub fn note_type_text(&self) -> Option<String> {
        self.note_type.as_ref().map(Scalar::text)
    }

    /// Publication date as `YYYY-MM-DD`
    ///
    /// Dates and date-times are reduced to their calendar date, any other
    /// value is used verbatim and a missing value falls back to `today`.
    pub fn resolved_date(&self, today: NaiveDate) -> String {
        match self.date_text() {
            Some(raw) => {
                let raw = raw.trim();
                match calendar_date(raw) {
                    Some(date) => date.format("%Y-%m-%d").to_string(),
                    None => raw.to_string(),
                }
            }
            None => today.format("%Y-%m-%d").to_string(),
        }
    }

    /// Title, falling back to the source file stem
    pub fn resolved_title(&self, fallback: &str) -> String {
        self.title_text().unwrap_or_else(|| fallback.to_string())
    }

    pub fn collection(&self) -> Collection {
        if self.note_type_text().as_deref() == Some(NOTE_TYPE) {
            Collection::Notes
        } else {
            Collection::Posts
        }
    }
}

fn calendar_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .map(|datetime| datetime.date())
}

/// YAML 1.1 style booleans: `yes`/`on`/`true` strings count as true.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(is_truthy_flag))
}

fn is_truthy_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "on"
        ),
        Value::Tagged(tagged) => is_truthy_flag(&tagged.value),
        _ => false,
    }
}

fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<Scalar>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match scalar_text(&value).map_err(D::Error::custom)? {
        Some(_) => Ok(Some(Scalar(value))),
        None => Ok(None),
    }
}

fn scalar_text(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) => Err("expected a scalar, found a sequence".to_string()),
        Value::Mapping(_) => Err("expected a scalar, found a mapping".to_string()),
    }
}

/// A document written to the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedNote {
    /// Source file inside the vault
    pub source: PathBuf,

    /// Written file inside the site
    pub output: PathBuf,

    pub collection: Collection,
}

/// Why a document was passed over without being an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No frontmatter block at the top of the file
    NoFrontmatter,

    /// `publish` missing or false
    Unpublished,
}

/// Result of handling one vault document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Published(PublishedNote),
    Skipped(SkipReason),
}

/// A document that failed to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishFailure {
    pub source: PathBuf,
    pub message: String,
}

/// Summary of a whole publishing run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub published: Vec<PublishedNote>,
    pub skipped: usize,
    pub failures: Vec<PublishFailure>,
}

impl PublishReport {
    /// Number of documents written to the site
    pub fn processed(&self) -> usize {
        self.published.len()
    }
}
