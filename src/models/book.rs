//! Book record model and related types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, ToSchema};

/// Full book record as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    /// Total number of pages
    pub page_count: u32,
    /// Pages read so far, never greater than `page_count`
    pub read_page: u32,
    /// True when `read_page == page_count` at the last write
    pub finished: bool,
    /// Whether the book is currently being read
    pub reading: bool,
    #[serde(serialize_with = "serialize_timestamp")]
    pub inserted_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Overwrite every mutable field from the payload and refresh the derived state.
    pub(crate) fn apply(&mut self, payload: BookPayload, name: String, now: DateTime<Utc>) {
        self.name = name;
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.finished = payload.page_count == payload.read_page;
        self.reading = payload.reading;
        self.updated_at = now;
    }
}

fn serialize_timestamp<S: Serializer>(
    ts: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Reduced representation returned by listings
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Create / update book request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    /// Required, must not be empty
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub read_page: u32,
    #[serde(default)]
    pub reading: bool,
}

/// Boolean filter that may be left unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriState {
    #[default]
    Unset,
    False,
    True,
}

impl TriState {
    /// Parse a `"0"` / `"1"` query flag. Any other value leaves the filter unset.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("0") => TriState::False,
            Some("1") => TriState::True,
            _ => TriState::Unset,
        }
    }

    pub fn matches(self, value: bool) -> bool {
        match self {
            TriState::Unset => true,
            TriState::False => !value,
            TriState::True => value,
        }
    }
}

/// Query parameters for listing books
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// "1" for books being read, "0" for the others
    pub reading: Option<String>,
    /// "1" for finished books, "0" for unfinished ones
    pub finished: Option<String>,
}

impl BookQuery {
    /// Collect the known parameters from raw query pairs.
    ///
    /// A repeated parameter keeps its first value; unknown parameters are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut query.name,
                "reading" => &mut query.reading,
                "finished" => &mut query.finished,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// Resolved listing filters, all of which must match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub name: Option<String>,
    pub reading: TriState,
    pub finished: TriState,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        let name_matches = self
            .name
            .as_deref()
            .map_or(true, |needle| {
                book.name.to_lowercase().contains(&needle.to_lowercase())
            });
        name_matches && self.reading.matches(book.reading) && self.finished.matches(book.finished)
    }
}

impl From<BookQuery> for BookFilter {
    fn from(query: BookQuery) -> Self {
        Self {
            name: query.name.filter(|name| !name.is_empty()),
            reading: TriState::from_flag(query.reading.as_deref()),
            finished: TriState::from_flag(query.finished.as_deref()),
        }
    }
}
