//! Filter/sort pipeline behind the services list.
//!
//! `query` is pure: it never fails and never touches the store. Absent or
//! empty criteria mean "no constraint", and the literal `All` does too.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use models::ServiceRecord;

use crate::errors::ServiceError;

/// Filter value meaning "any".
pub const ANY: &str = "All";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

fn constraint(value: &Option<String>) -> Option<&str> {
    match value.as_deref() {
        None | Some("") | Some(ANY) => None,
        Some(v) => Some(v),
    }
}

impl FilterSpec {
    pub fn matches(&self, record: &ServiceRecord) -> bool {
        if let Some(category) = constraint(&self.category) {
            if record.category.as_str() != category {
                return false;
            }
        }
        if let Some(status) = constraint(&self.status) {
            if record.status.as_str() != status {
                return false;
            }
        }
        match self.search.as_deref() {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                record.name.to_lowercase().contains(&needle)
                    || record.description.to_lowercase().contains(&needle)
            }
        }
    }
}

/// Sortable columns of the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Category,
    Status,
    #[serde(alias = "created_at")]
    CreatedAt,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Name, SortKey::Category, SortKey::Status, SortKey::CreatedAt];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Category => "category",
            SortKey::Status => "status",
            SortKey::CreatedAt => "createdAt",
        }
    }

    /// Natural ordering of the column: lexicographic on text, chronological on time.
    fn compare(&self, a: &ServiceRecord, b: &ServiceRecord) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Category => a.category.as_str().cmp(b.category.as_str()),
            SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(SortKey::Name),
            "category" => Ok(SortKey::Category),
            "status" => Ok(SortKey::Status),
            "createdAt" | "created_at" => Ok(SortKey::CreatedAt),
            other => Err(ServiceError::Validation(format!("unknown sort key: {other}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(ServiceError::Validation(format!("unknown sort direction: {other}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Newest first, the list's initial ordering.
    fn default() -> Self {
        Self { key: SortKey::CreatedAt, direction: SortDirection::Descending }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self { Self { key, direction } }

    pub fn ascending(key: SortKey) -> Self { Self::new(key, SortDirection::Ascending) }

    pub fn descending(key: SortKey) -> Self { Self::new(key, SortDirection::Descending) }

    /// Column-header click: same key ascending flips to descending, anything
    /// else sorts the clicked key ascending.
    pub fn toggle(&self, key: SortKey) -> Self {
        if self.key == key && self.direction == SortDirection::Ascending {
            Self::descending(key)
        } else {
            Self::ascending(key)
        }
    }

    pub fn compare(&self, a: &ServiceRecord, b: &ServiceRecord) -> Ordering {
        let ord = self.key.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Records passing `filter`, stably ordered by `sort`.
pub fn query(records: &[ServiceRecord], filter: &FilterSpec, sort: &SortSpec) -> Vec<ServiceRecord> {
    let mut out: Vec<ServiceRecord> = records.iter().filter(|r| filter.matches(r)).cloned().collect();
    out.sort_by(|a, b| sort.compare(a, b));
    out
}
