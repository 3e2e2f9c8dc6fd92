use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Message shown by the create form when a required field is blank.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and Category are required fields";

/// Closed set of service categories offered by the create form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Development,
    Design,
    Marketing,
    Content,
    Support,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Development,
        Category::Design,
        Category::Marketing,
        Category::Content,
        Category::Support,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Development => "Development",
            Category::Design => "Design",
            Category::Marketing => "Marketing",
            Category::Content => "Content",
            Category::Support => "Support",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}

/// Lifecycle state of a service record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl ServiceStatus {
    pub const ALL: [ServiceStatus; 4] = [
        ServiceStatus::Pending,
        ServiceStatus::Active,
        ServiceStatus::Completed,
        ServiceStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Pending => "pending",
            ServiceStatus::Active => "active",
            ServiceStatus::Completed => "completed",
            ServiceStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ServiceStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}

/// A unit of work tracked by the dashboard.
///
/// `id` and `created_at` are assigned by the record store and never change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: u64,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    pub status: ServiceStatus,
    pub created_at: DateTime<Utc>,
}

impl ServiceRecord {
    /// Build the stored record from validated input.
    pub fn from_new(id: u64, input: NewService, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            category: input.category,
            description: input.description.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            created_at,
        }
    }
}

/// Typed input for creating a record; the store fills in `id` and `created_at`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewService {
    pub name: String,
    pub category: Category,
    pub description: Option<String>,
    pub status: Option<ServiceStatus>,
}

impl NewService {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self { name: name.into(), category, description: None, status: None }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: ServiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation(REQUIRED_FIELDS_MESSAGE.into()));
        }
        Ok(())
    }
}

/// Partial update: only `Some` fields replace the stored values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub status: Option<ServiceStatus>,
}

impl ServicePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.description.is_none() && self.status.is_none()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ModelError::Validation("name must not be empty".into()));
            }
        }
        Ok(())
    }

    pub fn apply(self, record: &mut ServiceRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
    }
}

/// Create-form payload as submitted by a client. Everything is text so that
/// blank and unknown values surface as validation errors rather than
/// deserialization failures.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateServiceInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateServiceInput {
    pub fn into_new_service(self) -> Result<NewService, ModelError> {
        if self.name.trim().is_empty() || self.category.trim().is_empty() {
            return Err(ModelError::Validation(REQUIRED_FIELDS_MESSAGE.into()));
        }
        let category = self.category.parse::<Category>()?;
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(s.parse::<ServiceStatus>()?),
        };
        Ok(NewService {
            name: self.name.trim().to_string(),
            category,
            description: self.description,
            status,
        })
    }
}

/// Update payload; absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateServiceInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateServiceInput {
    pub fn into_patch(self) -> Result<ServicePatch, ModelError> {
        let patch = ServicePatch {
            name: self.name.map(|n| n.trim().to_string()),
            category: self.category.as_deref().map(str::parse::<Category>).transpose()?,
            description: self.description,
            status: self.status.as_deref().map(str::parse::<ServiceStatus>).transpose()?,
        };
        patch.validate()?;
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ServiceRecord {
        ServiceRecord {
            id: 7,
            name: "Logo Design".into(),
            category: Category::Design,
            description: "Professional logo design for new brand".into(),
            status: ServiceStatus::Active,
            created_at: DateTime::<Utc>::default(),
        }
    }

    #[test]
    fn status_and_category_parse_case_insensitively() {
        assert_eq!("ACTIVE".parse::<ServiceStatus>().unwrap(), ServiceStatus::Active);
        assert_eq!(" design ".parse::<Category>().unwrap(), Category::Design);
        assert!(matches!("done".parse::<ServiceStatus>(), Err(ModelError::UnknownStatus(_))));
        assert!(matches!("All".parse::<Category>(), Err(ModelError::UnknownCategory(_))));
    }

    #[test]
    fn record_serializes_with_camel_case_timestamp() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["category"], "Design");
        assert_eq!(json["status"], "active");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn create_input_requires_name_and_category() {
        let blank_name = CreateServiceInput { category: "Design".into(), ..Default::default() };
        let err = blank_name.into_new_service().unwrap_err();
        assert_eq!(err.to_string(), REQUIRED_FIELDS_MESSAGE);

        let blank_category = CreateServiceInput { name: "Logo".into(), ..Default::default() };
        assert!(matches!(blank_category.into_new_service(), Err(ModelError::Validation(_))));
    }

    #[test]
    fn create_input_defaults_status_and_description() {
        let input = CreateServiceInput {
            name: "  Logo  ".into(),
            category: "Design".into(),
            description: None,
            status: Some(String::new()),
        };
        let new = input.into_new_service().unwrap();
        assert_eq!(new.name, "Logo");
        let rec = ServiceRecord::from_new(1, new, DateTime::<Utc>::default());
        assert_eq!(rec.status, ServiceStatus::Pending);
        assert_eq!(rec.description, "");
    }

    #[test]
    fn patch_replaces_only_supplied_fields() {
        let mut rec = record();
        let patch = UpdateServiceInput { status: Some("completed".into()), ..Default::default() }
            .into_patch()
            .unwrap();
        patch.apply(&mut rec);
        assert_eq!(rec.status, ServiceStatus::Completed);
        assert_eq!(rec.name, "Logo Design");
        assert_eq!(rec.id, 7);
    }

    #[test]
    fn patch_rejects_blank_name_and_unknown_values() {
        let blank = UpdateServiceInput { name: Some("   ".into()), ..Default::default() };
        assert!(blank.into_patch().is_err());
        let unknown = UpdateServiceInput { category: Some("Sales".into()), ..Default::default() };
        assert!(matches!(unknown.into_patch(), Err(ModelError::UnknownCategory(_))));
        assert!(ServicePatch::default().is_empty());
    }
}
