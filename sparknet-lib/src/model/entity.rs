//! Mapping boundary between records and typed entities

use std::fmt;

use super::Record;
use crate::error::FieldError;

/// The collections the console works with.
///
/// Each variant is resolved to a concrete collection ID through
/// [`ConsoleConfig`](crate::console::ConsoleConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Members,
    Clients,
    Opportunities,
    Projects,
    Milestones,
    Updates,
    Stakeholders,
    FeedbackRequests,
}

impl Collection {
    /// All collections, in display order.
    pub const ALL: [Collection; 8] = [
        Collection::Members,
        Collection::Clients,
        Collection::Opportunities,
        Collection::Projects,
        Collection::Milestones,
        Collection::Updates,
        Collection::Stakeholders,
        Collection::FeedbackRequests,
    ];

    /// Returns the default collection ID.
    pub fn default_id(&self) -> &'static str {
        match self {
            Collection::Members => "members",
            Collection::Clients => "clients",
            Collection::Opportunities => "opportunities",
            Collection::Projects => "projects",
            Collection::Milestones => "milestones",
            Collection::Updates => "updates",
            Collection::Stakeholders => "stakeholders",
            Collection::FeedbackRequests => "feedback_requests",
        }
    }

    /// Parses a collection from its default ID or a common alias.
    pub fn parse(name: &str) -> Option<Collection> {
        let name = name.to_ascii_lowercase().replace('-', "_");
        Collection::ALL
            .into_iter()
            .find(|c| c.default_id() == name)
            .or(match name.as_str() {
                "member" | "applicants" => Some(Collection::Members),
                "client" => Some(Collection::Clients),
                "opportunity" => Some(Collection::Opportunities),
                "project" => Some(Collection::Projects),
                "milestone" => Some(Collection::Milestones),
                "update" => Some(Collection::Updates),
                "stakeholder" => Some(Collection::Stakeholders),
                "feedback" | "feedback_request" => Some(Collection::FeedbackRequests),
                _ => None,
            })
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_id())
    }
}

/// Builds a typed value from a fetched record.
pub trait FromRecord: Sized {
    fn from_record(record: &Record) -> Result<Self, FieldError>;
}

/// Turns a typed value into the fields sent on create/update.
pub trait IntoRecord {
    fn to_record(&self) -> Record;
}

/// A typed document stored in one of the console collections.
pub trait Entity: FromRecord + IntoRecord + Send + Sync {
    /// The collection this entity lives in.
    const COLLECTION: Collection;

    /// The document ID, `None` until created.
    fn id(&self) -> Option<&str>;
}

/// Treats a missing field as an absent optional value.
///
/// Type mismatches still surface as errors.
pub fn optional<T>(result: Result<Option<T>, FieldError>) -> Result<Option<T>, FieldError> {
    match result {
        Err(FieldError::Missing { .. }) => Ok(None),
        other => other,
    }
}

/// Gets a required, non-null string field.
pub fn required_string(record: &Record, field: &str) -> Result<String, FieldError> {
    record
        .get_string(field)?
        .map(str::to_string)
        .ok_or_else(|| FieldError::missing(field))
}

/// Gets an optional string field.
pub fn optional_string(record: &Record, field: &str) -> Result<Option<String>, FieldError> {
    Ok(optional(record.get_string(field))?.map(str::to_string))
}

/// Gets a string array field, treating missing or null as empty.
pub fn string_list(record: &Record, field: &str) -> Result<Vec<String>, FieldError> {
    Ok(optional(record.get_strings(field))?
        .unwrap_or_default()
        .into_iter()
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    #[test]
    fn test_parse_collection_aliases() {
        assert_eq!(Collection::parse("members"), Some(Collection::Members));
        assert_eq!(Collection::parse("applicants"), Some(Collection::Members));
        assert_eq!(Collection::parse("feedback-requests"), Some(Collection::FeedbackRequests));
        assert_eq!(Collection::parse("invoices"), None);
    }

    #[test]
    fn test_optional_helpers() {
        let record = Record::new().set("website", Value::Null).set("name", 5);

        assert_eq!(optional_string(&record, "website").unwrap(), None);
        assert_eq!(optional_string(&record, "industry").unwrap(), None);
        assert!(optional_string(&record, "name").is_err());
        assert!(required_string(&record, "website").unwrap_err().is_missing());
        assert!(string_list(&record, "roles").unwrap().is_empty());
    }
}
