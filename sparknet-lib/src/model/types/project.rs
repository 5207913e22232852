//! Project entity

use chrono::DateTime;
use chrono::Utc;

use super::ProjectStatus;
use super::Status;
use crate::error::FieldError;
use crate::model::Collection;
use crate::model::Entity;
use crate::model::FromRecord;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::optional;
use crate::model::optional_string;
use crate::model::required_string;
use crate::model::string_list;

/// A client engagement staffed with members.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: Option<String>,
    pub name: String,
    pub client_id: Option<String>,
    /// Stakeholders assigned to the project.
    pub stakeholder_ids: Vec<String>,
    /// Members staffed on the project.
    pub member_ids: Vec<String>,
    pub status: ProjectStatus,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn planned(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            client_id: None,
            stakeholder_ids: Vec::new(),
            member_ids: Vec::new(),
            status: ProjectStatus::Planned,
            starts_at: None,
            ends_at: None,
        }
    }
}

impl FromRecord for Project {
    fn from_record(record: &Record) -> Result<Self, FieldError> {
        Ok(Self {
            id: record.id().map(str::to_string),
            name: required_string(record, "name")?,
            client_id: optional_string(record, "clientId")?,
            stakeholder_ids: string_list(record, "stakeholderIds")?,
            member_ids: string_list(record, "memberIds")?,
            status: ProjectStatus::from_field(record, "status")?,
            starts_at: optional(record.get_datetime("startsAt"))?,
            ends_at: optional(record.get_datetime("endsAt"))?,
        })
    }
}

impl IntoRecord for Project {
    fn to_record(&self) -> Record {
        Record::new()
            .set("name", &self.name)
            .set("clientId", self.client_id.clone())
            .set("stakeholderIds", self.stakeholder_ids.clone())
            .set("memberIds", self.member_ids.clone())
            .set("status", self.status)
            .set("startsAt", self.starts_at)
            .set("endsAt", self.ends_at)
    }
}

impl Entity for Project {
    const COLLECTION: Collection = Collection::Projects;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
