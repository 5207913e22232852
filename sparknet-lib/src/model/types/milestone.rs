//! Milestone entity

use chrono::DateTime;
use chrono::Utc;

use super::MilestoneStatus;
use super::Status;
use crate::error::FieldError;
use crate::model::Collection;
use crate::model::Entity;
use crate::model::FromRecord;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::optional;
use crate::model::required_string;

/// A dated checkpoint inside a project.
#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub id: Option<String>,
    pub project_id: String,
    pub title: String,
    pub due_at: Option<DateTime<Utc>>,
    pub status: MilestoneStatus,
}

impl Milestone {
    pub fn new(project_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: None,
            project_id: project_id.into(),
            title: title.into(),
            due_at: None,
            status: MilestoneStatus::Pending,
        }
    }
}

impl FromRecord for Milestone {
    fn from_record(record: &Record) -> Result<Self, FieldError> {
        Ok(Self {
            id: record.id().map(str::to_string),
            project_id: required_string(record, "projectId")?,
            title: required_string(record, "title")?,
            due_at: optional(record.get_datetime("dueAt"))?,
            status: MilestoneStatus::from_field(record, "status")?,
        })
    }
}

impl IntoRecord for Milestone {
    fn to_record(&self) -> Record {
        Record::new()
            .set("projectId", &self.project_id)
            .set("title", &self.title)
            .set("dueAt", self.due_at)
            .set("status", self.status)
    }
}

impl Entity for Milestone {
    const COLLECTION: Collection = Collection::Milestones;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
