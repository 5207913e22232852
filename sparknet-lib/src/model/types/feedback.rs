//! Feedback request entity

use super::FeedbackStatus;
use super::Status;
use crate::error::FieldError;
use crate::model::Collection;
use crate::model::Entity;
use crate::model::FromRecord;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::optional_string;
use crate::model::required_string;

/// A request for a stakeholder to give feedback on a member's work.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRequest {
    pub id: Option<String>,
    pub project_id: String,
    pub stakeholder_id: String,
    pub member_id: String,
    pub message: Option<String>,
    pub status: FeedbackStatus,
}

impl FeedbackRequest {
    pub fn new(
        project_id: impl Into<String>,
        stakeholder_id: impl Into<String>,
        member_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            project_id: project_id.into(),
            stakeholder_id: stakeholder_id.into(),
            member_id: member_id.into(),
            message: None,
            status: FeedbackStatus::Requested,
        }
    }
}

impl FromRecord for FeedbackRequest {
    fn from_record(record: &Record) -> Result<Self, FieldError> {
        Ok(Self {
            id: record.id().map(str::to_string),
            project_id: required_string(record, "projectId")?,
            stakeholder_id: required_string(record, "stakeholderId")?,
            member_id: required_string(record, "memberId")?,
            message: optional_string(record, "message")?,
            status: FeedbackStatus::from_field(record, "status")?,
        })
    }
}

impl IntoRecord for FeedbackRequest {
    fn to_record(&self) -> Record {
        Record::new()
            .set("projectId", &self.project_id)
            .set("stakeholderId", &self.stakeholder_id)
            .set("memberId", &self.member_id)
            .set("message", self.message.clone())
            .set("status", self.status)
    }
}

impl Entity for FeedbackRequest {
    const COLLECTION: Collection = Collection::FeedbackRequests;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
