//! Project update entity

use crate::error::FieldError;
use crate::model::Collection;
use crate::model::Entity;
use crate::model::FromRecord;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::optional_string;
use crate::model::required_string;

/// A progress note posted on a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectUpdate {
    pub id: Option<String>,
    pub project_id: String,
    /// Member who posted the update.
    pub author_id: Option<String>,
    pub body: String,
}

impl ProjectUpdate {
    pub fn new(project_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            project_id: project_id.into(),
            author_id: None,
            body: body.into(),
        }
    }
}

impl FromRecord for ProjectUpdate {
    fn from_record(record: &Record) -> Result<Self, FieldError> {
        Ok(Self {
            id: record.id().map(str::to_string),
            project_id: required_string(record, "projectId")?,
            author_id: optional_string(record, "authorId")?,
            body: required_string(record, "body")?,
        })
    }
}

impl IntoRecord for ProjectUpdate {
    fn to_record(&self) -> Record {
        Record::new()
            .set("projectId", &self.project_id)
            .set("authorId", self.author_id.clone())
            .set("body", &self.body)
    }
}

impl Entity for ProjectUpdate {
    const COLLECTION: Collection = Collection::Updates;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
