//! Stakeholder entity

use crate::error::FieldError;
use crate::model::Collection;
use crate::model::Entity;
use crate::model::FromRecord;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::optional_string;
use crate::model::required_string;

/// A person on the client side who follows one or more projects.
#[derive(Debug, Clone, PartialEq)]
pub struct Stakeholder {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub client_id: Option<String>,
    /// Job title at the client.
    pub title: Option<String>,
}

impl Stakeholder {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            client_id: None,
            title: None,
        }
    }
}

impl FromRecord for Stakeholder {
    fn from_record(record: &Record) -> Result<Self, FieldError> {
        Ok(Self {
            id: record.id().map(str::to_string),
            name: required_string(record, "name")?,
            email: required_string(record, "email")?,
            client_id: optional_string(record, "clientId")?,
            title: optional_string(record, "title")?,
        })
    }
}

impl IntoRecord for Stakeholder {
    fn to_record(&self) -> Record {
        Record::new()
            .set("name", &self.name)
            .set("email", &self.email)
            .set("clientId", self.client_id.clone())
            .set("title", self.title.clone())
    }
}

impl Entity for Stakeholder {
    const COLLECTION: Collection = Collection::Stakeholders;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
