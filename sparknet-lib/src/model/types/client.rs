//! Client entity

use crate::error::FieldError;
use crate::model::Collection;
use crate::model::Entity;
use crate::model::FromRecord;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::optional_string;
use crate::model::required_string;

/// A company that hires through the agency.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: Option<String>,
    pub name: String,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            contact_email: None,
            website: None,
            industry: None,
        }
    }
}

impl FromRecord for Client {
    fn from_record(record: &Record) -> Result<Self, FieldError> {
        Ok(Self {
            id: record.id().map(str::to_string),
            name: required_string(record, "name")?,
            contact_email: optional_string(record, "contactEmail")?,
            website: optional_string(record, "website")?,
            industry: optional_string(record, "industry")?,
        })
    }
}

impl IntoRecord for Client {
    fn to_record(&self) -> Record {
        Record::new()
            .set("name", &self.name)
            .set("contactEmail", self.contact_email.clone())
            .set("website", self.website.clone())
            .set("industry", self.industry.clone())
    }
}

impl Entity for Client {
    const COLLECTION: Collection = Collection::Clients;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
