//! Opportunity entity

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::OpportunityStatus;
use super::Status;
use crate::error::FieldError;
use crate::model::Collection;
use crate::model::Entity;
use crate::model::FromRecord;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::Value;
use crate::model::optional;
use crate::model::optional_string;
use crate::model::required_string;
use crate::model::string_list;

/// A work opportunity posted for a client.
#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    pub id: Option<String>,
    pub title: String,
    pub client_id: Option<String>,
    pub description: Option<String>,
    /// Roles the opportunity is looking for.
    pub roles: Vec<String>,
    /// Hourly rate offered.
    pub rate: Option<Decimal>,
    pub status: OpportunityStatus,
}

impl Opportunity {
    pub fn draft(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            client_id: None,
            description: None,
            roles: Vec::new(),
            rate: None,
            status: OpportunityStatus::Draft,
        }
    }
}

fn rate_field(record: &Record) -> Result<Option<Decimal>, FieldError> {
    match optional(record.get_float("rate"))? {
        None => Ok(None),
        Some(rate) => Decimal::try_from(rate)
            .map(|d| Some(d.round_dp(2)))
            .map_err(|_| FieldError::invalid_value("rate", rate.to_string())),
    }
}

impl FromRecord for Opportunity {
    fn from_record(record: &Record) -> Result<Self, FieldError> {
        Ok(Self {
            id: record.id().map(str::to_string),
            title: required_string(record, "title")?,
            client_id: optional_string(record, "clientId")?,
            description: optional_string(record, "description")?,
            roles: string_list(record, "roles")?,
            rate: rate_field(record)?,
            status: OpportunityStatus::from_field(record, "status")?,
        })
    }
}

impl IntoRecord for Opportunity {
    fn to_record(&self) -> Record {
        let rate = self
            .rate
            .and_then(|r| r.to_f64())
            .map(Value::Float)
            .unwrap_or(Value::Null);
        Record::new()
            .set("title", &self.title)
            .set("clientId", self.client_id.clone())
            .set("description", self.description.clone())
            .set("roles", self.roles.clone())
            .set("rate", rate)
            .set("status", self.status)
    }
}

impl Entity for Opportunity {
    const COLLECTION: Collection = Collection::Opportunities;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_accepts_integer_attribute() {
        let record = Record::new()
            .set("title", "React contractor")
            .set("rate", 55)
            .set("status", "open");

        let opportunity = Opportunity::from_record(&record).unwrap();
        assert_eq!(opportunity.rate, Some(Decimal::new(55, 0)));
        assert_eq!(opportunity.status, OpportunityStatus::Open);
    }
}
