//! Member entity (freelancers and applicants)

use super::MemberStatus;
use super::Status;
use crate::error::FieldError;
use crate::model::Collection;
use crate::model::Entity;
use crate::model::FromRecord;
use crate::model::IntoRecord;
use crate::model::Record;
use crate::model::optional_string;
use crate::model::required_string;
use crate::model::string_list;

/// A freelancer or applicant.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    /// The auth account this member signs in with.
    pub account_id: Option<String>,
    pub roles: Vec<String>,
    pub skills: Vec<String>,
    pub status: MemberStatus,
    /// File ID of the avatar in the avatar bucket.
    pub avatar_id: Option<String>,
}

impl Member {
    /// Creates a new applicant.
    pub fn applicant(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            account_id: None,
            roles: Vec::new(),
            skills: Vec::new(),
            status: MemberStatus::Applicant,
            avatar_id: None,
        }
    }

    /// Sets the roles (builder pattern).
    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        self.roles = roles.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Links the member to an auth account (builder pattern).
    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }
}

impl FromRecord for Member {
    fn from_record(record: &Record) -> Result<Self, FieldError> {
        Ok(Self {
            id: record.id().map(str::to_string),
            name: required_string(record, "name")?,
            email: required_string(record, "email")?,
            account_id: optional_string(record, "accountId")?,
            roles: string_list(record, "roles")?,
            skills: string_list(record, "skills")?,
            status: MemberStatus::from_field(record, "status")?,
            avatar_id: optional_string(record, "avatarId")?,
        })
    }
}

impl IntoRecord for Member {
    fn to_record(&self) -> Record {
        Record::new()
            .set("name", &self.name)
            .set("email", &self.email)
            .set("accountId", self.account_id.clone())
            .set("roles", self.roles.clone())
            .set("skills", self.skills.clone())
            .set("status", self.status)
            .set("avatarId", self.avatar_id.clone())
    }
}

impl Entity for Member {
    const COLLECTION: Collection = Collection::Members;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_from_backend_json() {
        let json = r#"{
            "$id": "m1",
            "$createdAt": "2024-03-01T10:00:00.000+00:00",
            "name": "Kevin Ivan",
            "email": "kevin@example.com",
            "accountId": "acc-1",
            "roles": ["Frontend Developer"],
            "status": "interviewing"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        let member = Member::from_record(&record).unwrap();

        assert_eq!(member.id.as_deref(), Some("m1"));
        assert_eq!(member.status, MemberStatus::Interviewing);
        assert_eq!(member.roles, vec!["Frontend Developer"]);
        assert!(member.skills.is_empty());
        assert_eq!(member.avatar_id, None);
    }

    #[test]
    fn test_member_to_record_keeps_every_field() {
        let member = Member::applicant("Alex Kowalczyk", "alex@example.com")
            .with_roles(&["Backend Developer"])
            .with_account("acc-2");

        let mut record = member.to_record();
        record.set_id("m2");
        let back = Member::from_record(&record).unwrap();

        assert_eq!(back.name, member.name);
        assert_eq!(back.account_id.as_deref(), Some("acc-2"));
        assert_eq!(back.status, MemberStatus::Applicant);
        assert_eq!(back.id.as_deref(), Some("m2"));
    }
}
