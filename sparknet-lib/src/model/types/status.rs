//! Status enums stored as lowercase strings

use std::fmt;

use crate::error::FieldError;
use crate::model::Record;
use crate::model::Value;

/// A closed set of states stored as a string attribute.
pub trait Status: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Every state, in workflow order.
    const ALL: &'static [Self];

    /// The stored string form.
    fn as_str(&self) -> &'static str;

    /// Parses the stored string form.
    fn parse(s: &str) -> Option<Self>;

    /// Reads the status from `field`, failing on unknown values.
    fn from_field(record: &Record, field: &str) -> Result<Self, FieldError> {
        let raw = record
            .get_string(field)?
            .ok_or_else(|| FieldError::missing(field))?;
        Self::parse(raw).ok_or_else(|| FieldError::invalid_value(field, raw))
    }
}

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl Status for $name {
            const ALL: &'static [$name] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            fn parse(s: &str) -> Option<Self> {
                match s {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for Value {
            fn from(status: $name) -> Self {
                Value::String(status.as_str().to_string())
            }
        }
    };
}

status_enum! {
    /// Where a member is in the onboarding pipeline.
    MemberStatus {
        /// Applied, not yet reviewed.
        Applicant => "applicant",
        Interviewing => "interviewing",
        /// Accepted and available for projects.
        Active => "active",
        Inactive => "inactive",
        Rejected => "rejected",
    }
}

status_enum! {
    OpportunityStatus {
        Draft => "draft",
        Open => "open",
        Filled => "filled",
        Closed => "closed",
    }
}

status_enum! {
    ProjectStatus {
        Planned => "planned",
        Active => "active",
        OnHold => "on_hold",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

status_enum! {
    MilestoneStatus {
        Pending => "pending",
        InProgress => "in_progress",
        Done => "done",
    }
}

status_enum! {
    FeedbackStatus {
        Requested => "requested",
        Submitted => "submitted",
        Declined => "declined",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_storage() {
        assert_eq!(ProjectStatus::parse("on_hold"), Some(ProjectStatus::OnHold));
        assert_eq!(MilestoneStatus::InProgress.to_string(), "in_progress");
        assert_eq!(ProjectStatus::parse("On Hold"), None);
    }

    #[test]
    fn test_unknown_status_is_invalid_value() {
        let record = Record::new().set("status", "archived");
        let err = MemberStatus::from_field(&record, "status").unwrap_err();
        assert!(matches!(err, FieldError::InvalidValue { ref value, .. } if value == "archived"));
    }
}
