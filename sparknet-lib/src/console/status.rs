//! Status selects with rollback

use std::future::Future;

use crate::error::Error;
use crate::model::types::Status;

/// The state behind a status dropdown.
///
/// Selecting a status shows it right away and runs the mutation. If the
/// mutation fails the previous status is restored before the error is
/// returned, so the select never shows a state the backend rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSelect<S> {
    current: S,
    saving: bool,
}

impl<S: Status> StatusSelect<S> {
    pub fn new(current: S) -> Self {
        Self {
            current,
            saving: false,
        }
    }

    /// The status currently shown.
    pub fn current(&self) -> S {
        self.current
    }

    /// Every status the select offers.
    pub fn options(&self) -> &'static [S] {
        S::ALL
    }

    /// Returns `true` while a mutation is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Shows `next` and persists it with `mutate`, reverting on failure.
    pub async fn select<F, Fut, T>(&mut self, next: S, mutate: F) -> Result<T, Error>
    where
        F: FnOnce(S) -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let previous = self.current;
        self.current = next;
        self.saving = true;

        let result = mutate(next).await;
        self.saving = false;

        if let Err(e) = &result {
            log::warn!(
                "Status change {} -> {} failed, reverting: {e}",
                previous.as_str(),
                next.as_str()
            );
            self.current = previous;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::MemberStatus;

    #[tokio::test]
    async fn test_failed_mutation_reverts() {
        let mut select = StatusSelect::new(MemberStatus::Applicant);

        let result: Result<(), Error> = select
            .select(MemberStatus::Active, |_| async {
                Err(Error::InvalidOperation("offline".to_string()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(select.current(), MemberStatus::Applicant);
        assert!(!select.is_saving());
    }

    #[tokio::test]
    async fn test_successful_mutation_keeps_new_status() {
        let mut select = StatusSelect::new(MemberStatus::Applicant);

        let seen = select
            .select(MemberStatus::Interviewing, |status| async move { Ok(status) })
            .await
            .unwrap();

        assert_eq!(seen, MemberStatus::Interviewing);
        assert_eq!(select.current(), MemberStatus::Interviewing);
        assert_eq!(select.options().len(), 5);
    }
}
