//! Sign in, sign out and the signed-in member

use super::Console;
use crate::backend::Account;
use crate::backend::Query;
use crate::backend::Session;
use crate::error::AuthError;
use crate::error::Error;
use crate::model::types::Member;

impl Console {
    /// Creates a session from email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Error> {
        let session = self.auth.create_session(email, password).await?;
        log::info!("Signed in as account {}", session.account_id);
        Ok(session)
    }

    pub async fn sign_out(&self, session: &Session) -> Result<(), Error> {
        self.auth.delete_session(session).await?;
        log::info!("Signed out of session {}", session.id);
        Ok(())
    }

    /// Resolves the account behind a session.
    pub async fn current_account(&self, session: &Session) -> Result<Account, Error> {
        if session.is_expired() {
            return Err(AuthError::SessionExpired {
                session_id: session.id.clone(),
            }
            .into());
        }
        self.auth.current_account(session).await
    }

    /// Finds the member document linked to the session's account.
    pub async fn current_member(&self, session: &Session) -> Result<Member, Error> {
        let account = self.current_account(session).await?;
        let query = Query::new().equal("accountId", account.id.as_str()).limit(1);

        self.query::<Member>(&query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AuthError::NoMember { account_id: account.id }.into())
    }
}
