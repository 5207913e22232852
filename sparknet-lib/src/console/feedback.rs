//! Feedback requests

use super::Console;
use crate::backend::Query;
use crate::error::Error;
use crate::model::types::FeedbackRequest;
use crate::model::types::FeedbackStatus;
use crate::model::types::Project;

impl Console {
    /// Asks a stakeholder of a project for feedback on a member.
    ///
    /// The stakeholder must be assigned to the project and the member
    /// staffed on it.
    pub async fn request_feedback(
        &self,
        project_id: &str,
        stakeholder_id: &str,
        member_id: &str,
        message: Option<&str>,
    ) -> Result<FeedbackRequest, Error> {
        let project = self.get::<Project>(project_id).await?;
        if !project.stakeholder_ids.iter().any(|id| id == stakeholder_id) {
            return Err(Error::InvalidOperation(format!(
                "stakeholder {stakeholder_id} is not assigned to project {project_id}"
            )));
        }
        if !project.member_ids.iter().any(|id| id == member_id) {
            return Err(Error::InvalidOperation(format!(
                "member {member_id} is not staffed on project {project_id}"
            )));
        }

        let mut request = FeedbackRequest::new(project_id, stakeholder_id, member_id);
        request.message = message.map(str::to_string);
        self.create(&request).await
    }

    /// Lists feedback requests about a member, newest first.
    pub async fn feedback_for_member(&self, member_id: &str) -> Result<Vec<FeedbackRequest>, Error> {
        self.query(&Query::new().equal("memberId", member_id).newest_first())
            .await
    }

    pub async fn set_feedback_status(
        &self,
        id: &str,
        status: FeedbackStatus,
    ) -> Result<FeedbackRequest, Error> {
        self.update_status::<FeedbackRequest, _>(id, status).await
    }
}
