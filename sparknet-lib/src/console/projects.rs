//! Project staffing, milestones and updates

use super::Console;
use crate::backend::Query;
use crate::error::Error;
use crate::model::Record;
use crate::model::types::Member;
use crate::model::types::Milestone;
use crate::model::types::Project;
use crate::model::types::ProjectUpdate;
use crate::model::types::Stakeholder;

impl Console {
    /// Adds a stakeholder to a project. Assigning twice is a no-op.
    pub async fn assign_stakeholder(
        &self,
        project_id: &str,
        stakeholder_id: &str,
    ) -> Result<Project, Error> {
        let project = self.get::<Project>(project_id).await?;
        // Fails with NotFound before touching the project.
        self.get::<Stakeholder>(stakeholder_id).await?;

        if project.stakeholder_ids.iter().any(|id| id == stakeholder_id) {
            return Ok(project);
        }
        let mut ids = project.stakeholder_ids;
        ids.push(stakeholder_id.to_string());
        self.patch(project_id, &Record::new().set("stakeholderIds", ids))
            .await
    }

    /// Removes a stakeholder from a project.
    pub async fn unassign_stakeholder(
        &self,
        project_id: &str,
        stakeholder_id: &str,
    ) -> Result<Project, Error> {
        let project = self.get::<Project>(project_id).await?;
        let ids: Vec<String> = project
            .stakeholder_ids
            .into_iter()
            .filter(|id| id != stakeholder_id)
            .collect();
        self.patch(project_id, &Record::new().set("stakeholderIds", ids))
            .await
    }

    /// Staffs a member on a project. Assigning twice is a no-op.
    pub async fn assign_member(&self, project_id: &str, member_id: &str) -> Result<Project, Error> {
        let project = self.get::<Project>(project_id).await?;
        self.get::<Member>(member_id).await?;

        if project.member_ids.iter().any(|id| id == member_id) {
            return Ok(project);
        }
        let mut ids = project.member_ids;
        ids.push(member_id.to_string());
        self.patch(project_id, &Record::new().set("memberIds", ids))
            .await
    }

    /// Lists the stakeholders assigned to a project.
    pub async fn stakeholders_for(&self, project: &Project) -> Result<Vec<Stakeholder>, Error> {
        let mut stakeholders = Vec::with_capacity(project.stakeholder_ids.len());
        for id in &project.stakeholder_ids {
            stakeholders.push(self.get::<Stakeholder>(id).await?);
        }
        Ok(stakeholders)
    }

    /// Lists a project's milestones, newest first.
    pub async fn milestones_for(&self, project_id: &str) -> Result<Vec<Milestone>, Error> {
        self.query(&Query::new().equal("projectId", project_id).newest_first())
            .await
    }

    /// Lists a project's updates, newest first.
    pub async fn updates_for(&self, project_id: &str) -> Result<Vec<ProjectUpdate>, Error> {
        self.query(&Query::new().equal("projectId", project_id).newest_first())
            .await
    }

    /// Posts an update on a project on behalf of a member.
    pub async fn post_update(
        &self,
        project_id: &str,
        author: &Member,
        body: &str,
    ) -> Result<ProjectUpdate, Error> {
        if body.trim().is_empty() {
            return Err(Error::InvalidOperation("update body is empty".to_string()));
        }
        self.get::<Project>(project_id).await?;

        let mut update = ProjectUpdate::new(project_id, body.trim());
        update.author_id = author.id.clone();
        self.create(&update).await
    }
}
