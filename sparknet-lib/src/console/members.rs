//! Member and applicant operations

use url::Url;

use super::Console;
use crate::backend::Query;
use crate::error::Error;
use crate::model::Record;
use crate::model::Value;
use crate::model::types::Member;
use crate::model::types::MemberStatus;
use crate::model::types::Status;

impl Console {
    /// Lists every member, newest first.
    pub async fn list_members(&self) -> Result<Vec<Member>, Error> {
        self.list::<Member>().await
    }

    /// Lists members still in the applicant stage, newest first.
    pub async fn list_applicants(&self) -> Result<Vec<Member>, Error> {
        let query = Query::new()
            .equal("status", MemberStatus::Applicant.as_str())
            .newest_first();
        self.query::<Member>(&query).await
    }

    pub async fn set_member_status(&self, id: &str, status: MemberStatus) -> Result<Member, Error> {
        self.update_status::<Member, _>(id, status).await
    }

    /// Uploads a new avatar for a member and returns its preview URL.
    ///
    /// The previous avatar file is deleted once the member points at the new
    /// one. A failed cleanup is logged and does not fail the call.
    pub async fn set_avatar(
        &self,
        member_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Result<Url, Error> {
        let member = self.get::<Member>(member_id).await?;
        let bucket = self.config.avatar_bucket.as_str();

        let file_id = self.files.upload(bucket, file_name, bytes).await?;
        let changes = Record::new().set("avatarId", file_id.as_str());
        if let Err(e) = self.patch::<Member>(member_id, &changes).await {
            // Don't leave an orphan behind when the member can't point at it.
            if let Err(cleanup) = self.files.delete(bucket, &file_id).await {
                log::warn!("Failed to remove orphaned avatar {file_id}: {cleanup}");
            }
            return Err(e);
        }

        if let Some(old) = member.avatar_id.as_deref().filter(|old| *old != file_id)
            && let Err(e) = self.files.delete(bucket, old).await
        {
            log::warn!("Failed to delete previous avatar {old}: {e}");
        }

        self.files.preview_url(bucket, &file_id, width, height)
    }

    /// Removes a member's avatar.
    ///
    /// The file is deleted after the member is saved. A failed delete is
    /// logged and does not fail the call.
    pub async fn clear_avatar(&self, member_id: &str) -> Result<Member, Error> {
        let member = self.get::<Member>(member_id).await?;
        let updated = self
            .patch::<Member>(member_id, &Record::new().set("avatarId", Value::Null))
            .await?;
        if let Some(old) = member.avatar_id
            && let Err(e) = self.files.delete(&self.config.avatar_bucket, &old).await
        {
            log::warn!("Failed to delete avatar {old}: {e}");
        }
        Ok(updated)
    }

    /// Returns the preview URL of a member's avatar, if it has one.
    pub fn avatar_url(&self, member: &Member, width: u32, height: u32) -> Result<Option<Url>, Error> {
        member
            .avatar_id
            .as_deref()
            .map(|id| {
                self.files
                    .preview_url(&self.config.avatar_bucket, id, width, height)
            })
            .transpose()
    }
}
