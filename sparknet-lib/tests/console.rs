use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use sparknet_lib::backend::DocumentStore;
use sparknet_lib::backend::Query;
use sparknet_lib::backend::memory::MemoryAuth;
use sparknet_lib::backend::memory::MemoryDocumentStore;
use sparknet_lib::backend::memory::MemoryFileStore;
use sparknet_lib::console::Console;
use sparknet_lib::console::ConsoleConfig;
use sparknet_lib::console::StatusSelect;
use sparknet_lib::error::ApiError;
use sparknet_lib::error::AuthError;
use sparknet_lib::error::Error;
use sparknet_lib::model::Record;
use sparknet_lib::model::types::FeedbackStatus;
use sparknet_lib::model::types::Member;
use sparknet_lib::model::types::MemberStatus;
use sparknet_lib::model::types::Project;
use sparknet_lib::model::types::Stakeholder;

/// Delegates to a memory store but can be told to fail writes.
struct FlakyStore {
    inner: MemoryDocumentStore,
    fail_updates: AtomicBool,
    lists: std::sync::Mutex<Vec<Query>>,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryDocumentStore::new(),
            fail_updates: AtomicBool::new(false),
            lists: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn list(&self, collection: &str, query: &Query) -> Result<Vec<Record>, Error> {
        self.lists.lock().unwrap().push(query.clone());
        self.inner.list(collection, query).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Record, Error> {
        self.inner.get(collection, id).await
    }

    async fn create(&self, collection: &str, record: &Record) -> Result<Record, Error> {
        self.inner.create(collection, record).await
    }

    async fn update(&self, collection: &str, id: &str, record: &Record) -> Result<Record, Error> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(ApiError::http(503, "service unavailable").into());
        }
        self.inner.update(collection, id, record).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), Error> {
        self.inner.delete(collection, id).await
    }
}

struct Fixture {
    console: Console,
    store: Arc<FlakyStore>,
    auth: Arc<MemoryAuth>,
    files: Arc<MemoryFileStore>,
}

fn fixture() -> Fixture {
    let store = Arc::new(FlakyStore::new());
    let auth = Arc::new(MemoryAuth::new());
    let files = Arc::new(MemoryFileStore::new());
    let console = Console::new(
        store.clone(),
        auth.clone(),
        files.clone(),
        ConsoleConfig::default(),
    );
    Fixture {
        console,
        store,
        auth,
        files,
    }
}

#[tokio::test]
async fn test_status_select_reverts_when_store_fails() {
    let fx = fixture();
    let member = fx
        .console
        .create(&Member::applicant("Kevin Ivan", "kevin@example.com"))
        .await
        .unwrap();
    let id = member.id.clone().unwrap();
    fx.store.fail_updates.store(true, Ordering::SeqCst);

    let mut select = StatusSelect::new(member.status);
    let result = select
        .select(MemberStatus::Active, |status| fx.console.set_member_status(&id, status))
        .await;

    assert!(matches!(result, Err(Error::Api(ApiError::Http { status: 503, .. }))));
    assert_eq!(select.current(), MemberStatus::Applicant);
    let stored = fx.console.get::<Member>(&id).await.unwrap();
    assert_eq!(stored.status, MemberStatus::Applicant);
}

#[tokio::test]
async fn test_status_select_keeps_saved_status() {
    let fx = fixture();
    let member = fx
        .console
        .create(&Member::applicant("Kevin Ivan", "kevin@example.com"))
        .await
        .unwrap();
    let id = member.id.clone().unwrap();

    let mut select = StatusSelect::new(member.status);
    let saved = select
        .select(MemberStatus::Interviewing, |status| fx.console.set_member_status(&id, status))
        .await
        .unwrap();

    assert_eq!(saved.status, MemberStatus::Interviewing);
    assert_eq!(select.current(), MemberStatus::Interviewing);
}

#[tokio::test]
async fn test_applicants_use_equality_filter() {
    let fx = fixture();
    let mut active = Member::applicant("Alex Kowalczyk", "alex@example.com");
    active.status = MemberStatus::Active;
    fx.console.create(&active).await.unwrap();
    fx.console
        .create(&Member::applicant("Kevin Ivan", "kevin@example.com"))
        .await
        .unwrap();

    let applicants = fx.console.list_applicants().await.unwrap();
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0].name, "Kevin Ivan");

    let queries = fx.store.lists.lock().unwrap();
    let last = queries.last().unwrap();
    assert!(last.is_newest_first());
    assert_eq!(last.filters()[0].0, "status");
}

#[tokio::test]
async fn test_current_member_by_account() {
    let fx = fixture();
    let account = fx.auth.register("kevin@example.com", "hunter2", "Kevin Ivan");
    fx.console
        .create(&Member::applicant("Kevin Ivan", "kevin@example.com").with_account(&account.id))
        .await
        .unwrap();

    let session = fx.console.sign_in("kevin@example.com", "hunter2").await.unwrap();
    let member = fx.console.current_member(&session).await.unwrap();
    assert_eq!(member.account_id.as_deref(), Some(account.id.as_str()));

    fx.console.sign_out(&session).await.unwrap();
    assert!(fx.console.current_member(&session).await.is_err());
}

#[tokio::test]
async fn test_account_without_member() {
    let fx = fixture();
    fx.auth.register("nobody@example.com", "pw", "Nobody");

    let session = fx.console.sign_in("nobody@example.com", "pw").await.unwrap();
    let err = fx.console.current_member(&session).await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::NoMember { .. })));
}

#[tokio::test]
async fn test_assign_stakeholder_and_request_feedback() {
    let fx = fixture();
    let member = fx
        .console
        .create(&Member::applicant("Kevin Ivan", "kevin@example.com"))
        .await
        .unwrap();
    let stakeholder = fx
        .console
        .create(&Stakeholder::new("Dana Client", "dana@client.io"))
        .await
        .unwrap();
    let project = fx.console.create(&Project::planned("Website")).await.unwrap();
    let (pid, sid, mid) = (
        project.id.unwrap(),
        stakeholder.id.unwrap(),
        member.id.unwrap(),
    );

    let denied = fx.console.request_feedback(&pid, &sid, &mid, None).await;
    assert!(matches!(denied, Err(Error::InvalidOperation(_))));

    fx.console.assign_stakeholder(&pid, &sid).await.unwrap();
    let project = fx.console.assign_stakeholder(&pid, &sid).await.unwrap();
    assert_eq!(project.stakeholder_ids, vec![sid.clone()]);
    fx.console.assign_member(&pid, &mid).await.unwrap();

    let request = fx
        .console
        .request_feedback(&pid, &sid, &mid, Some("How is Kevin doing?"))
        .await
        .unwrap();
    assert_eq!(request.status, FeedbackStatus::Requested);

    let answered = fx
        .console
        .set_feedback_status(request.id.as_deref().unwrap(), FeedbackStatus::Submitted)
        .await
        .unwrap();
    assert_eq!(answered.status, FeedbackStatus::Submitted);
    assert_eq!(fx.console.feedback_for_member(&mid).await.unwrap().len(), 1);

    let project = fx.console.unassign_stakeholder(&pid, &sid).await.unwrap();
    assert!(project.stakeholder_ids.is_empty());
}

#[tokio::test]
async fn test_assign_unknown_stakeholder_is_not_found() {
    let fx = fixture();
    let project = fx.console.create(&Project::planned("Website")).await.unwrap();

    let err = fx
        .console
        .assign_stakeholder(project.id.as_deref().unwrap(), "missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_avatar_replaces_previous_file() {
    let fx = fixture();
    let member = fx
        .console
        .create(&Member::applicant("Kevin Ivan", "kevin@example.com"))
        .await
        .unwrap();
    let id = member.id.unwrap();

    fx.console.set_avatar(&id, "a.png", vec![1], 64, 64).await.unwrap();
    let first = fx.console.get::<Member>(&id).await.unwrap().avatar_id.unwrap();
    let url = fx.console.set_avatar(&id, "b.png", vec![2], 64, 64).await.unwrap();
    let second = fx.console.get::<Member>(&id).await.unwrap().avatar_id.unwrap();

    assert_ne!(first, second);
    assert!(url.as_str().contains(&second));
    assert!(fx.files.file("avatars", &first).is_none());
    assert_eq!(fx.files.len(), 1);
}

#[tokio::test]
async fn test_avatar_upload_removed_when_member_save_fails() {
    let fx = fixture();
    let member = fx
        .console
        .create(&Member::applicant("Kevin Ivan", "kevin@example.com"))
        .await
        .unwrap();
    let id = member.id.unwrap();
    fx.store.fail_updates.store(true, Ordering::SeqCst);

    let result = fx.console.set_avatar(&id, "a.png", vec![1], 64, 64).await;

    assert!(matches!(result, Err(Error::Api(ApiError::Http { status: 503, .. }))));
    assert!(fx.files.is_empty());
    let stored = fx.console.get::<Member>(&id).await.unwrap();
    assert_eq!(stored.avatar_id, None);
}

#[tokio::test]
async fn test_clear_avatar_deletes_file() {
    let fx = fixture();
    let member = fx
        .console
        .create(&Member::applicant("Kevin Ivan", "kevin@example.com"))
        .await
        .unwrap();
    let id = member.id.unwrap();
    fx.console.set_avatar(&id, "a.png", vec![1], 64, 64).await.unwrap();
    assert_eq!(fx.files.len(), 1);

    let cleared = fx.console.clear_avatar(&id).await.unwrap();

    assert_eq!(cleared.avatar_id, None);
    assert!(fx.files.is_empty());
}

#[tokio::test]
async fn test_clear_avatar_succeeds_when_file_is_gone() {
    let fx = fixture();
    let mut member = Member::applicant("Kevin Ivan", "kevin@example.com");
    member.avatar_id = Some("ghost".to_string());
    let member = fx.console.create(&member).await.unwrap();
    let id = member.id.unwrap();

    let cleared = fx.console.clear_avatar(&id).await.unwrap();

    assert_eq!(cleared.avatar_id, None);
    let stored = fx.console.get::<Member>(&id).await.unwrap();
    assert_eq!(stored.avatar_id, None);
}

#[tokio::test]
async fn test_unassign_stakeholder_leaves_others() {
    let fx = fixture();
    let first = fx
        .console
        .create(&Stakeholder::new("Dana Client", "dana@client.io"))
        .await
        .unwrap();
    let second = fx
        .console
        .create(&Stakeholder::new("Sam Client", "sam@client.io"))
        .await
        .unwrap();
    let project = fx.console.create(&Project::planned("Website")).await.unwrap();
    let (pid, first, second) = (project.id.unwrap(), first.id.unwrap(), second.id.unwrap());

    fx.console.assign_stakeholder(&pid, &first).await.unwrap();
    fx.console.assign_stakeholder(&pid, &second).await.unwrap();
    let project = fx.console.unassign_stakeholder(&pid, &first).await.unwrap();

    assert_eq!(project.stakeholder_ids, vec![second.clone()]);
    let stakeholders = fx.console.stakeholders_for(&project).await.unwrap();
    assert_eq!(stakeholders.len(), 1);
    assert_eq!(stakeholders[0].id.as_deref(), Some(second.as_str()));
}

#[tokio::test]
async fn test_post_update_and_list() {
    let fx = fixture();
    let author = fx
        .console
        .create(&Member::applicant("Kevin Ivan", "kevin@example.com"))
        .await
        .unwrap();
    let project = fx.console.create(&Project::planned("Website")).await.unwrap();
    let pid = project.id.unwrap();

    fx.console.post_update(&pid, &author, "Kickoff done").await.unwrap();
    fx.console.post_update(&pid, &author, "Designs shared").await.unwrap();
    assert!(fx.console.post_update(&pid, &author, "  ").await.is_err());

    let updates = fx.console.updates_for(&pid).await.unwrap();
    let bodies: Vec<_> = updates.iter().map(|u| u.body.as_str()).collect();
    assert_eq!(bodies, vec!["Designs shared", "Kickoff done"]);
    assert_eq!(updates[0].author_id, author.id);
}
