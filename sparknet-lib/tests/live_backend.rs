//! Integration tests against a real backend.
//!
//! Ignored by default. To run them, create a `.env` file in the
//! sparknet-lib directory with:
//!
//! ```env
//! SPARKNET_ENDPOINT=https://cloud.example.com/v1
//! SPARKNET_PROJECT=your-project-id
//! SPARKNET_API_KEY=your-api-key
//! SPARKNET_DATABASE=your-database-id
//! SPARKNET_EMAIL=admin@example.com
//! SPARKNET_PASSWORD=your-password
//! ```
//!
//! Then run: `cargo test -p sparknet-lib -- --ignored`

use std::env;

use sparknet_lib::SparkNetClient;
use sparknet_lib::backend::AuthService;
use sparknet_lib::backend::DocumentStore;
use sparknet_lib::backend::Query;

struct LiveEnv {
    endpoint: String,
    project: String,
    api_key: String,
    database: String,
}

fn load_env() -> Option<LiveEnv> {
    let _ = dotenvy::dotenv();

    Some(LiveEnv {
        endpoint: env::var("SPARKNET_ENDPOINT").ok()?,
        project: env::var("SPARKNET_PROJECT").ok()?,
        api_key: env::var("SPARKNET_API_KEY").ok()?,
        database: env::var("SPARKNET_DATABASE").ok()?,
    })
}

fn client(live: &LiveEnv) -> SparkNetClient {
    SparkNetClient::builder()
        .endpoint(&live.endpoint)
        .project(&live.project)
        .api_key(&live.api_key)
        .build()
        .expect("valid client configuration")
}

#[tokio::test]
#[ignore = "requires real credentials in .env file"]
async fn test_list_members() {
    let live = load_env().expect("Missing required environment variables. See module docs.");
    let documents = client(&live).documents(&live.database);

    let members = documents
        .list("members", &Query::new().newest_first().limit(5))
        .await
        .expect("list members");

    println!("Fetched {} members", members.len());
    for pair in members.windows(2) {
        assert!(pair[0].created_at() >= pair[1].created_at());
    }
}

#[tokio::test]
#[ignore = "requires real credentials in .env file"]
async fn test_session_roundtrip() {
    let live = load_env().expect("Missing required environment variables. See module docs.");
    let email = env::var("SPARKNET_EMAIL").expect("SPARKNET_EMAIL");
    let password = env::var("SPARKNET_PASSWORD").expect("SPARKNET_PASSWORD");
    let client = client(&live);

    let session = client
        .create_session(&email, &password)
        .await
        .expect("create session");
    let account = client.current_account(&session).await.expect("current account");
    assert_eq!(account.email.to_lowercase(), email.to_lowercase());

    client.delete_session(&session).await.expect("delete session");
}
