mod assist;
mod auth;
mod config;
mod db;
mod error;
mod observability;
mod rooms;
mod session;
mod validation;

use std::sync::Arc;

use record_store::{FileBackend, RecordStore};

use assist::AssistClient;
use auth::AuthService;
use config::AppConfig;
use db::Database;
use error::AppResult;
use session::SessionCell;

const STORE_PREFIX: &str = "devbrew";
const SESSION_KEY: &str = "devbrew_session";

#[tokio::main]
async fn main() -> AppResult<()> {
    observability::init_tracing();
    let config = AppConfig::from_env();

    let backend = Arc::new(FileBackend::new(&config.data_dir)?);
    let store = RecordStore::new(backend.clone(), STORE_PREFIX);
    let db = Database::new(store);
    db.bootstrap().await?;

    let session = SessionCell::new(backend, SESSION_KEY);
    let auth = AuthService::new(db.users.clone(), session);
    let assist = AssistClient::new(
        config.assist_base_url,
        config.assist_model,
        config.assist_api_key,
    );

    // Restore the previous session, falling back to the seeded demo account.
    let user = match auth.current_user().await? {
        Some(user) => user,
        None => auth.login(db::SEED_USERNAME, db::SEED_PASSWORD).await?,
    };
    tracing::info!(component = "app", user = %user.username, "session ready");

    println!(
        "signed in as @{} (dms: {})",
        user.username,
        user.message_privacy.as_str()
    );
    println!("-- {}", assist.coffee_fact().await);

    println!("\nfeed:");
    for post in db.posts.list().await? {
        let tags = if post.tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", post.tags.join(", "))
        };
        println!("  @{}: {}{}", post.author_username, post.content, tags);
    }

    let slugs: Vec<&str> = rooms::catalog().iter().map(|r| r.slug.as_str()).collect();
    println!("\nrooms: {}", slugs.join(", "));

    if let Some(room) = rooms::by_slug("llms") {
        let messages = db.messages.list_for_room(&room.id).await?;
        println!("\n#{} ({} messages): {}", room.slug, messages.len(), room.description);
        for message in &messages {
            println!("  @{}: {}", message.sender_username, message.content);
        }
    }

    let friends = db.friends.list_friends(&user.id).await?;
    let requests = db.friends.list_requests(&user.id).await?;
    println!(
        "\n{} friends, {} pending requests",
        friends.len(),
        requests.len()
    );

    Ok(())
}
