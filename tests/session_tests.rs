use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use uuid::Uuid;

use healthbot_backend::message::{Theme, UserType};
use healthbot_backend::services::auth::login_user;
use healthbot_backend::services::sessions::SessionManager;
use healthbot_backend::services::storage::{FileStore, KeyValueStore, MemoryStore};

fn memory_manager(ttl: Duration) -> SessionManager {
    SessionManager::new(ttl, Arc::new(MemoryStore::default()))
}

#[tokio::test]
async fn basic_session_flow() {
    let mgr = memory_manager(Duration::from_secs(60));
    let token = mgr
        .create(login_user("john@example.com", UserType::Patient))
        .await;
    assert!(!token.is_empty());

    let session = mgr.get(&token).await.unwrap();
    assert_eq!(session.user.email, "john@example.com");
    assert_eq!(session.theme, Theme::Light);
    assert_eq!(session.language, "en");

    assert!(mgr.remove(&token).await);
    assert!(mgr.get(&token).await.is_none());
}

#[tokio::test]
async fn preference_updates_stick() {
    let mgr = memory_manager(Duration::from_secs(60));
    let token = mgr
        .create(login_user("john@example.com", UserType::Patient))
        .await;

    let updated = mgr
        .update(&token, |session| {
            session.theme = Theme::Dark;
            session.language = "fr".to_string();
        })
        .await
        .unwrap();
    assert_eq!(updated.theme, Theme::Dark);

    let session = mgr.get(&token).await.unwrap();
    assert_eq!(session.theme, Theme::Dark);
    assert_eq!(session.language, "fr");
}

#[tokio::test]
async fn idle_sessions_expire() {
    let mgr = memory_manager(Duration::from_millis(10));
    let token = mgr
        .create(login_user("john@example.com", UserType::Patient))
        .await;

    sleep(Duration::from_millis(20)).await;

    let purged = mgr.purge_expired().await;
    assert_eq!(purged, 1, "should have removed 1 expired session");
    assert_eq!(mgr.len().await, 0);
    assert!(!mgr.remove(&token).await, "session should already be gone");
}

#[tokio::test]
async fn file_store_revives_sessions_across_restarts() {
    let path = std::env::temp_dir().join(format!("healthbot-store-{}.json", Uuid::new_v4()));

    let token = {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).unwrap());
        let mgr = SessionManager::new(Duration::from_secs(60), store);
        mgr.create(login_user("john@example.com", UserType::Doctor))
            .await
    };

    // A fresh manager over the same file sees the session.
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).unwrap());
    let mgr = SessionManager::new(Duration::from_secs(60), store);
    let session = mgr.get(&token).await.unwrap();
    assert_eq!(session.user.email, "john@example.com");
    assert_eq!(session.user.user_type, UserType::Doctor);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn preference_updates_work_across_restarts() {
    let path = std::env::temp_dir().join(format!("healthbot-store-{}.json", Uuid::new_v4()));

    let token = {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).unwrap());
        let mgr = SessionManager::new(Duration::from_secs(60), store);
        mgr.create(login_user("john@example.com", UserType::Patient))
            .await
    };

    // A fresh manager must accept updates for store-backed tokens too.
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).unwrap());
    let mgr = SessionManager::new(Duration::from_secs(60), store);
    let updated = mgr
        .update(&token, |session| session.theme = Theme::Dark)
        .await;
    assert!(updated.is_some(), "update should revive the stored session");
    assert_eq!(updated.unwrap().theme, Theme::Dark);

    // And the change itself survives another restart.
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).unwrap());
    let mgr = SessionManager::new(Duration::from_secs(60), store);
    assert_eq!(mgr.get(&token).await.unwrap().theme, Theme::Dark);

    let _ = std::fs::remove_file(&path);
}
