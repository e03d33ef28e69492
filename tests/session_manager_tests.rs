use roadies_chat::services::session_manager::{SessionManager, Speaker};
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn basic_session_flow() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let sid = mgr.create_session().await;
    assert!(!sid.is_empty());
    let len = mgr.append(&sid, Speaker::Customer, "hello").await;
    assert_eq!(len, 1);
    let history = mgr.get_history(&sid).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].speaker, Speaker::Customer);
    assert!(mgr.remove_session(&sid).await);
}

#[tokio::test]
async fn test_session_expiration() {
    let mgr = SessionManager::new(Duration::from_millis(10));
    let sid = mgr.create_session().await;

    sleep(Duration::from_millis(20)).await;

    let removed_count = mgr.purge_expired().await;
    assert_eq!(removed_count, 1, "Should have removed 1 expired session");
    assert!(
        !mgr.remove_session(&sid).await,
        "Session should already be gone"
    );
}

#[tokio::test]
async fn test_history_keeps_both_speakers_in_order() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let sid = mgr.ensure_session("widget").await;

    mgr.append(&sid, Speaker::Customer, "mesh jackets").await;
    mgr.append(&sid, Speaker::Advisor, "Here are 5 mesh jackets").await;

    let history = mgr.get_history(&sid).await.unwrap();
    let speakers: Vec<Speaker> = history.iter().map(|e| e.speaker).collect();
    assert_eq!(speakers, vec![Speaker::Customer, Speaker::Advisor]);
    assert_eq!(history[0].content, "mesh jackets");
}
