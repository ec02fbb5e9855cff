use super::*;
use crate::service::test::voice_info;

/// Tests voice updates before the join handshake finished are not forwarded.
///
/// Expected: None for both session and server updates
#[tokio::test]
async fn ignores_updates_before_join() {
    let session = session();

    assert_eq!(session.update_voice_session("new").await, None);
    assert_eq!(session.update_voice_server("tok", "ep").await, None);
}

/// Tests only changed voice details are reported for forwarding.
///
/// Expected: None for repeats, Some with merged details for changes
#[tokio::test]
async fn reports_changed_voice_details() {
    let session = session();
    session.set_voice(voice_info()).await;

    assert_eq!(session.update_voice_session("voice-session").await, None);

    let moved = session.update_voice_session("moved").await.unwrap();
    assert_eq!(moved.session_id, "moved");
    assert_eq!(moved.token, voice_info().token);

    let migrated = session
        .update_voice_server("new-token", "us-east.discord.media:443")
        .await
        .unwrap();
    assert_eq!(migrated.session_id, "moved");
    assert_eq!(migrated.endpoint, "us-east.discord.media:443");

    assert_eq!(
        session
            .update_voice_server("new-token", "us-east.discord.media:443")
            .await,
        None
    );
}
