use super::*;

/// Tests the idle counter grows while nothing plays.
///
/// Expected: counter equals tick count, threshold reported on the last tick only
#[tokio::test]
async fn counts_idle_ticks_until_threshold() {
    let session = session();

    for expected in 1..5 {
        assert!(!session.tick(5).await);
        assert_eq!(session.idle_seconds().await, expected);
    }
    assert!(session.tick(5).await);
}

/// Tests a single playing tick resets the counter.
///
/// Verifies that after a reset a full threshold of idle ticks is needed again.
///
/// Expected: counter 0 while playing, threshold reached only after 5 more idle ticks
#[tokio::test]
async fn playing_tick_resets_counter() {
    let mut node = MockAudioNode::new();
    record_plays(&mut node);
    node.expect_set_paused().returning(|_, _| Ok(()));
    let session = session();
    for _ in 0..4 {
        session.tick(5).await;
    }

    session
        .enqueue_and_maybe_play(&node, track("Song"))
        .await
        .unwrap();
    assert!(!session.tick(5).await);
    assert_eq!(session.idle_seconds().await, 0);

    session.pause(&node).await.unwrap();
    for _ in 0..4 {
        assert!(!session.tick(5).await);
    }
    assert!(session.tick(5).await);
}
