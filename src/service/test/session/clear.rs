use super::*;

/// Tests clearing drops every track and stops the playing one.
///
/// Expected: Ok(3), node stopped once, queue empty, session not playing
#[tokio::test]
async fn clear_empties_queue_and_stops_playback() {
    let mut node = MockAudioNode::new();
    record_plays(&mut node);
    node.expect_stop().times(1).returning(|_| Ok(()));
    let session = session();
    for title in ["First", "Second", "Third"] {
        session
            .enqueue_and_maybe_play(&node, track(title))
            .await
            .unwrap();
    }

    let cleared = session.clear(&node).await.unwrap();

    assert_eq!(cleared, 3);
    assert!(session.queue().await.is_empty());
    assert!(!session.is_playing().await);
    assert_eq!(session.current().await, None);
}

/// Tests clearing an empty queue does not touch the player.
///
/// Expected: Ok(0), node never called
#[tokio::test]
async fn clear_on_empty_queue_is_noop() {
    let node = MockAudioNode::new();
    let session = session();

    assert_eq!(session.clear(&node).await.unwrap(), 0);
}

/// Tests a failed stop leaves the queue intact.
///
/// Expected: Err(Node), queue unchanged
#[tokio::test]
async fn clear_keeps_queue_when_stop_fails() {
    let mut node = MockAudioNode::new();
    record_plays(&mut node);
    node.expect_stop().returning(|_| Err(NodeError::NotReady));
    let session = session();
    session
        .enqueue_and_maybe_play(&node, track("First"))
        .await
        .unwrap();

    assert!(matches!(
        session.clear(&node).await,
        Err(MusicError::Node(NodeError::NotReady))
    ));
    assert_eq!(session.queue().await.len(), 1);
}
