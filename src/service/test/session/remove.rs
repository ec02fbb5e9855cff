use super::*;

async fn three_track_session(node: &MockAudioNode) -> crate::service::session::VoiceSession {
    let session = session();
    for title in ["First", "Second", "Third"] {
        session
            .enqueue_and_maybe_play(node, track(title))
            .await
            .unwrap();
    }
    session
}

/// Tests removing the second position of a three-track queue.
///
/// Expected: Ok(original second track), queue shrinks to First and Third
#[tokio::test]
async fn removes_second_track() {
    let mut node = MockAudioNode::new();
    record_plays(&mut node);
    let session = three_track_session(&node).await;

    let removed = session.remove_at(2).await.unwrap();

    assert_eq!(removed.title, "Second");
    assert_eq!(session.queue().await, vec![track("First"), track("Third")]);
}

/// Tests the playing track cannot be removed.
///
/// Expected: Err(InvalidIndex) for position 1, queue unchanged
#[tokio::test]
async fn rejects_playing_position() {
    let mut node = MockAudioNode::new();
    record_plays(&mut node);
    let session = three_track_session(&node).await;

    assert!(matches!(
        session.remove_at(1).await,
        Err(MusicError::InvalidIndex)
    ));
    assert_eq!(session.queue().await.len(), 3);
}

/// Tests positions outside the queue.
///
/// Expected: Err(InvalidIndex) for 0, negative and past-the-end positions
#[tokio::test]
async fn rejects_out_of_range_positions() {
    let mut node = MockAudioNode::new();
    record_plays(&mut node);
    let session = three_track_session(&node).await;

    for index in [0, -1, 4, i64::MAX] {
        assert!(matches!(
            session.remove_at(index).await,
            Err(MusicError::InvalidIndex)
        ));
    }
    assert_eq!(session.queue().await.len(), 3);
}

/// Tests the last position is removable.
///
/// Expected: Ok(last track)
#[tokio::test]
async fn removes_last_position() {
    let mut node = MockAudioNode::new();
    record_plays(&mut node);
    let session = three_track_session(&node).await;

    assert_eq!(session.remove_at(3).await.unwrap().title, "Third");
}
