use super::*;

/// Tests pausing returns the current track and stops the playing state.
///
/// Expected: Ok(current track), node paused, session not playing
#[tokio::test]
async fn pause_returns_current_track() {
    let mut node = MockAudioNode::new();
    record_plays(&mut node);
    node.expect_set_paused()
        .withf(|_, paused| *paused)
        .times(1)
        .returning(|_, _| Ok(()));
    let session = session();
    session
        .enqueue_and_maybe_play(&node, track("Song"))
        .await
        .unwrap();

    let paused = session.pause(&node).await.unwrap();

    assert_eq!(paused.title, "Song");
    assert!(!session.is_playing().await);
}

/// Tests resuming restores the playing state and resets the idle counter.
///
/// Expected: Ok(current track), session playing, idle counter 0
#[tokio::test]
async fn resume_marks_session_playing() {
    let mut node = MockAudioNode::new();
    record_plays(&mut node);
    node.expect_set_paused().returning(|_, _| Ok(()));
    let session = session();
    session
        .enqueue_and_maybe_play(&node, track("Song"))
        .await
        .unwrap();
    session.pause(&node).await.unwrap();
    session.tick(600).await;
    session.tick(600).await;

    let resumed = session.resume(&node).await.unwrap();

    assert_eq!(resumed.title, "Song");
    assert!(session.is_playing().await);
    assert_eq!(session.idle_seconds().await, 0);
}

/// Tests pause and resume on an empty queue.
///
/// Expected: Err(NoCurrentTrack) for both, node never called
#[tokio::test]
async fn pause_and_resume_need_a_track() {
    let node = MockAudioNode::new();
    let session = session();

    assert!(matches!(
        session.pause(&node).await,
        Err(MusicError::NoCurrentTrack)
    ));
    assert!(matches!(
        session.resume(&node).await,
        Err(MusicError::NoCurrentTrack)
    ));
}
