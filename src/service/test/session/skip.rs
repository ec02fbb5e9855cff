use super::*;

/// Tests skipping starts the next queued track.
///
/// Expected: Ok with the skipped and next track, node played the next track
#[tokio::test]
async fn skip_starts_next_track() {
    let mut node = MockAudioNode::new();
    let played = record_plays(&mut node);
    let session = session();
    session
        .enqueue_and_maybe_play(&node, track("First"))
        .await
        .unwrap();
    session
        .enqueue_and_maybe_play(&node, track("Second"))
        .await
        .unwrap();

    let outcome = session.skip(&node).await.unwrap();

    assert_eq!(
        outcome,
        SkipOutcome {
            skipped: track("First"),
            next: Some(track("Second")),
        }
    );
    assert_eq!(*played.lock().unwrap(), vec!["First", "Second"]);
    assert_eq!(session.current().await, Some(track("Second")));
}

/// Tests skipping the last track stops the player and idles the session.
///
/// Expected: Ok with next None, node stopped once, queue empty, not playing
#[tokio::test]
async fn skip_last_track_goes_idle() {
    let mut node = MockAudioNode::new();
    record_plays(&mut node);
    node.expect_stop().times(1).returning(|_| Ok(()));
    let session = session();
    session
        .enqueue_and_maybe_play(&node, track("Only"))
        .await
        .unwrap();

    let outcome = session.skip(&node).await.unwrap();

    assert_eq!(outcome.next, None);
    assert!(session.queue().await.is_empty());
    assert!(!session.is_playing().await);
}

/// Tests tracks the node refuses are skipped over.
///
/// Expected: the unplayable track is dropped and the one after it starts
#[tokio::test]
async fn skip_drops_unplayable_tracks() {
    let mut node = MockAudioNode::new();
    node.expect_play()
        .withf(|_, track, _| track.title == "Broken")
        .returning(|_, _, _| {
            Err(NodeError::Status {
                status: 400,
                message: "bad track".to_string(),
            })
        });
    let played = record_plays(&mut node);
    let session = session();
    for title in ["First", "Broken", "Third"] {
        session
            .enqueue_and_maybe_play(&node, track(title))
            .await
            .unwrap();
    }

    let outcome = session.skip(&node).await.unwrap();

    assert_eq!(outcome.next, Some(track("Third")));
    assert_eq!(*played.lock().unwrap(), vec!["First", "Third"]);
    assert_eq!(session.queue().await, vec![track("Third")]);
}

/// Tests skipping with nothing queued.
///
/// Expected: Err(NoCurrentTrack)
#[tokio::test]
async fn skip_on_empty_queue_fails() {
    let node = MockAudioNode::new();
    let session = session();

    assert!(matches!(
        session.skip(&node).await,
        Err(MusicError::NoCurrentTrack)
    ));
}
