use super::*;
use test_utils::lavalink::track::encoded_for;

/// Tests a finished track hands over to the next one.
///
/// Expected: Some(next track), node played it, finished track gone from the queue
#[tokio::test]
async fn advances_to_next_track() {
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

    let next = session.advance(&node, &encoded_for("First"), None).await;

    assert_eq!(next, Some(track("Second")));
    assert_eq!(*played.lock().unwrap(), vec!["First", "Second"]);
    assert_eq!(session.queue().await, vec![track("Second")]);
}

/// Tests the last track finishing leaves the session connected but idle.
///
/// Expected: None, queue empty, session not playing
#[tokio::test]
async fn last_track_end_goes_idle() {
    let mut node = MockAudioNode::new();
    record_plays(&mut node);
    let session = session();
    session
        .enqueue_and_maybe_play(&node, track("Only"))
        .await
        .unwrap();

    let next = session.advance(&node, &encoded_for("Only"), None).await;

    assert_eq!(next, None);
    assert!(session.queue().await.is_empty());
    assert!(!session.is_playing().await);
}

/// Tests an end event for a track that is no longer current is ignored.
///
/// Verifies that a track end racing a skip does not drop the track that replaced it.
///
/// Expected: None, queue unchanged
#[tokio::test]
async fn ignores_stale_track_end() {
    let mut node = MockAudioNode::new();
    let played = record_plays(&mut node);
    let session = session();
    session
        .enqueue_and_maybe_play(&node, track("Current"))
        .await
        .unwrap();

    let next = session.advance(&node, &encoded_for("Skipped"), None).await;

    assert_eq!(next, None);
    assert_eq!(session.queue().await, vec![track("Current")]);
    assert_eq!(played.lock().unwrap().len(), 1);
}

/// Tests a late end of one copy of a song does not end the copy queued after it.
///
/// Verifies that when the same track is queued twice and the first copy is skipped,
/// its end event arriving afterwards leaves the second copy playing.
///
/// Expected: None and second copy still queued for the first entry, queue empty
/// after the second entry ends
#[tokio::test]
async fn distinguishes_repeated_tracks_by_entry() {
    let mut node = MockAudioNode::new();
    let entries = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let log = std::sync::Arc::clone(&entries);
    node.expect_play().returning(move |_, _, entry| {
        log.lock().unwrap().push(entry);
        Ok(())
    });
    let session = session();
    session
        .enqueue_and_maybe_play(&node, track("Song"))
        .await
        .unwrap();
    session
        .enqueue_and_maybe_play(&node, track("Song"))
        .await
        .unwrap();
    session.skip(&node).await.unwrap();
    let (first, second) = {
        let entries = entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_ne!(entries[0], entries[1]);
        (entries[0], entries[1])
    };

    let stale = session
        .advance(&node, &encoded_for("Song"), Some(first))
        .await;

    assert_eq!(stale, None);
    assert_eq!(session.queue().await, vec![track("Song")]);

    let next = session
        .advance(&node, &encoded_for("Song"), Some(second))
        .await;

    assert_eq!(next, None);
    assert!(session.queue().await.is_empty());
}
