use super::*;

/// Tests the first track starts playing right away.
///
/// Verifies that enqueueing onto an empty queue asks the node to play the track and
/// marks the session as playing.
///
/// Expected: Ok(Playing), node played the track, queue length 1
#[tokio::test]
async fn plays_first_track_immediately() {
    let mut node = MockAudioNode::new();
    let played = record_plays(&mut node);
    let session = session();

    let outcome = session
        .enqueue_and_maybe_play(&node, track("First"))
        .await
        .unwrap();

    assert_eq!(outcome, EnqueueOutcome::Playing);
    assert_eq!(*played.lock().unwrap(), vec!["First".to_string()]);
    assert_eq!(session.queue().await.len(), 1);
    assert!(session.is_playing().await);
}

/// Tests later tracks are queued without touching the player.
///
/// Expected: Ok(Queued) with one-based positions, node played only the first track
#[tokio::test]
async fn queues_behind_playing_track() {
    let mut node = MockAudioNode::new();
    let played = record_plays(&mut node);
    let session = session();

    session
        .enqueue_and_maybe_play(&node, track("First"))
        .await
        .unwrap();
    let second = session
        .enqueue_and_maybe_play(&node, track("Second"))
        .await
        .unwrap();
    let third = session
        .enqueue_and_maybe_play(&node, track("Third"))
        .await
        .unwrap();

    assert_eq!(second, EnqueueOutcome::Queued { position: 2 });
    assert_eq!(third, EnqueueOutcome::Queued { position: 3 });
    assert_eq!(played.lock().unwrap().len(), 1);

    let titles: Vec<String> = session
        .queue()
        .await
        .into_iter()
        .map(|track| track.title)
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

/// Tests a track the node refuses is not left in the queue.
///
/// Expected: Err(Node), queue still empty, session not playing
#[tokio::test]
async fn rolls_back_when_node_refuses_track() {
    let mut node = MockAudioNode::new();
    node.expect_play()
        .times(1)
        .returning(|_, _, _| Err(NodeError::NotReady));
    let session = session();

    let result = session.enqueue_and_maybe_play(&node, track("First")).await;

    assert!(matches!(result, Err(MusicError::Node(NodeError::NotReady))));
    assert!(session.queue().await.is_empty());
    assert!(!session.is_playing().await);
}
