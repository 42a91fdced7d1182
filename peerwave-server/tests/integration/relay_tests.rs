use crate::create_test_room;
use crate::utils::SentSignal;
use peerwave_core::PeerId;
use peerwave_server::RoomCommand;

async fn join_both(
    cmd_tx: &tokio::sync::mpsc::Sender<RoomCommand>,
    signaling: &crate::utils::MockSignalingOutput,
) -> (PeerId, PeerId) {
    let alice = PeerId::new();
    let bob = PeerId::new();

    for peer in [&alice, &bob] {
        cmd_tx
            .send(RoomCommand::Join {
                peer_id: peer.clone(),
            })
            .await
            .expect("room alive");
    }
    signaling.next_signal().await;
    signaling.next_signal().await;

    (alice, bob)
}

#[tokio::test]
async fn test_offer_reaches_only_the_other_peer() {
    let (cmd_tx, signaling) = create_test_room();
    let (alice, bob) = join_both(&cmd_tx, &signaling).await;

    cmd_tx
        .send(RoomCommand::Offer {
            from: alice.clone(),
            sdp: "v=0 offer".to_string(),
        })
        .await
        .expect("room alive");

    assert_eq!(
        signaling.next_signal().await,
        SentSignal::Offer {
            peer_id: bob.clone(),
            sdp: "v=0 offer".to_string()
        }
    );
    // Nothing new for the sender beyond its join confirmation.
    assert_eq!(signaling.signals_for(&alice).await.len(), 1);
}

#[tokio::test]
async fn test_answer_flows_back() {
    let (cmd_tx, signaling) = create_test_room();
    let (alice, bob) = join_both(&cmd_tx, &signaling).await;

    cmd_tx
        .send(RoomCommand::Answer {
            from: bob,
            sdp: "v=0 answer".to_string(),
        })
        .await
        .expect("room alive");

    assert_eq!(
        signaling.next_signal().await,
        SentSignal::Answer {
            peer_id: alice,
            sdp: "v=0 answer".to_string()
        }
    );
}

#[tokio::test]
async fn test_ice_candidates_are_relayed() {
    let (cmd_tx, signaling) = create_test_room();
    let (alice, bob) = join_both(&cmd_tx, &signaling).await;

    cmd_tx
        .send(RoomCommand::IceCandidate {
            from: alice,
            candidate: "candidate:1".to_string(),
            sdp_mid: Some("0".to_string()),
            sdp_m_line_index: Some(0),
        })
        .await
        .expect("room alive");

    assert_eq!(
        signaling.next_signal().await,
        SentSignal::Ice {
            peer_id: bob,
            candidate: "candidate:1".to_string()
        }
    );
}

#[tokio::test]
async fn test_offer_from_a_non_participant_is_dropped() {
    let (cmd_tx, signaling) = create_test_room();
    let (_alice, _bob) = join_both(&cmd_tx, &signaling).await;
    let mallory = PeerId::new();

    cmd_tx
        .send(RoomCommand::Offer {
            from: mallory,
            sdp: "v=0 injected".to_string(),
        })
        .await
        .expect("room alive");

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(
        signaling
            .signals()
            .await
            .iter()
            .all(|s| !matches!(s, SentSignal::Offer { .. })),
        "offer from a peer without a slot must not reach the call"
    );
}

#[tokio::test]
async fn test_rejected_joiner_cannot_inject_candidates() {
    let (cmd_tx, signaling) = create_test_room();
    let (_alice, _bob) = join_both(&cmd_tx, &signaling).await;

    let carol = PeerId::new();
    cmd_tx
        .send(RoomCommand::Join {
            peer_id: carol.clone(),
        })
        .await
        .expect("room alive");
    assert!(matches!(
        signaling.next_signal().await,
        SentSignal::RoomFull { .. }
    ));

    cmd_tx
        .send(RoomCommand::IceCandidate {
            from: carol,
            candidate: "candidate:injected".to_string(),
            sdp_mid: None,
            sdp_m_line_index: None,
        })
        .await
        .expect("room alive");

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(
        signaling
            .signals()
            .await
            .iter()
            .all(|s| !matches!(s, SentSignal::Ice { .. })),
        "a peer whose join was rejected holds no slot and must not relay"
    );
}

#[tokio::test]
async fn test_offer_without_a_peer_is_dropped() {
    let (cmd_tx, signaling) = create_test_room();
    let alice = PeerId::new();

    cmd_tx
        .send(RoomCommand::Join {
            peer_id: alice.clone(),
        })
        .await
        .expect("room alive");
    signaling.next_signal().await;

    cmd_tx
        .send(RoomCommand::Offer {
            from: alice.clone(),
            sdp: "v=0 offer".to_string(),
        })
        .await
        .expect("room alive");

    // Give the room time to (not) relay anything.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(signaling.signals().await.len(), 1, "only the join confirmation");
}
