/// Integration tests for game flow scenarios
///
/// Two players pass JSON snapshots back and forth the way the messaging
/// transport would, and the validator decides when the game ends.
use gin_rummy::{
    Card, GameConfig, GameError, GameObserver, GameState, GinGame, TurnPhase, entities::DECK_SIZE,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::sync::mpsc::{self, Receiver, Sender};

struct Outbox {
    tx: Sender<String>,
    results: Vec<bool>,
}

impl GameObserver for Outbox {
    fn game_ended(&mut self, did_win: bool) {
        self.results.push(did_win);
    }

    fn turn_completed(&mut self, state: &GameState) {
        let json = state.to_json().unwrap();
        self.tx.send(json).unwrap();
    }
}

fn player() -> (GinGame<Outbox>, Receiver<String>) {
    let (tx, rx) = mpsc::channel();
    let game = GinGame::new(Outbox {
        tx,
        results: Vec::new(),
    });
    (game, rx)
}

fn cards(notation: &str) -> Vec<Card> {
    notation
        .split_whitespace()
        .map(|card| card.parse().unwrap())
        .collect()
}

fn card_count(state: &GameState) -> usize {
    state.deck.len() + state.discard_pile.len() + state.sender_hand.len() + state.receiver_hand.len()
}

#[test]
fn test_random_game_conserves_cards() {
    let config = GameConfig::seven_card();
    let mut rng = StdRng::seed_from_u64(2024);
    let dealt = GameState::deal(&config, &mut rng).unwrap();

    let (mut alice, alice_rx) = player();
    let (mut bob, bob_rx) = player();
    alice.load_state(dealt.clone(), false);
    bob.load_state(dealt, true);

    // Bob moves first; turns alternate until someone has gin or the deck
    // runs dry.
    for turn in 0..200 {
        let (mover, outbox, other) = if turn % 2 == 0 {
            (&mut bob, &bob_rx, &mut alice)
        } else {
            (&mut alice, &alice_rx, &mut bob)
        };
        if mover.phase() == TurnPhase::GameEnd {
            break;
        }
        assert_eq!(mover.phase(), TurnPhase::Draw);

        match mover.draw_from_deck() {
            Ok(_) => {}
            Err(GameError::EmptyDeck) => break,
            Err(e) => panic!("unexpected error: {e}"),
        }
        assert_eq!(mover.player_hand().len(), config.hand_size + 1);

        let pick = rng.random_range(0..mover.player_hand().len());
        let card = mover.player_hand()[pick];
        mover.discard(card).unwrap();
        assert_eq!(mover.player_hand().len(), config.hand_size);

        let json = outbox.try_recv().unwrap();
        let state = GameState::from_json(&json).unwrap();
        assert_eq!(card_count(&state), DECK_SIZE);
        assert_eq!(state.discard_pile.last(), Some(&card));

        assert!(other.load_state(state, true));
        assert_eq!(other.opponent_hand(), mover.player_hand());
    }
}

#[test]
fn test_drawing_the_last_card_wins() {
    let state = GameState {
        deck: cards("3d 9h Jc"),
        discard_pile: cards("4s Ks"),
        sender_hand: cards("As 3s 5s 8s 9s Jh Qd Kh 2c 4c"),
        receiver_hand: cards("5h 6h 7h 7s 7d 7c 8c 9c 10c Jd"),
        sender_drew_from_deck: false,
        index_sender_drew_to: Some(0),
        index_sender_discarded_from: Some(4),
    };

    let (mut alice, _alice_rx) = player();
    let (mut bob, bob_rx) = player();
    alice.load_state(state.clone(), false);
    bob.load_state(state, true);

    let drawn = bob.draw_from_deck().unwrap();
    assert_eq!(drawn, "Jc".parse::<Card>().unwrap());
    assert!(bob.discard("Jd".parse().unwrap()).unwrap());
    assert_eq!(bob.phase(), TurnPhase::GameEnd);
    assert_eq!(bob.observer().results, vec![true]);

    let final_state = GameState::from_json(&bob_rx.try_recv().unwrap()).unwrap();
    assert!(alice.load_state(final_state, true));
    assert_eq!(alice.phase(), TurnPhase::GameEnd);
    assert!(alice.opponent_has_won());
    assert!(!alice.player_has_won());
    assert_eq!(alice.observer().results, vec![false]);
}

#[test]
fn test_resent_snapshot_is_ignored() {
    let dealt = GameState::deal(&GameConfig::default(), &mut StdRng::seed_from_u64(5)).unwrap();
    let (mut bob, bob_rx) = player();
    bob.load_state(dealt, true);
    if bob.phase() == TurnPhase::GameEnd {
        return;
    }

    let drawn = bob.draw_from_deck().unwrap();
    bob.discard(drawn).unwrap();
    let own = GameState::from_json(&bob_rx.try_recv().unwrap()).unwrap();

    // The transport echoes our own move back to us.
    assert!(!bob.load_state(own, false));
    assert_eq!(bob.phase(), TurnPhase::Idle);
}

#[test]
fn test_returning_the_taken_discard_reaches_opponent() {
    let state = GameState {
        deck: cards("2s 3d 9h Kc"),
        discard_pile: cards("4s Jc"),
        sender_hand: cards("As 3s 5s 8s 9s Jh Qd Kh 2c 4c"),
        receiver_hand: cards("5h 6h 7h 7s 7d 7c 8c 9c 10c Jd"),
        sender_drew_from_deck: true,
        index_sender_drew_to: None,
        index_sender_discarded_from: None,
    };

    let (mut alice, _alice_rx) = player();
    let (mut bob, bob_rx) = player();
    alice.load_state(state.clone(), false);
    bob.load_state(state, true);

    let taken = bob.draw_from_discard().unwrap();
    bob.discard(taken).unwrap();
    let sent = GameState::from_json(&bob_rx.try_recv().unwrap()).unwrap();
    assert_eq!(sent.discard_pile.last(), alice.discard_pile().last());

    assert!(alice.load_state(sent, true));
    assert_eq!(alice.phase(), TurnPhase::Draw);
    assert_eq!(alice.opponent_hand(), bob.player_hand());
}

#[test]
fn test_validation_on_separate_threads() {
    let hands = [
        cards("5h 6h 7h 7s 7d 7c 8c 9c 10c Jc"),
        cards("5h 6h 7h 7s 7d 7c 8c 9c 10c Jd"),
    ];
    let results: Vec<bool> = std::thread::scope(|s| {
        let handles: Vec<_> = hands
            .iter()
            .map(|hand| s.spawn(move || gin_rummy::can_meld_all_cards(hand)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results, vec![true, false]);
}
