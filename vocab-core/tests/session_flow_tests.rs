mod common;

use std::collections::HashMap;
use std::time::Duration;

use common::*;
use vocab_core::{GameEvent, Session};
use vocab_types::{
    CardState, GameError, GameType, HostView, Key, OptionMark, TypingFeedback, UserAction,
    WordId,
};

#[test]
fn test_quiz_end_to_end_with_small_pool() {
    let (mut host, events) = create_test_host(create_small_pool());
    host.start(GameType::Quiz).unwrap();
    let german: Vec<&str> = vec!["Hund", "Katze", "Baum", "Buch"];

    for round in 0..25 {
        let view = quiz_view(&host);
        assert_eq!(view.options.len(), 4);
        assert_eq!(view.question_number, round + 1);
        for option in &view.options {
            assert!(german.contains(&option.text.as_str()));
        }

        host.dispatch(UserAction::Answer { option: round as usize % 4 })
            .unwrap();
        let answered = quiz_view(&host);
        assert_eq!(
            answered
                .options
                .iter()
                .filter(|o| o.mark == OptionMark::Correct)
                .count(),
            1
        );

        host.advance(Duration::from_millis(1500));
    }

    assert_eq!(
        events.count_matching(|e| matches!(e, GameEvent::QuizAnswered { .. })),
        25
    );
}

#[test]
fn test_quiz_score_tracks_correct_answers() {
    let (mut host, _events) = create_test_host(create_words(10));
    host.start(GameType::Quiz).unwrap();

    let mut expected_score = 0;
    for round in 0..12 {
        let view = quiz_view(&host);
        let correct = view
            .options
            .iter()
            .position(|o| view.prompt == format!("slovo{}", &o.text[4..]))
            .unwrap();
        let pick = if round % 3 == 0 { (correct + 1) % 4 } else { correct };
        if pick == correct {
            expected_score += 1;
        }
        host.dispatch(UserAction::Answer { option: pick }).unwrap();
        assert_eq!(quiz_view(&host).score, expected_score);
        host.advance(Duration::from_millis(1500));
    }
    assert_eq!(quiz_view(&host).question_number, 13);
}

#[test]
fn test_flashcard_cursor_wraps_and_clamps() {
    let (mut host, _events) = create_test_host(create_words(6));
    host.start(GameType::Flashcards).unwrap();

    host.dispatch(UserAction::Previous).unwrap();
    assert_eq!(flashcard_view(&host).position, 0);

    for _ in 0..6 {
        host.dispatch(UserAction::Next).unwrap();
    }
    assert_eq!(flashcard_view(&host).position, 0);

    host.dispatch(UserAction::Flip).unwrap();
    assert!(flashcard_view(&host).flipped);
    host.advance(Duration::from_millis(150));
    let view = flashcard_view(&host);
    assert_eq!(view.counter, "1 / 6");
}

#[test]
fn test_flashcard_keyboard_scoped_to_session() {
    let (mut host, _events) = create_test_host(create_words(5));

    assert!(!host.key_press(Key::ArrowRight));

    host.start(GameType::Flashcards).unwrap();
    assert_eq!(host.keyboard_listeners(), 1);
    assert!(host.key_press(Key::ArrowRight));
    assert_eq!(flashcard_view(&host).position, 1);

    // Switching games drops the listener
    host.start(GameType::Typing).unwrap();
    assert_eq!(host.keyboard_listeners(), 0);
    assert!(!host.key_press(Key::ArrowRight));

    host.start(GameType::Flashcards).unwrap();
    host.stop();
    assert_eq!(host.keyboard_listeners(), 0);
}

#[test]
fn test_memory_board_and_matching() {
    let (mut host, events) = create_test_host(create_words(8));
    host.start(GameType::Memory).unwrap();

    let Some(Session::Memory(memory)) = host.session() else {
        panic!("memory not mounted");
    };
    let cards = memory.cards().to_vec();
    assert_eq!(cards.len(), 16);

    let mut positions: HashMap<WordId, Vec<usize>> = HashMap::new();
    for (index, card) in cards.iter().enumerate() {
        positions.entry(card.pair_key).or_default().push(index);
    }
    assert!(positions.values().all(|p| p.len() == 2));

    // One mismatch first
    let keys: Vec<WordId> = positions.keys().copied().collect();
    let a = positions[&keys[0]][0];
    let b = positions[&keys[1]][0];
    host.dispatch(UserAction::RevealCard { index: a }).unwrap();
    host.dispatch(UserAction::RevealCard { index: b }).unwrap();
    assert!(memory_view(&host).locked);
    assert_eq!(memory_view(&host).cards[a].state, CardState::Incorrect);

    host.advance(Duration::from_millis(1000));
    let view = memory_view(&host);
    assert!(!view.locked);
    assert_eq!(view.cards[a].state, CardState::Hidden);
    assert_eq!(view.cards[b].state, CardState::Hidden);

    // Then clear the board
    for pair in positions.values() {
        host.dispatch(UserAction::RevealCard { index: pair[0] }).unwrap();
        host.dispatch(UserAction::RevealCard { index: pair[1] }).unwrap();
        assert!(!memory_view(&host).locked);
    }
    assert_eq!(memory_view(&host).matched_pairs, 8);
    assert!(!memory_view(&host).won);

    host.advance(Duration::from_millis(500));
    assert!(memory_view(&host).won);
    host.advance(Duration::from_secs(10));
    assert_eq!(
        events.count_matching(|e| matches!(e, GameEvent::MemoryVictory { .. })),
        1
    );
    assert_eq!(memory_view(&host).moves, 9);
}

#[test]
fn test_memory_with_small_pool() {
    let (mut host, _events) = create_test_host(create_words(5));
    host.start(GameType::Memory).unwrap();
    let view = memory_view(&host);
    assert_eq!(view.cards.len(), 10);
    assert_eq!(view.total_pairs, 5);
}

#[test]
fn test_typing_round_trip() {
    let (mut host, events) = create_deterministic_host(create_small_pool());
    host.start(GameType::Typing).unwrap();
    assert_eq!(typing_view(&host).prompt, "pes");

    host.dispatch(UserAction::SubmitAnswer {
        text: "HUND".to_string(),
    })
    .unwrap();
    assert_eq!(typing_view(&host).streak, 1);
    assert_eq!(typing_view(&host).feedback, Some(TypingFeedback::Correct));

    host.advance(Duration::from_millis(1000));
    assert!(typing_view(&host).feedback.is_none());

    host.dispatch(UserAction::Hint).unwrap();
    assert_eq!(typing_view(&host).input, "Hun...");

    host.dispatch(UserAction::SubmitAnswer {
        text: "Katze".to_string(),
    })
    .unwrap();
    let view = typing_view(&host);
    assert_eq!(view.streak, 0);
    assert_eq!(
        view.feedback,
        Some(TypingFeedback::Incorrect {
            answer: "Hund".to_string()
        })
    );
    assert_eq!(host.pending_timers(), 0);
    assert!(events.has_event_type(|e| matches!(e, GameEvent::TypingChecked { correct: false, .. })));
}

#[test]
fn test_stale_timer_after_stop_is_ignored() {
    let (mut host, events) = create_test_host(create_small_pool());
    host.start(GameType::Quiz).unwrap();
    host.dispatch(UserAction::Answer { option: 0 }).unwrap();
    assert_eq!(host.pending_timers(), 1);

    host.stop();
    host.advance(Duration::from_secs(2));

    assert_eq!(host.view(), HostView::Selection);
    assert!(events.has_event_type(|e| matches!(e, GameEvent::StaleTimerIgnored { .. })));
    assert!(!events.has_event_type(|e| matches!(e, GameEvent::QuestionAsked { question_number: 2, .. })));
}

#[test]
fn test_stale_timer_does_not_touch_next_session() {
    let (mut host, _events) = create_test_host(create_small_pool());
    host.start(GameType::Quiz).unwrap();
    host.dispatch(UserAction::Answer { option: 1 }).unwrap();

    // New quiz before the old advance fires
    host.start(GameType::Quiz).unwrap();
    host.dispatch(UserAction::Answer { option: 2 }).unwrap();
    let locked = quiz_view(&host);
    assert!(locked.answered);

    host.advance(Duration::from_millis(1500));
    // Only the new session's own timer advanced it, exactly once
    let view = quiz_view(&host);
    assert_eq!(view.question_number, 2);
    assert!(!view.answered);
}

#[test]
fn test_stale_memory_revert_after_game_switch() {
    let (mut host, _events) = create_test_host(create_words(8));
    host.start(GameType::Memory).unwrap();
    let Some(Session::Memory(memory)) = host.session() else {
        panic!("memory not mounted");
    };
    let first_key = memory.cards()[0].pair_key;
    let stranger = memory
        .cards()
        .iter()
        .position(|c| c.pair_key != first_key)
        .unwrap();
    host.dispatch(UserAction::RevealCard { index: 0 }).unwrap();
    host.dispatch(UserAction::RevealCard { index: stranger }).unwrap();

    host.start(GameType::Memory).unwrap();
    host.dispatch(UserAction::RevealCard { index: 0 }).unwrap();
    host.advance(Duration::from_millis(1000));

    // The old revert must not have reset the new board's selection
    assert_eq!(memory_view(&host).cards[0].state, CardState::Revealed);
}

#[test]
fn test_wrong_action_for_game() {
    let (mut host, _events) = create_test_host(create_small_pool());
    host.start(GameType::Typing).unwrap();
    let result = host.dispatch(UserAction::Flip);
    assert_eq!(
        result,
        Err(GameError::ActionNotSupported {
            game: GameType::Typing,
            action: "flip".to_string()
        })
    );
}

#[test]
fn test_start_rejected_event() {
    let (mut host, events) = create_test_host(create_words(3));
    let result = host.start(GameType::Memory);
    assert!(result.is_err());
    assert_eq!(
        events.last_event(),
        Some(GameEvent::StartRejected {
            game_type: GameType::Memory,
            required: 4,
            available: 3
        })
    );
    assert_eq!(events.event_count(), 1);
}
