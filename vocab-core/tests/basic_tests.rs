mod common;

use chrono::{Duration, Utc};
use common::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use vocab_core::{
    DoorGame, GameEvent, GameEventBus, QuizSession, SessionStep, StoryGame, generate_quiz,
};
use vocab_types::{Difficulty, DoorGamePhase, ExerciseError, LevelPhase};

#[test]
fn test_quiz_from_library_updates_history() {
    let (mut library, list_id) = create_test_library(5);
    let mut rng = StdRng::seed_from_u64(1);
    let started = Utc::now();

    let list = library.list(list_id).unwrap().clone();
    let mut session = QuizSession::start(&list, 10, &mut rng, started).unwrap();
    loop {
        let correct = session.current_question().unwrap().correct_index;
        session.answer(correct).unwrap();
        if session.advance().unwrap() == SessionStep::Finished {
            break;
        }
    }

    let result = session.finish(started + Duration::seconds(45));
    assert_eq!(result.score, 100);
    library.record_quiz_result(result).unwrap();

    assert_eq!(library.results_for(list_id).len(), 1);
    assert_eq!(library.overview().total_quizzes, 1);
    assert_eq!(library.overview().average_score, 100);
}

#[test]
fn test_quiz_needs_four_words() {
    let mut rng = StdRng::seed_from_u64(1);
    let err = generate_quiz(&create_test_list(3), 10, &mut rng).unwrap_err();
    assert!(err.is_content_shortage());

    let questions = generate_quiz(&create_test_list(4), 10, &mut rng).unwrap();
    assert_eq!(questions.len(), 4);
}

#[test]
fn test_quiz_orders_differ_between_calls() {
    let mut rng = StdRng::seed_from_u64(77);
    let list = create_test_list(10);

    let first: Vec<_> = generate_quiz(&list, 10, &mut rng)
        .unwrap()
        .into_iter()
        .map(|q| q.prompt.id)
        .collect();
    let second: Vec<_> = generate_quiz(&list, 10, &mut rng)
        .unwrap()
        .into_iter()
        .map(|q| q.prompt.id)
        .collect();
    assert_ne!(first, second);
}

#[test]
fn test_story_campaign_runs_to_the_end() {
    let mut game = StoryGame::with_seed(10).unwrap();
    game.set_difficulty(Difficulty::Medium);
    game.start();

    for level_id in 1..=4 {
        let mut session = game.enter_level(level_id).unwrap();
        assert_eq!(session.phase(), LevelPhase::Story);
        session.begin_quiz().unwrap();

        let questions = session.level().questions.clone();
        for question in &questions {
            let index = question
                .options
                .iter()
                .position(|o| *o == question.correct_answer)
                .unwrap();
            session.answer(index).unwrap();
        }

        let outcome = game.finish_level(&session).unwrap();
        assert!(outcome.passed);
    }

    assert!(game.progress().is_finished());
    assert_eq!(game.progress().current_level, 4);
}

#[test]
fn test_story_level_two_locked_until_level_one_passed() {
    let game = StoryGame::with_seed(10).unwrap();
    assert_eq!(
        game.enter_level(2).unwrap_err(),
        ExerciseError::LevelLocked { level_id: 2 }
    );
}

#[test]
fn test_door_events_reach_bus_handlers() {
    let collector = EventCollector::new();
    let mut bus = GameEventBus::new();
    bus.add_handler(Box::new(collector.clone()));

    let mut game = create_choosing_game(Difficulty::Easy, 1);
    let index = game.current_round().unwrap().correct_door_index;
    game.select_door(index).unwrap();
    game.start_next_round().unwrap();
    bus.publish_all(game.drain_events());

    assert!(collector.has_event_type(|e| matches!(e, GameEvent::RoundStarted { .. })));
    assert!(collector.has_event_type(|e| matches!(e, GameEvent::MemorizeFinished { .. })));
    assert!(collector.has_event_type(|e| matches!(e, GameEvent::HighScoreUpdated { high_score: 1 })));
    assert!(collector.has_event_type(|e| matches!(
        e,
        GameEvent::GameCompleted {
            score: 1,
            total_rounds: 1,
            ..
        }
    )));
    assert_eq!(game.phase(), DoorGamePhase::Completed);
}

#[test]
fn test_door_high_score_survives_new_game() {
    let mut game = DoorGame::with_seed(3);
    game.initialize(Difficulty::Hard, 2).unwrap();

    for _ in 0..2 {
        game.finish_memorizing();
        let index = game.current_round().unwrap().correct_door_index;
        game.select_door(index).unwrap();
        game.start_next_round().unwrap();
    }
    assert_eq!(game.high_score(), 2);

    game.initialize(Difficulty::Easy, 5).unwrap();
    assert_eq!(game.score(), 0);
    assert_eq!(game.high_score(), 2);
}

#[test]
fn test_timed_out_round_can_continue() {
    let mut game = create_choosing_game(Difficulty::Medium, 2);
    for _ in 0..8 {
        game.tick(game.epoch());
    }
    assert_eq!(game.phase(), DoorGamePhase::Incorrect);

    assert_eq!(game.start_next_round().unwrap(), DoorGamePhase::Memorizing);
    assert_eq!(game.current_round().unwrap().round_number, 2);
}
