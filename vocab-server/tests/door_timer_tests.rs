// Easy keeps the stored snapshot unchanged, so nothing touches the
// database while the clock is paused.


use std::time::Duration;
use test_helpers::DoorTestSetup;
use vocab_types::{Difficulty, DoorGamePhase, ServerMessage};

fn timer_ticks(messages: &[ServerMessage]) -> Vec<(DoorGamePhase, u32)> {
    messages
        .iter()
        .filter_map(|message| match message {
            ServerMessage::TimerTick {
                phase,
                seconds_remaining,
            } => Some((*phase, *seconds_remaining)),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_memorize_countdown_opens_the_doors() {
    let mut setup = DoorTestSetup::new(11).await;
    tokio::time::pause();

    let state = setup.doors.start(Difficulty::Easy, Some(3)).await.unwrap();
    assert_eq!(state.phase, DoorGamePhase::Memorizing);
    assert_eq!(state.seconds_remaining, Some(5));
    assert_eq!(state.current_round, 0);

    let messages = setup.drain_messages();
    assert!(matches!(messages[0], ServerMessage::RoundStarted { memorize_seconds: 5, .. }));

    tokio::time::sleep(Duration::from_millis(2500)).await;
    let state = setup.doors.state().await;
    assert_eq!(state.phase, DoorGamePhase::Memorizing);
    assert_eq!(state.seconds_remaining, Some(3));

    tokio::time::sleep(Duration::from_secs(3)).await;
    let state = setup.doors.state().await;
    assert_eq!(state.phase, DoorGamePhase::Choosing);
    assert_eq!(state.seconds_remaining, Some(10));

    let messages = setup.drain_messages();
    let ticks = timer_ticks(&messages);
    assert_eq!(
        ticks,
        vec![
            (DoorGamePhase::Memorizing, 4),
            (DoorGamePhase::Memorizing, 3),
            (DoorGamePhase::Memorizing, 2),
            (DoorGamePhase::Memorizing, 1),
            (DoorGamePhase::Memorizing, 0),
        ]
    );
    // The last tick goes out before the doors open
    assert!(matches!(
        messages.last(),
        Some(ServerMessage::ChoosingStarted { seconds: 10 })
    ));
}

#[tokio::test]
async fn test_choosing_countdown_times_out_the_round() {
    let mut setup = DoorTestSetup::new(12).await;
    tokio::time::pause();

    setup.doors.start(Difficulty::Easy, Some(2)).await.unwrap();
    // 5 seconds memorizing plus 10 seconds choosing
    tokio::time::sleep(Duration::from_millis(15500)).await;

    let state = setup.doors.state().await;
    assert_eq!(state.phase, DoorGamePhase::Incorrect);
    assert_eq!(state.score, 0);
    assert_eq!(state.seconds_remaining, None);

    let messages = setup.drain_messages();
    let result = messages.iter().find_map(|message| match message {
        ServerMessage::RoundResult {
            is_correct,
            timed_out,
            correct_door_index,
            ..
        } => Some((*is_correct, *timed_out, *correct_door_index)),
        _ => None,
    });
    let correct_door_index = state.round.unwrap().correct_door_index;
    assert_eq!(result, Some((false, true, correct_door_index)));

    // Nothing is counting down any more
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(timer_ticks(&setup.drain_messages()).is_empty());
}

#[tokio::test]
async fn test_selection_cancels_the_countdown() {
    let mut setup = DoorTestSetup::new(13).await;
    tokio::time::pause();

    setup.doors.start(Difficulty::Easy, Some(3)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5500)).await;
    assert_eq!(setup.doors.state().await.phase, DoorGamePhase::Choosing);

    let round = setup.doors.state().await.round.unwrap();
    let wrong_door = (round.correct_door_index + 1) % round.doors.len();
    let state = setup.doors.select_door(wrong_door).await.unwrap();
    assert_eq!(state.phase, DoorGamePhase::Incorrect);
    setup.drain_messages();

    // Late picks are ignored and no stale tick ever lands
    let state = setup.doors.select_door(round.correct_door_index).await.unwrap();
    assert_eq!(state.phase, DoorGamePhase::Incorrect);
    assert_eq!(state.score, 0);

    tokio::time::sleep(Duration::from_secs(15)).await;
    let state = setup.doors.state().await;
    assert_eq!(state.phase, DoorGamePhase::Incorrect);
    assert!(setup.drain_messages().is_empty());
}

#[tokio::test]
async fn test_next_round_arms_a_fresh_countdown() {
    let mut setup = DoorTestSetup::new(14).await;
    tokio::time::pause();

    setup.doors.start(Difficulty::Easy, Some(3)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5500)).await;

    let round = setup.doors.state().await.round.unwrap();
    let wrong_door = (round.correct_door_index + 2) % round.doors.len();
    setup.doors.select_door(wrong_door).await.unwrap();

    let state = setup.doors.next_round().await.unwrap();
    assert_eq!(state.phase, DoorGamePhase::Memorizing);
    assert_eq!(state.current_round, 1);
    assert_eq!(state.round.as_ref().unwrap().round_number, 2);
    setup.drain_messages();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(
        timer_ticks(&setup.drain_messages()),
        vec![(DoorGamePhase::Memorizing, 4)]
    );
}

#[tokio::test]
async fn test_next_round_before_a_result_is_rejected() {
    let setup = DoorTestSetup::new(15).await;

    setup.doors.start(Difficulty::Easy, Some(3)).await.unwrap();
    assert!(setup.doors.next_round().await.is_err());
    assert_eq!(setup.connections.connection_count(), 1);
}

#[tokio::test]
async fn test_restart_replaces_the_running_countdown() {
    let mut setup = DoorTestSetup::new(16).await;
    tokio::time::pause();

    setup.doors.start(Difficulty::Easy, Some(3)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(
        timer_ticks(&setup.drain_messages()),
        vec![(DoorGamePhase::Memorizing, 4), (DoorGamePhase::Memorizing, 3)]
    );

    let state = setup.doors.start(Difficulty::Easy, Some(3)).await.unwrap();
    assert_eq!(state.seconds_remaining, Some(5));
    setup.drain_messages();

    // The first game would have opened its doors 2.5s from here
    tokio::time::sleep(Duration::from_millis(3500)).await;
    let state = setup.doors.state().await;
    assert_eq!(state.phase, DoorGamePhase::Memorizing);
    assert_eq!(state.seconds_remaining, Some(2));

    let messages = setup.drain_messages();
    assert_eq!(
        timer_ticks(&messages),
        vec![
            (DoorGamePhase::Memorizing, 4),
            (DoorGamePhase::Memorizing, 3),
            (DoorGamePhase::Memorizing, 2),
        ]
    );
    assert!(
        !messages
            .iter()
            .any(|m| matches!(m, ServerMessage::ChoosingStarted { .. }))
    );
}

#[tokio::test]
async fn test_reset_while_choosing_starts_over() {
    let mut setup = DoorTestSetup::new(17).await;
    tokio::time::pause();

    setup.doors.start(Difficulty::Easy, Some(3)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(7500)).await;
    let state = setup.doors.state().await;
    assert_eq!(state.phase, DoorGamePhase::Choosing);
    assert_eq!(state.seconds_remaining, Some(8));

    let state = setup.doors.reset().await.unwrap();
    assert_eq!(state.phase, DoorGamePhase::Memorizing);
    assert_eq!(state.current_round, 0);
    setup.drain_messages();

    // Past the point where the old choosing timer would have expired
    tokio::time::sleep(Duration::from_millis(9500)).await;
    let state = setup.doors.state().await;
    assert_eq!(state.phase, DoorGamePhase::Choosing);
    assert_eq!(state.seconds_remaining, Some(6));

    let ticks = timer_ticks(&setup.drain_messages());
    assert_eq!(ticks.len(), 9);
    assert_eq!(ticks[0], (DoorGamePhase::Memorizing, 4));
    assert_eq!(ticks[4], (DoorGamePhase::Memorizing, 0));
    assert_eq!(ticks[8], (DoorGamePhase::Choosing, 6));
}
