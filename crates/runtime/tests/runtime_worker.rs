//! Async runtime scenarios. Time is paused so the worker's sleeps resolve
//! instantly and in order.

use std::sync::Arc;
use std::time::Duration;

use game_core::{CommandError, EndReason, GameConfig, HoleId, Phase};
use runtime::{
    Event, InMemoryHighScoreRepo, RoundEvent, Runtime, RuntimeConfig, RuntimeError, Topic,
};
use tokio::sync::broadcast;

async fn next_round_end(rx: &mut broadcast::Receiver<Event>) -> RoundEvent {
    loop {
        match rx.recv().await {
            Ok(Event::Round(event @ RoundEvent::Ended { .. })) => return event,
            Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => panic!("event bus closed"),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn round_times_out_on_worker() {
    let repo = Arc::new(InMemoryHighScoreRepo::with_high_score(5));
    let runtime = Runtime::builder()
        .game_config(GameConfig::new().with_round_duration_secs(2))
        .repository(Arc::clone(&repo))
        .seed(11)
        .build()
        .await
        .expect("runtime should start");
    let handle = runtime.handle();
    let mut round = handle.subscribe(Topic::Round);

    handle.start().await.expect("start from idle");
    let state = handle.query_state().await.expect("query");
    assert_eq!(state.phase, Phase::Active);
    assert_eq!(state.high_score, 5);

    let ended = tokio::time::timeout(Duration::from_secs(10), next_round_end(&mut round))
        .await
        .expect("round should end");
    assert!(matches!(
        ended,
        RoundEvent::Ended {
            reason: EndReason::TimeUp,
            final_score: 0,
            high_score: 5,
            new_record: false,
        }
    ));

    let state = handle.query_state().await.expect("query");
    assert_eq!(state.phase, Phase::Ended);
    assert_eq!(state.remaining_time, 0);

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn clicks_resolve_against_current_board() {
    let config = GameConfig::new()
        .with_spawn_interval_ms(100, 100)
        .with_mole_visible_duration_ms(1_000);
    let runtime = Runtime::builder()
        .game_config(config)
        .seed(3)
        .build()
        .await
        .expect("runtime should start");
    let handle = runtime.handle();

    handle.start().await.expect("start");
    tokio::time::sleep(Duration::from_millis(150)).await;

    let state = handle.query_state().await.expect("query");
    let hole = state
        .moles
        .iter()
        .find(|mole| mole.visible)
        .map(|mole| mole.hole)
        .expect("one mole is up after the first spawn");

    let outcome = handle.hit_hole(hole).await.expect("hit");
    assert!(outcome.is_hit());
    assert_eq!(handle.query_state().await.expect("query").score, 1);

    let err = handle.hit_hole(HoleId(42)).await.expect_err("out of range");
    assert!(matches!(
        err.as_command(),
        Some(CommandError::HoleOutOfRange { .. })
    ));

    assert_eq!(handle.reset().await.expect("reset"), Phase::Active);
    let err = handle.hit_hole(hole).await.expect_err("idle");
    assert!(matches!(
        err.as_command(),
        Some(CommandError::InvalidPhase { .. })
    ));

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn clear_high_score_reaches_repository() {
    let repo = Arc::new(InMemoryHighScoreRepo::with_high_score(77));
    let runtime = Runtime::builder()
        .repository(Arc::clone(&repo))
        .build()
        .await
        .expect("runtime should start");
    let handle = runtime.handle();
    let mut high = handle.subscribe(Topic::HighScore);

    handle.clear_high_score().await.expect("clear");

    assert_eq!(high.recv().await.expect("event"), Event::HighScore(0));
    assert_eq!(repo.stored(), Some(0));

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn invalid_config_fails_build() {
    let config = RuntimeConfig {
        game_config: GameConfig::new().with_number_of_holes(0),
        ..RuntimeConfig::default()
    };
    let result = Runtime::builder().config(config).build().await;
    assert!(matches!(result, Err(RuntimeError::Config(_))));
}

#[tokio::test]
async fn handle_fails_after_shutdown() {
    let runtime = Runtime::builder().build().await.expect("runtime should start");
    let handle = runtime.handle();

    runtime.shutdown().await.expect("clean shutdown");

    let err = handle.start().await.expect_err("worker is gone");
    assert!(matches!(err, RuntimeError::CommandChannelClosed));
}
