use super::engine::normalize_task_name;
use super::*;

const T0_MS: i64 = 1_700_000_000_000;

fn started_engine(total_seconds: i64) -> TimerEngine {
    let mut engine = TimerEngine::new();
    engine
        .start(TimerKind::Focus, Some("deep work".into()), total_seconds, T0_MS)
        .expect("start focus timer");
    engine
}

#[test]
fn start_moves_idle_to_running_with_full_countdown() {
    let engine = started_engine(1500);
    let snapshot = engine.snapshot_at(T0_MS);

    assert_eq!(snapshot.status, TimerStatus::Running);
    assert_eq!(snapshot.kind, TimerKind::Focus);
    assert_eq!(snapshot.task_name.as_deref(), Some("deep work"));
    assert_eq!(snapshot.total_seconds, 1500);
    assert_eq!(snapshot.remaining_seconds, 1500);
    assert_eq!(snapshot.started_at, Some(T0_MS / 1000));
    assert_eq!(snapshot.ends_at_ms, Some(T0_MS + 1500 * 1000));
}

#[test]
fn start_rejects_running_and_paused_states() {
    let mut engine = started_engine(1500);

    let err = engine
        .start(TimerKind::Focus, None, 1500, T0_MS + 1000)
        .expect_err("start while running must fail");
    assert!(err.starts_with("TIMER_INVALID_STATE:"), "{err}");

    engine.pause(T0_MS + 1000).expect("pause");
    let err = engine
        .start(TimerKind::Focus, None, 1500, T0_MS + 2000)
        .expect_err("start while paused must fail");
    assert!(err.starts_with("TIMER_INVALID_STATE:"), "{err}");
}

#[test]
fn start_validates_duration_bounds() {
    let mut engine = TimerEngine::new();

    let err = engine
        .start(TimerKind::Focus, None, 0, T0_MS)
        .expect_err("zero duration must fail");
    assert!(err.starts_with("SEC_INVALID_INPUT:"), "{err}");

    let err = engine
        .start(TimerKind::Focus, None, 13 * 60 * 60, T0_MS)
        .expect_err("13h duration must fail");
    assert!(err.starts_with("SEC_INVALID_INPUT:"), "{err}");
}

#[test]
fn pause_freezes_remaining_and_resume_extends_deadline() {
    let mut engine = started_engine(1500);

    let paused = engine.pause(T0_MS + 60_000).expect("pause after 1 minute");
    assert_eq!(paused.status, TimerStatus::Paused);
    assert_eq!(paused.remaining_seconds, 1440);
    assert_eq!(paused.ends_at_ms, None);

    // Wall-clock time passing while paused does not burn the countdown.
    let later = engine.snapshot_at(T0_MS + 600_000);
    assert_eq!(later.remaining_seconds, 1440);

    let resumed = engine.resume(T0_MS + 600_000).expect("resume");
    assert_eq!(resumed.status, TimerStatus::Running);
    assert_eq!(resumed.remaining_seconds, 1440);
    assert_eq!(resumed.ends_at_ms, Some(T0_MS + 600_000 + 1440 * 1000));
}

#[test]
fn pause_requires_running_and_resume_requires_paused() {
    let mut engine = TimerEngine::new();

    let err = engine.pause(T0_MS).expect_err("pause while idle must fail");
    assert!(err.starts_with("TIMER_INVALID_STATE:"), "{err}");

    let err = engine
        .resume(T0_MS)
        .expect_err("resume while idle must fail");
    assert!(err.starts_with("TIMER_INVALID_STATE:"), "{err}");
}

#[test]
fn focus_pauses_count_as_interruptions_break_pauses_do_not() {
    let mut engine = started_engine(1500);
    engine.pause(T0_MS + 1000).expect("pause");
    engine.resume(T0_MS + 2000).expect("resume");
    engine.pause(T0_MS + 3000).expect("pause again");
    assert_eq!(engine.snapshot_at(T0_MS + 3000).interruptions, 2);

    let mut engine = TimerEngine::new();
    engine
        .start(TimerKind::ShortBreak, None, 300, T0_MS)
        .expect("start break");
    engine.pause(T0_MS + 1000).expect("pause break");
    assert_eq!(engine.snapshot_at(T0_MS + 1000).interruptions, 0);
}

#[test]
fn refresh_completes_at_the_deadline_and_stages_one_completion() {
    let mut engine = started_engine(1500);
    engine.pause(T0_MS + 1000).expect("pause");
    engine.resume(T0_MS + 2000).expect("resume");

    // One second short of the (shifted) deadline: still running.
    engine.refresh(T0_MS + 2000 + 1499 * 1000 - 1000);
    assert_eq!(engine.status(), TimerStatus::Running);
    assert!(engine.take_completion().is_none());

    engine.refresh(T0_MS + 2000 + 1499 * 1000);
    assert_eq!(engine.status(), TimerStatus::Completed);
    assert_eq!(engine.snapshot_at(T0_MS).remaining_seconds, 0);

    let payload = engine.take_completion().expect("completion payload");
    assert_eq!(payload.kind, TimerKind::Focus);
    assert_eq!(payload.task_name.as_deref(), Some("deep work"));
    assert_eq!(payload.total_seconds, 1500);
    assert_eq!(payload.interruptions, 1);
    assert_eq!(payload.started_at, T0_MS / 1000);
    assert_eq!(payload.ended_at, (T0_MS + 2000 + 1499 * 1000) / 1000);

    // Consumed exactly once.
    assert!(engine.take_completion().is_none());
    engine.refresh(T0_MS + 10_000_000);
    assert!(engine.take_completion().is_none());
}

#[test]
fn refresh_catches_up_after_a_long_sleep() {
    let mut engine = started_engine(1500);

    // Machine slept well past the deadline; a single refresh completes it.
    engine.refresh(T0_MS + 3 * 60 * 60 * 1000);
    assert_eq!(engine.status(), TimerStatus::Completed);
    let payload = engine.take_completion().expect("completion payload");
    assert_eq!(payload.ended_at, (T0_MS + 1500 * 1000) / 1000);
}

#[test]
fn reset_returns_to_idle_from_any_state() {
    let mut engine = started_engine(1500);
    let snapshot = engine.reset();
    assert_eq!(snapshot.status, TimerStatus::Idle);
    assert_eq!(snapshot.remaining_seconds, 0);
    assert_eq!(snapshot.task_name, None);

    // Reset after completion also drops the staged event.
    let mut engine = started_engine(10);
    engine.refresh(T0_MS + 10_000);
    engine.reset();
    assert!(engine.take_completion().is_none());

    // Start is legal again after reset.
    engine
        .start(TimerKind::LongBreak, None, 900, T0_MS)
        .expect("start after reset");
}

#[test]
fn start_is_legal_from_completed() {
    let mut engine = started_engine(10);
    engine.refresh(T0_MS + 10_000);
    let _ = engine.take_completion();

    let snapshot = engine
        .start(TimerKind::ShortBreak, None, 300, T0_MS + 11_000)
        .expect("start break after completion");
    assert_eq!(snapshot.status, TimerStatus::Running);
    assert_eq!(snapshot.kind, TimerKind::ShortBreak);
    assert_eq!(snapshot.interruptions, 0);
}

#[test]
fn task_name_is_trimmed_bounded_and_optional() {
    assert_eq!(normalize_task_name(None).expect("none"), None);
    assert_eq!(normalize_task_name(Some("   ".into())).expect("blank"), None);
    assert_eq!(
        normalize_task_name(Some("  write report  ".into())).expect("trimmed"),
        Some("write report".to_string())
    );

    let exactly_max: String = "x".repeat(MAX_TASK_NAME_CHARS);
    assert_eq!(
        normalize_task_name(Some(exactly_max.clone())).expect("max length ok"),
        Some(exactly_max)
    );

    let too_long: String = "x".repeat(MAX_TASK_NAME_CHARS + 1);
    let err = normalize_task_name(Some(too_long)).expect_err("over max must fail");
    assert!(err.starts_with("SEC_INVALID_INPUT:"), "{err}");

    // Multi-byte characters count as characters, not bytes.
    let kanji: String = "字".repeat(MAX_TASK_NAME_CHARS);
    assert!(normalize_task_name(Some(kanji)).is_ok());
}

#[test]
fn timer_kind_parse_round_trips() {
    for kind in [TimerKind::Focus, TimerKind::ShortBreak, TimerKind::LongBreak] {
        assert_eq!(TimerKind::parse(kind.as_str()).expect("parse"), kind);
    }
    assert!(TimerKind::parse("nap").is_err());
}
