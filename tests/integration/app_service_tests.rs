//! Integration tests for the button → command → AppService pipeline.
//!
//! These run on the host (x86_64) and verify phase gating, start delays
//! and reset handling without any real hardware.

use mazebot::app::commands::AppCommand;
use mazebot::app::events::AppEvent;
use mazebot::app::service::AppService;
use mazebot::config::RobotConfig;
use mazebot::control::MotorCommand;
use mazebot::events::{Event, EventQueue};
use mazebot::fsm::RunPhase;

use super::mock_robot::{MockRobot, RecordingSink, script_right_turn};

fn make_app() -> (AppService<MockRobot>, MockRobot, RecordingSink) {
    let mut app = AppService::new(RobotConfig::default());
    let mut robot = MockRobot::new();
    let mut sink = RecordingSink::new();
    app.start(&mut robot, &mut sink);
    (app, robot, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn starts_idle_with_motors_stopped() {
    let (app, robot, sink) = make_app();

    assert_eq!(app.phase(), RunPhase::Idle);
    assert_eq!(sink.events, vec![AppEvent::Started(RunPhase::Idle)]);
    assert_eq!(robot.drives, vec![MotorCommand::STOP]);
    assert!(app.path().is_empty());
    assert_eq!(app.path_total(), None);
}

// ── Start delays ──────────────────────────────────────────────

#[test]
fn exploration_waits_before_the_first_tick() {
    let (mut app, mut robot, mut sink) = make_app();

    assert!(app.handle_command(AppCommand::StartExploration, &mut robot, &mut sink));

    assert_eq!(robot.now, u64::from(app.config().start_delay_ms));
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::PhaseChanged {
            from: RunPhase::Idle,
            to: RunPhase::Exploring
        })
    );
}

#[test]
fn line_follow_starts_immediately_and_records_nothing() {
    let (mut app, mut robot, mut sink) = make_app();

    assert!(app.handle_command(AppCommand::StartLineFollow, &mut robot, &mut sink));
    assert_eq!(robot.now, 0);

    // A right branch means nothing to the plain follower.
    script_right_turn(&mut robot);
    for _ in 0..10 {
        app.tick(&mut robot, &mut sink);
    }

    assert_eq!(app.phase(), RunPhase::LineFollowing);
    assert!(app.path().is_empty());
    assert_eq!(app.raw_moves(), 0);
    assert!(robot.spins().is_empty());
    // Right-only pattern: the hardest correction in the follow table.
    assert_eq!(robot.last_drive(), Some(MotorCommand::new(80, 0)));
}

// ── Phase gating ──────────────────────────────────────────────

#[test]
fn commands_outside_their_phase_are_ignored() {
    let (mut app, mut robot, mut sink) = make_app();
    sink.take();

    assert!(!app.handle_command(AppCommand::StartReplay, &mut robot, &mut sink));

    app.handle_command(AppCommand::StartExploration, &mut robot, &mut sink);
    sink.take();
    let now = robot.now;

    assert!(!app.handle_command(AppCommand::StartExploration, &mut robot, &mut sink));
    assert!(!app.handle_command(AppCommand::StartLineFollow, &mut robot, &mut sink));
    assert!(!app.handle_command(AppCommand::StartReplay, &mut robot, &mut sink));

    assert_eq!(app.phase(), RunPhase::Exploring);
    assert!(sink.events.is_empty());
    assert_eq!(robot.now, now);
}

#[test]
fn reset_from_line_follow_returns_to_idle() {
    let (mut app, mut robot, mut sink) = make_app();
    app.handle_command(AppCommand::StartLineFollow, &mut robot, &mut sink);
    app.tick(&mut robot, &mut sink);

    assert!(app.handle_command(AppCommand::Reset, &mut robot, &mut sink));

    assert_eq!(app.phase(), RunPhase::Idle);
    assert_eq!(robot.last_drive(), Some(MotorCommand::STOP));
}

#[test]
fn reset_in_idle_is_accepted_quietly() {
    let (mut app, mut robot, mut sink) = make_app();
    sink.take();

    assert!(app.handle_command(AppCommand::Reset, &mut robot, &mut sink));
    assert_eq!(app.phase(), RunPhase::Idle);
    assert!(sink.events.is_empty());
}

// ── Button events ─────────────────────────────────────────────

fn dispatch(
    queue: &EventQueue,
    app: &mut AppService<MockRobot>,
    robot: &mut MockRobot,
    sink: &mut RecordingSink,
) {
    while let Some(event) = queue.pop() {
        if let Some(cmd) = AppCommand::from_event(event, app.phase()) {
            app.handle_command(cmd, robot, sink);
        }
    }
}

#[test]
fn button_events_map_through_the_queue() {
    let (mut app, mut robot, mut sink) = make_app();
    let queue = EventQueue::new();

    // Line button is meaningless while exploring.
    assert!(queue.push(Event::MazeButton));
    assert!(queue.push(Event::LineButton));
    dispatch(&queue, &mut app, &mut robot, &mut sink);
    assert_eq!(app.phase(), RunPhase::Exploring);

    script_right_turn(&mut robot);
    app.tick(&mut robot, &mut sink);
    assert_eq!(app.path().len(), 1);

    assert!(queue.push(Event::ResetButton));
    assert!(queue.push(Event::LineButton));
    dispatch(&queue, &mut app, &mut robot, &mut sink);

    assert_eq!(app.phase(), RunPhase::LineFollowing);
    assert!(app.path().is_empty());
    assert!(queue.is_empty());
}

#[test]
fn tick_count_advances_in_every_phase() {
    let (mut app, mut robot, mut sink) = make_app();
    app.tick(&mut robot, &mut sink);
    app.handle_command(AppCommand::StartLineFollow, &mut robot, &mut sink);
    app.tick(&mut robot, &mut sink);
    assert_eq!(app.tick_count(), 2);
}
