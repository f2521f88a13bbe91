//! Exploration runs driven end to end through [`AppService`].
//!
//! Each junction is scripted with the helpers in `mock_robot`; the
//! assertions look at the event stream, the committed path and the
//! motor history.

use mazebot::app::commands::AppCommand;
use mazebot::app::events::AppEvent;
use mazebot::app::service::AppService;
use mazebot::config::RobotConfig;
use mazebot::control::MotorCommand;
use mazebot::error::{Error, ManeuverError, PathError};
use mazebot::fsm::RunPhase;
use mazebot::path::{Move, ReductionPolicy, SimplifierState};
use mazebot::sensors::Sensor;

use super::mock_robot::{
    MockRobot, RecordingSink, script_dead_end, script_left_turn, script_right_turn,
    script_straight,
};

type App = AppService<MockRobot>;

/// Service already in Exploring, with the start-up events discarded.
fn explorer(config: RobotConfig) -> (App, MockRobot, RecordingSink) {
    let mut app = AppService::new(config);
    let mut robot = MockRobot::new();
    let mut sink = RecordingSink::new();
    app.start(&mut robot, &mut sink);
    assert!(app.handle_command(AppCommand::StartExploration, &mut robot, &mut sink));
    assert_eq!(app.phase(), RunPhase::Exploring);
    sink.take();
    robot.clear_history();
    (app, robot, sink)
}

fn codes(app: &App) -> String {
    app.path().iter().map(|m| m.code()).collect()
}

// ── Straight runs ─────────────────────────────────────────────

#[test]
fn plain_line_records_nothing() {
    let (mut app, mut robot, mut sink) = explorer(RobotConfig::default());

    for _ in 0..3 {
        app.tick(&mut robot, &mut sink);
    }

    // One steering read plus one per decision rule, every tick.
    assert_eq!(robot.reads, 3 * 5);
    assert!(app.path().is_empty());
    assert!(sink.events.is_empty());
    assert_eq!(robot.last_drive(), Some(MotorCommand::new(70, 70)));
}

// ── Junctions and reduction ───────────────────────────────────

#[test]
fn dead_end_detour_reduces_and_goal_freezes_path() {
    let (mut app, mut robot, mut sink) = explorer(RobotConfig::default());

    script_right_turn(&mut robot);
    app.tick(&mut robot, &mut sink);
    script_left_turn(&mut robot);
    app.tick(&mut robot, &mut sink);
    script_dead_end(&mut robot);
    app.tick(&mut robot, &mut sink);
    script_left_turn(&mut robot);
    app.tick(&mut robot, &mut sink);
    assert!(robot.script_is_empty());
    assert_eq!(codes(&app), "RS");

    // Goal box: every sensor lit from here on.
    robot.rest(0b11111);
    app.tick(&mut robot, &mut sink);

    assert_eq!(
        sink.events,
        vec![
            AppEvent::MoveEmitted(Move::Right),
            AppEvent::MoveCommitted {
                index: 0,
                mv: Move::Right
            },
            AppEvent::MoveEmitted(Move::Left),
            AppEvent::MoveCommitted {
                index: 1,
                mv: Move::Left
            },
            AppEvent::MoveEmitted(Move::Back),
            AppEvent::Backtracked {
                index: 1,
                popped: Move::Left
            },
            AppEvent::MoveEmitted(Move::Left),
            AppEvent::MoveCommitted {
                index: 1,
                mv: Move::Straight
            },
            AppEvent::GoalReached { path_total: 2 },
            AppEvent::PhaseChanged {
                from: RunPhase::Exploring,
                to: RunPhase::Replaying
            },
        ]
    );
    assert_eq!(app.phase(), RunPhase::Replaying);
    assert_eq!(app.path_total(), Some(2));
    assert_eq!(app.raw_moves(), 4);
    assert_eq!(robot.last_drive(), Some(MotorCommand::STOP));
}

#[test]
fn each_turn_pivots_the_right_way() {
    let (mut app, mut robot, mut sink) = explorer(RobotConfig::default());

    script_right_turn(&mut robot);
    app.tick(&mut robot, &mut sink);
    script_straight(&mut robot);
    app.tick(&mut robot, &mut sink);
    script_left_turn(&mut robot);
    app.tick(&mut robot, &mut sink);
    script_dead_end(&mut robot);
    app.tick(&mut robot, &mut sink);

    // A straight junction never rotates; a dead end pivots right.
    assert_eq!(
        robot.spins(),
        vec![
            MotorCommand::spin_right(30),
            MotorCommand::spin_left(30),
            MotorCommand::spin_right(30),
        ]
    );
    assert_eq!(codes(&app), "RS");
    assert_eq!(
        app.simplifier_state(),
        SimplifierState::Reducing { a: Move::Left }
    );
}

#[test]
fn goal_with_open_window_freezes_what_is_committed() {
    let (mut app, mut robot, mut sink) = explorer(RobotConfig::default());

    script_right_turn(&mut robot);
    app.tick(&mut robot, &mut sink);
    script_dead_end(&mut robot);
    app.tick(&mut robot, &mut sink);
    robot.rest(0b11111);
    app.tick(&mut robot, &mut sink);

    assert_eq!(app.phase(), RunPhase::Replaying);
    assert_eq!(app.path_total(), Some(0));
    assert!(app.path().is_empty());
    assert!(sink
        .events
        .contains(&AppEvent::GoalReached { path_total: 0 }));
}

// ── Faults ────────────────────────────────────────────────────

#[test]
fn strict_policy_faults_on_unlisted_window() {
    let (mut app, mut robot, mut sink) = explorer(RobotConfig::default());

    script_right_turn(&mut robot);
    app.tick(&mut robot, &mut sink);
    script_dead_end(&mut robot);
    app.tick(&mut robot, &mut sink);
    sink.take();
    script_right_turn(&mut robot);
    app.tick(&mut robot, &mut sink);

    let fault = Error::Path(PathError::UnhandledReductionCase {
        a: Move::Right,
        m: Move::Right,
    });
    assert_eq!(
        sink.events,
        vec![
            AppEvent::MoveEmitted(Move::Right),
            AppEvent::Fault(fault),
            AppEvent::PhaseChanged {
                from: RunPhase::Exploring,
                to: RunPhase::Idle
            },
        ]
    );
    assert_eq!(app.last_fault(), Some(fault));
    assert_eq!(robot.last_drive(), Some(MotorCommand::STOP));
    // The window is left exactly as it was before the rejected move.
    assert!(app.path().is_empty());
    assert_eq!(
        app.simplifier_state(),
        SimplifierState::Reducing { a: Move::Right }
    );
}

#[test]
fn heading_sum_policy_resolves_unlisted_window() {
    let config = RobotConfig {
        reduction_policy: ReductionPolicy::HeadingSum,
        ..RobotConfig::default()
    };
    let (mut app, mut robot, mut sink) = explorer(config);

    script_right_turn(&mut robot);
    app.tick(&mut robot, &mut sink);
    script_dead_end(&mut robot);
    app.tick(&mut robot, &mut sink);
    script_right_turn(&mut robot);
    app.tick(&mut robot, &mut sink);

    assert_eq!(app.phase(), RunPhase::Exploring);
    assert_eq!(codes(&app), "S");
    assert_eq!(app.last_fault(), None);
}

#[test]
fn full_path_buffer_faults() {
    let (mut app, mut robot, mut sink) = explorer(RobotConfig::default());
    let capacity = app.path().capacity();

    for _ in 0..capacity {
        script_right_turn(&mut robot);
        app.tick(&mut robot, &mut sink);
    }
    assert_eq!(app.path().len(), capacity);
    assert_eq!(app.phase(), RunPhase::Exploring);

    script_right_turn(&mut robot);
    app.tick(&mut robot, &mut sink);

    assert_eq!(
        app.last_fault(),
        Some(Error::Path(PathError::Exhausted { capacity }))
    );
    assert_eq!(app.phase(), RunPhase::Idle);
    assert_eq!(app.path().len(), capacity);
}

#[test]
fn pivot_timeout_stops_and_keeps_the_path() {
    let config = RobotConfig {
        wait_timeout_ms: Some(50),
        ..RobotConfig::default()
    };
    let (mut app, mut robot, mut sink) = explorer(config);

    script_right_turn(&mut robot);
    app.tick(&mut robot, &mut sink);

    // The line vanishes and the dead-end pivot never finds it again.
    robot.rest(0b00000);
    app.tick(&mut robot, &mut sink);

    assert_eq!(
        app.last_fault(),
        Some(Error::Maneuver(ManeuverError::Timeout {
            waiting_for: Sensor::Right,
            elapsed_ms: 50
        }))
    );
    assert!(matches!(sink.events.last(), Some(AppEvent::PhaseChanged {
        to: RunPhase::Idle,
        ..
    })));
    assert_eq!(app.phase(), RunPhase::Idle);
    assert_eq!(robot.last_drive(), Some(MotorCommand::STOP));
    assert_eq!(codes(&app), "R");

    // Idle does nothing, and a new run starts clean.
    robot.clear_history();
    app.tick(&mut robot, &mut sink);
    assert!(robot.drives.is_empty());
    assert!(app.handle_command(AppCommand::StartExploration, &mut robot, &mut sink));
    assert!(app.path().is_empty());
    assert_eq!(app.last_fault(), None);
}

#[test]
fn reset_mid_run_forgets_the_path() {
    let (mut app, mut robot, mut sink) = explorer(RobotConfig::default());

    script_right_turn(&mut robot);
    app.tick(&mut robot, &mut sink);
    sink.take();

    assert!(app.handle_command(AppCommand::Reset, &mut robot, &mut sink));
    assert_eq!(app.phase(), RunPhase::Idle);
    assert!(app.path().is_empty());
    assert_eq!(app.raw_moves(), 0);
    assert_eq!(
        sink.events,
        vec![AppEvent::PhaseChanged {
            from: RunPhase::Exploring,
            to: RunPhase::Idle
        }]
    );
}
