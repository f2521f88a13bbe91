//! Replay runs: explore a short maze, then retrace the frozen path.

use mazebot::app::commands::AppCommand;
use mazebot::app::events::AppEvent;
use mazebot::app::service::AppService;
use mazebot::config::RobotConfig;
use mazebot::control::MotorCommand;
use mazebot::fsm::RunPhase;
use mazebot::path::Move;

use super::mock_robot::{
    MockRobot, RecordingSink, script_left_turn, script_right_turn, script_straight,
};

type App = AppService<MockRobot>;

/// Explore `R S L` to the goal and leave the service waiting in
/// Replaying with a clean history.
fn explored() -> (App, MockRobot, RecordingSink) {
    let mut app = AppService::new(RobotConfig::default());
    let mut robot = MockRobot::new();
    let mut sink = RecordingSink::new();
    app.start(&mut robot, &mut sink);
    app.handle_command(AppCommand::StartExploration, &mut robot, &mut sink);

    script_right_turn(&mut robot);
    app.tick(&mut robot, &mut sink);
    script_straight(&mut robot);
    app.tick(&mut robot, &mut sink);
    script_left_turn(&mut robot);
    app.tick(&mut robot, &mut sink);
    robot.rest(0b11111);
    app.tick(&mut robot, &mut sink);

    assert_eq!(app.phase(), RunPhase::Replaying);
    assert_eq!(app.path_total(), Some(3));

    robot.rest(0b00100);
    robot.clear_history();
    sink.take();
    (app, robot, sink)
}

fn arm(app: &mut App, robot: &mut MockRobot, sink: &mut RecordingSink) {
    assert!(app.handle_command(AppCommand::StartReplay, robot, sink));
    assert!(app.is_replay_armed());
}

#[test]
fn waits_for_the_resume_signal() {
    let (mut app, mut robot, mut sink) = explored();

    for _ in 0..5 {
        app.tick(&mut robot, &mut sink);
    }

    assert_eq!(robot.reads, 0);
    assert!(robot.drives.is_empty());
    assert!(sink.events.is_empty());
    assert_eq!(app.cursor().index(), 0);
    assert_eq!(app.cursor().total(), 3);
}

#[test]
fn retraces_every_junction_then_stops_at_goal() {
    let (mut app, mut robot, mut sink) = explored();
    arm(&mut app, &mut robot, &mut sink);
    assert_eq!(robot.now, 1000);

    // Junction 0: right branch, recorded Right.
    robot.script(&[0b00111, 0b00111]);
    robot.on_spin(&[0b00001, 0b00010]);
    app.tick(&mut robot, &mut sink);

    // A quiet stretch: one steering read plus the junction check.
    let reads = robot.reads;
    app.tick(&mut robot, &mut sink);
    assert_eq!(robot.reads, reads + 2);

    // Junction 1: left branch, recorded Straight; crossed without turning.
    robot.script(&[0b11100, 0b11100]);
    app.tick(&mut robot, &mut sink);

    // Junction 2: T, recorded Left.
    robot.script(&[0b10100, 0b10100]);
    robot.on_spin(&[0b10000, 0b01000]);
    app.tick(&mut robot, &mut sink);

    robot.rest(0b11111);
    app.tick(&mut robot, &mut sink);

    assert_eq!(
        sink.events,
        vec![
            AppEvent::ReplayStarted { path_total: 3 },
            AppEvent::ReplayTurn {
                index: 0,
                mv: Move::Right
            },
            AppEvent::ReplayTurn {
                index: 1,
                mv: Move::Straight
            },
            AppEvent::ReplayTurn {
                index: 2,
                mv: Move::Left
            },
            AppEvent::ReplayComplete { junctions: 3 },
        ]
    );
    assert_eq!(
        robot.spins(),
        vec![MotorCommand::spin_right(30), MotorCommand::spin_left(30)]
    );
    assert!(robot.script_is_empty());
    assert_eq!(robot.last_drive(), Some(MotorCommand::STOP));
    assert!(!app.is_replay_armed());
    assert_eq!(app.phase(), RunPhase::Replaying);
    // The path survives the replay.
    assert_eq!(app.path().len(), 3);
}

#[test]
fn goal_ends_replay_early() {
    let (mut app, mut robot, mut sink) = explored();
    arm(&mut app, &mut robot, &mut sink);

    robot.script(&[0b00111, 0b00111]);
    robot.on_spin(&[0b00001, 0b00010]);
    app.tick(&mut robot, &mut sink);

    robot.rest(0b11111);
    app.tick(&mut robot, &mut sink);

    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::ReplayComplete { junctions: 1 })
    );
    assert!(!app.is_replay_armed());
}

#[test]
fn rerun_starts_from_the_first_junction() {
    let (mut app, mut robot, mut sink) = explored();
    arm(&mut app, &mut robot, &mut sink);

    robot.script(&[0b00111, 0b00111]);
    robot.on_spin(&[0b00001, 0b00010]);
    app.tick(&mut robot, &mut sink);
    assert_eq!(app.cursor().index(), 1);

    robot.rest(0b11111);
    app.tick(&mut robot, &mut sink);
    sink.take();

    robot.rest(0b00100);
    arm(&mut app, &mut robot, &mut sink);
    assert_eq!(app.cursor().index(), 0);
    assert_eq!(
        sink.events,
        vec![AppEvent::ReplayStarted { path_total: 3 }]
    );

    // The first junction is a right turn again.
    robot.script(&[0b00111, 0b00111]);
    robot.on_spin(&[0b00001, 0b00010]);
    app.tick(&mut robot, &mut sink);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::ReplayTurn {
            index: 0,
            mv: Move::Right
        })
    );
}

#[test]
fn resume_signal_ignored_while_a_run_is_in_progress() {
    let (mut app, mut robot, mut sink) = explored();
    arm(&mut app, &mut robot, &mut sink);

    robot.script(&[0b00111, 0b00111]);
    robot.on_spin(&[0b00001, 0b00010]);
    app.tick(&mut robot, &mut sink);
    assert_eq!(app.cursor().index(), 1);
    sink.take();
    let now = robot.now;

    assert!(!app.handle_command(AppCommand::StartReplay, &mut robot, &mut sink));
    assert_eq!(app.cursor().index(), 1);
    assert!(app.is_replay_armed());
    assert!(sink.events.is_empty());
    assert_eq!(robot.now, now);

    // The next junction is still driven from its own entry: Straight.
    robot.script(&[0b11100, 0b11100]);
    app.tick(&mut robot, &mut sink);
    assert_eq!(
        sink.events,
        vec![AppEvent::ReplayTurn {
            index: 1,
            mv: Move::Straight
        }]
    );
    assert_eq!(robot.spins(), vec![MotorCommand::spin_right(30)]);
}

#[test]
fn triggers_past_the_last_junction_are_ignored() {
    let (mut app, mut robot, mut sink) = explored();
    arm(&mut app, &mut robot, &mut sink);

    for (frames, pivot) in [
        (0b00111, Some([0b00001, 0b00010])),
        (0b11100, None),
        (0b10100, Some([0b10000, 0b01000])),
    ] {
        robot.script(&[frames, frames]);
        if let Some(p) = pivot {
            robot.on_spin(&p);
        }
        app.tick(&mut robot, &mut sink);
    }
    assert!(app.cursor().is_exhausted());
    let drives = robot.drives.len();

    // Another branch, but nothing left to replay: steering only.
    robot.script(&[0b00111, 0b00111]);
    app.tick(&mut robot, &mut sink);

    assert_eq!(robot.drives.len(), drives + 1);
    assert_eq!(robot.last_drive(), Some(MotorCommand::new(70, 40)));
    assert!(app.is_replay_armed());
}

#[test]
fn reset_discards_the_frozen_path() {
    let (mut app, mut robot, mut sink) = explored();

    assert!(app.handle_command(AppCommand::Reset, &mut robot, &mut sink));

    assert_eq!(app.phase(), RunPhase::Idle);
    assert!(app.path().is_empty());
    assert_eq!(app.path_total(), None);
    assert!(!app.handle_command(AppCommand::StartReplay, &mut robot, &mut sink));
}
