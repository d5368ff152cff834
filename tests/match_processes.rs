//! Matches between real child processes.

#![cfg(unix)]

mod common;

use std::fs;
use std::time::Duration;

use four_in_a_row::error::{MatchError, StrategyError};
use four_in_a_row::game::{rules, Board, Player};
use four_in_a_row::referee::{Match, Outcome};
use four_in_a_row::strategy::{ProcessOptions, ProcessStrategy, Strategy};

fn start(path: &std::path::Path) -> ProcessStrategy {
    ProcessStrategy::start(path, ProcessOptions::default()).expect("start strategy")
}

#[test]
fn stacked_column_wins_on_seventh_move() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = start(&common::always(dir.path(), "ones", "1"));
    let mut second = start(&common::always(dir.path(), "twos", "2"));

    let report = Match::new(&mut first, &mut second).play().unwrap();

    assert_eq!(report.outcome, Outcome::Winner(Player::First));
    assert_eq!(report.moves.len(), 7);
    assert_eq!(report.board.column_height(1), 4);
    assert_eq!(report.board.column_height(2), 3);
}

#[test]
fn out_of_range_reply_is_asked_again() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = start(&common::sequence(dir.path(), "picky", &["9", "4", "1"]));
    let mut second = start(&common::sequence(dir.path(), "other", &["2", "3"]));

    let report = Match::new(&mut first, &mut second).play().unwrap();

    assert_eq!(report.rejected, 1);
    assert_eq!(report.moves[0].player, Player::First);
    assert_eq!(report.moves[0].column, 4);
    assert_eq!(report.moves[1].player, Player::Second);
    assert_eq!(report.outcome, Outcome::Winner(Player::First));
}

#[test]
fn full_game_without_line_is_draw() {
    let dir = tempfile::tempdir().unwrap();
    let (first_path, second_path) = common::draw_players(dir.path());
    let mut first = start(&first_path);
    let mut second = start(&second_path);

    let report = Match::new(&mut first, &mut second).play().unwrap();

    assert_eq!(report.outcome, Outcome::Draw);
    assert_eq!(report.moves.len(), 42);
    assert!(rules::is_draw(&report.board));
}

#[test]
fn strategy_receives_protocol_lines() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("requests.log");
    let recorder = common::script(
        dir.path(),
        "recorder",
        &format!(
            "while read -r line; do echo \"$line\" >> '{}'; echo 1; done\n",
            log.display()
        ),
    );
    let mut first = start(&recorder);
    let mut second = start(&common::always(dir.path(), "twos", "2"));

    Match::new(&mut first, &mut second).play().unwrap();

    let logged = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = logged.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], format!("@ {}", ".".repeat(42)));
    assert_eq!(lines[1], format!("@ {}@O.....", ".".repeat(35)));
}

#[test]
fn malformed_replies_forfeit() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = start(&common::always(dir.path(), "chatty", "left"));
    let mut second = start(&common::always(dir.path(), "ones", "1"));

    let report = Match::new(&mut first, &mut second)
        .max_illegal_moves(Some(3))
        .play()
        .unwrap();

    assert_eq!(report.outcome, Outcome::Forfeit(Player::First));
    assert_eq!(report.rejected, 3);
    assert!(report.moves.is_empty());
}

#[test]
fn exiting_strategy_aborts_match() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = start(&common::always(dir.path(), "ones", "1"));
    let mut second = start(&common::script(
        dir.path(),
        "quitter",
        "echo 'giving up' >&2\nexit 3\n",
    ));

    let err = Match::new(&mut first, &mut second).play().unwrap_err();

    match err {
        MatchError::Strategy { player, source } => {
            assert_eq!(player, Player::Second);
            match source {
                StrategyError::StreamClosed { stderr, .. } => {
                    assert!(stderr.contains("giving up"), "stderr was {stderr:?}");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}

#[test]
fn stalled_strategy_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let options = ProcessOptions {
        read_timeout: Some(Duration::from_millis(200)),
    };
    let mut first = ProcessStrategy::start(
        common::script(dir.path(), "sleeper", "while read -r line; do sleep 5; done\n"),
        options,
    )
    .unwrap();

    let err = first.request_move(Player::First, &Board::new()).unwrap_err();

    assert!(matches!(err, StrategyError::Timeout { .. }));
    assert!(err.is_fatal());
}

#[test]
fn missing_executable_fails_to_launch() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProcessStrategy::start(dir.path().join("absent"), ProcessOptions::default())
        .err()
        .expect("launch should fail");
    assert!(matches!(err, StrategyError::Launch { .. }));
}

#[test]
fn non_executable_file_fails_to_launch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.txt");
    fs::write(&path, "not a program\n").unwrap();
    let err = ProcessStrategy::start(&path, ProcessOptions::default())
        .err()
        .expect("launch should fail");
    assert!(matches!(err, StrategyError::Launch { .. }));
}

#[cfg(target_os = "linux")]
#[test]
fn processes_are_reaped_when_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let first = start(&common::always(dir.path(), "ones", "1"));
    let second = start(&common::always(dir.path(), "twos", "2"));
    let pids = [first.id(), second.id()];
    assert!(pids
        .iter()
        .all(|pid| std::path::Path::new(&format!("/proc/{pid}")).exists()));

    drop(first);
    drop(second);

    for pid in pids {
        assert!(!std::path::Path::new(&format!("/proc/{pid}")).exists());
    }
}

#[test]
fn random_strategies_finish_a_game() {
    let mut first = start(&common::random_strategy());
    let mut second = start(&common::random_strategy());

    let report = Match::new(&mut first, &mut second)
        .max_illegal_moves(Some(1))
        .play()
        .unwrap();

    assert_eq!(report.rejected, 0);
    assert!(report.moves.len() >= 7 && report.moves.len() <= 42);
    assert!(matches!(report.outcome, Outcome::Winner(_) | Outcome::Draw));
    if report.outcome == Outcome::Draw {
        assert!(rules::is_draw(&report.board));
    } else {
        let last = report.moves.last().unwrap();
        assert!(rules::is_four_in_a_row(last.square, &report.board));
    }
}
