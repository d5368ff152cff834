//! Shared helpers: strategies written as small shell scripts.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound for a whole CLI run.
pub const TIMEOUT: Duration = Duration::from_secs(20);

/// A 42-move game that fills the board without four in a row.
pub const DRAW_GAME: [usize; 42] = [
    4, 4, 1, 3, 6, 5, 6, 7, 5, 3, 3, 4, 4, 6, 6, 3, 3, 5, 4, 4, 2, 2, 3, 2, 6, 6, 1, 5, 1, 5, 5,
    7, 7, 7, 7, 1, 2, 1, 7, 1, 2, 2,
];

/// Write an executable `/bin/sh` script into `dir`.
pub fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).expect("write strategy script");
    let mut permissions = fs::metadata(&path).expect("stat script").permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).expect("chmod script");
    path
}

/// A strategy that answers every request with `reply`.
pub fn always(dir: &Path, name: &str, reply: &str) -> PathBuf {
    script(
        dir,
        name,
        &format!("while read -r line; do echo '{reply}'; done\n"),
    )
}

/// A strategy that sends `replies` in order and then repeats the last one.
pub fn sequence(dir: &Path, name: &str, replies: &[&str]) -> PathBuf {
    let (last, head) = replies.split_last().expect("at least one reply");
    if head.is_empty() {
        return always(dir, name, last);
    }
    let quoted: Vec<String> = head.iter().map(|r| format!("'{r}'")).collect();
    let body = format!(
        "for reply in {}; do\n  read -r line || exit 0\n  echo \"$reply\"\ndone\n\
         while read -r line; do echo '{last}'; done\n",
        quoted.join(" ")
    );
    script(dir, name, &body)
}

/// Strategies for both sides of [`DRAW_GAME`].
pub fn draw_players(dir: &Path) -> (PathBuf, PathBuf) {
    let moves: Vec<String> = DRAW_GAME.iter().map(|c| c.to_string()).collect();
    let firsts: Vec<&str> = moves.iter().step_by(2).map(String::as_str).collect();
    let seconds: Vec<&str> = moves.iter().skip(1).step_by(2).map(String::as_str).collect();
    (
        sequence(dir, "draw_first", &firsts),
        sequence(dir, "draw_second", &seconds),
    )
}

/// Path of the bundled random strategy binary.
pub fn random_strategy() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_random_strategy"))
}
