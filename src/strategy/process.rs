use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::Strategy;
use crate::error::StrategyError;
use crate::game::{Board, Player};
use crate::protocol;

/// Number of trailing stderr lines kept for error reports.
const STDERR_TAIL_LINES: usize = 20;

/// How long to wait for the stderr drain to reach EOF once the child is gone.
/// Only a grandchild still holding the pipe open can make it take longer.
const STDERR_SETTLE: Duration = Duration::from_secs(2);

type StderrTail = Arc<Mutex<VecDeque<String>>>;

/// Options for launching a strategy process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Give up on a reply after this long. `None` blocks until the strategy
    /// answers or closes its output.
    pub read_timeout: Option<Duration>,
}

/// An external strategy program running as a child process.
///
/// The request goes to the child's stdin; replies are read from its stdout by
/// a background thread and handed over through a channel, which is what makes
/// the optional read timeout possible. Stderr is drained continuously so a
/// chatty strategy never blocks on a full pipe; the last lines are attached
/// to [`StrategyError::StreamClosed`].
///
/// The child is killed and reaped on [`ProcessStrategy::terminate`] or when
/// the value is dropped, whichever comes first.
pub struct ProcessStrategy {
    name: String,
    child: Child,
    stdin: Option<ChildStdin>,
    lines: Receiver<io::Result<String>>,
    stderr_tail: StderrTail,
    stderr_drain: Option<JoinHandle<()>>,
    read_timeout: Option<Duration>,
    terminated: bool,
}

impl ProcessStrategy {
    /// Launch the executable at `path` with piped standard streams.
    pub fn start(path: impl AsRef<Path>, options: ProcessOptions) -> Result<Self, StrategyError> {
        let path = path.as_ref();
        let name = path.display().to_string();

        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| StrategyError::Launch {
                path: path.to_path_buf(),
                source,
            })?;

        let stdin = child.stdin.take();
        let stderr_tail = StderrTail::default();
        let readers = match (child.stdout.take(), child.stderr.take()) {
            (Some(stdout), Some(stderr)) => spawn_stdout_reader(&name, stdout).and_then(|lines| {
                spawn_stderr_drain(&name, stderr, Arc::clone(&stderr_tail))
                    .map(|drain| (lines, drain))
            }),
            _ => Err(io::Error::other("child output was not captured")),
        };
        let (lines, stderr_drain) = match readers {
            Ok(readers) => readers,
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(StrategyError::Launch {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        info!(strategy = %name, pid = child.id(), "strategy started");

        Ok(ProcessStrategy {
            name,
            child,
            stdin,
            lines,
            stderr_tail,
            stderr_drain: Some(stderr_drain),
            read_timeout: options.read_timeout,
            terminated: false,
        })
    }

    /// OS process id of the strategy.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Kill the strategy, reap it and close its pipes. Safe to call more than
    /// once.
    pub fn terminate(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        self.stdin.take();

        match self.child.try_wait() {
            Ok(Some(status)) => {
                debug!(strategy = %self.name, %status, "strategy already exited");
            }
            _ => {
                if let Err(e) = self.child.kill() {
                    warn!(strategy = %self.name, error = %e, "failed to kill strategy");
                }
            }
        }
        if let Err(e) = self.child.wait() {
            warn!(strategy = %self.name, error = %e, "failed to reap strategy");
        }
        debug!(strategy = %self.name, "strategy terminated");
    }

    fn send(&mut self, request: &str) -> Result<(), StrategyError> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(self.stream_closed());
        };
        let written = stdin
            .write_all(request.as_bytes())
            .and_then(|()| stdin.flush());
        match written {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Err(self.stream_closed()),
            Err(source) => Err(StrategyError::Io {
                name: self.name.clone(),
                source,
            }),
        }
    }

    fn receive(&mut self) -> Result<String, StrategyError> {
        let received = match self.read_timeout {
            None => self
                .lines
                .recv()
                .map_err(|_| RecvTimeoutError::Disconnected),
            Some(timeout) => self.lines.recv_timeout(timeout),
        };

        match received {
            Ok(Ok(line)) => Ok(line),
            Ok(Err(source)) => Err(StrategyError::Io {
                name: self.name.clone(),
                source,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(self.stream_closed()),
            Err(RecvTimeoutError::Timeout) => {
                self.terminate();
                Err(StrategyError::Timeout {
                    name: self.name.clone(),
                    timeout: self.read_timeout.unwrap_or_default(),
                })
            }
        }
    }

    /// Wait for the stderr drain to pick up everything the reaped child wrote.
    fn settle_stderr(&mut self) {
        let Some(drain) = self.stderr_drain.take() else {
            return;
        };
        let deadline = Instant::now() + STDERR_SETTLE;
        while !drain.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        if drain.is_finished() {
            let _ = drain.join();
        } else {
            debug!(strategy = %self.name, "stderr still open after exit");
        }
    }

    fn stream_closed(&mut self) -> StrategyError {
        self.terminate();
        self.settle_stderr();
        let stderr = match self.stderr_tail.lock() {
            Ok(tail) => tail.iter().map(String::as_str).collect::<Vec<_>>().join("\n"),
            Err(_) => String::new(),
        };
        StrategyError::StreamClosed {
            name: self.name.clone(),
            stderr,
        }
    }
}

impl Strategy for ProcessStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn request_move(&mut self, player: Player, board: &Board) -> Result<i64, StrategyError> {
        let request = protocol::encode_request(player, board);
        debug!(strategy = %self.name, request = request.trim_end(), "sending request");
        self.send(&request)?;

        let reply = self.receive()?;
        debug!(strategy = %self.name, reply = reply.trim_end(), "received reply");
        protocol::decode_reply(&reply).ok_or_else(|| StrategyError::MalformedReply {
            name: self.name.clone(),
            reply,
        })
    }
}

impl Drop for ProcessStrategy {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Forward every line of `stdout` over a channel until EOF. Dropping the
/// sender on EOF is what signals a closed stream to the receiver.
fn spawn_stdout_reader(
    name: &str,
    stdout: ChildStdout,
) -> io::Result<Receiver<io::Result<String>>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name(format!("{name} stdout"))
        .spawn(move || {
            let mut reader = BufReader::new(stdout);
            loop {
                let mut buf = Vec::new();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf).into_owned();
                        if tx.send(Ok(line)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}

/// Read `stderr` until EOF, logging each line and keeping the most recent
/// ones in `tail`.
fn spawn_stderr_drain(
    name: &str,
    stderr: ChildStderr,
    tail: StderrTail,
) -> io::Result<JoinHandle<()>> {
    let strategy = name.to_string();
    thread::Builder::new()
        .name(format!("{name} stderr"))
        .spawn(move || {
            let reader = BufReader::new(stderr);
            for chunk in reader.split(b'\n') {
                let Ok(bytes) = chunk else { break };
                let line = String::from_utf8_lossy(&bytes).trim_end().to_string();
                debug!(strategy = %strategy, stderr = %line, "strategy stderr");
                if let Ok(mut tail) = tail.lock() {
                    if tail.len() == STDERR_TAIL_LINES {
                        tail.pop_front();
                    }
                    tail.push_back(line);
                }
            }
        })
}
