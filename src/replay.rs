//! Event-log replay through the turn-sync core.
//!
//! A log is JSON lines, one [`ClientEvent`] per line. Blank lines and lines
//! starting with `#` are skipped. Replaying folds the events through
//! [`TurnSync::apply`] exactly as a single-writer runtime would, recording
//! each step.

use crate::dead_state::is_dead_state;
use crate::{ClientEvent, CommandIntent, GameSnapshot, TurnSync};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Failure to read or parse an event log.
#[derive(Debug, Clone, Display, Error)]
#[display("Replay error at line {}: {}", line_number, message)]
pub struct ReplayError {
    /// Error message.
    pub message: String,
    /// 1-based line in the log, 0 when the file could not be read.
    pub line_number: usize,
}

impl ReplayError {
    /// Creates a replay error for a log line.
    pub fn new(message: impl Into<String>, line_number: usize) -> Self {
        Self {
            message: message.into(),
            line_number,
        }
    }
}

/// One applied event.
#[derive(Debug, Clone, Getters, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayStep {
    index: usize,
    #[getter(skip)]
    event: &'static str,
    command: CommandIntent,
    dead: bool,
    snapshot: GameSnapshot,
}

impl ReplayStep {
    /// Kind of the applied event.
    pub fn event(&self) -> &'static str {
        self.event
    }
}

/// The outcome of replaying a log.
#[derive(Debug, Clone, Getters, Serialize)]
pub struct Replay {
    steps: Vec<ReplayStep>,
    final_snapshot: GameSnapshot,
}

impl Replay {
    /// Folds `events` through `sync`, starting from `initial`.
    #[instrument(skip_all)]
    pub fn run(
        sync: &TurnSync,
        initial: GameSnapshot,
        events: impl IntoIterator<Item = ClientEvent>,
    ) -> Self {
        let mut snapshot = initial;
        let mut steps = Vec::new();

        for (index, event) in events.into_iter().enumerate() {
            let (next, command) = sync.apply(&snapshot, &event).into_parts();
            let dead = is_dead_state(&next);
            debug!(index, event = event.kind(), command = %command, dead, "Replayed event");

            steps.push(ReplayStep {
                index,
                event: event.kind(),
                command,
                dead,
                snapshot: next.clone(),
            });
            snapshot = next;
        }

        info!(steps = steps.len(), "Replay complete");
        Self {
            steps,
            final_snapshot: snapshot,
        }
    }

    /// Indices of steps that ended in a dead snapshot.
    pub fn dead_steps(&self) -> Vec<usize> {
        self.steps.iter().filter(|s| s.dead).map(|s| s.index).collect()
    }

    /// Whether the replay ended in a dead snapshot.
    pub fn ends_dead(&self) -> bool {
        self.steps.last().is_some_and(|s| s.dead)
    }
}

/// Parses a JSON-lines event log.
#[instrument(skip(text))]
pub fn parse_event_log(text: &str) -> Result<Vec<ClientEvent>, ReplayError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| {
                warn!(line = i + 1, error = %e, "Unparseable event");
                ReplayError::new(format!("Invalid event: {}", e), i + 1)
            })
        })
        .collect()
}

/// Reads and parses an event log file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_event_log(path: impl AsRef<Path>) -> Result<Vec<ClientEvent>, ReplayError> {
    let text = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ReplayError::new(format!("Failed to read event log: {}", e), 0))?;
    parse_event_log(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_blanks_skipped() {
        let log = "# session\n\n{\"type\":\"poll_turn\"}\n";
        let events = parse_event_log(log).expect("parse");
        assert_eq!(events, vec![ClientEvent::PollTurn]);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let log = "{\"type\":\"poll_turn\"}\nnot json\n";
        let err = parse_event_log(log).expect_err("bad line");
        assert_eq!(err.line_number, 2);
    }

    #[test]
    fn test_empty_replay_keeps_initial() {
        let replay = Replay::run(&TurnSync::default(), GameSnapshot::new(), Vec::<ClientEvent>::new());
        assert!(replay.steps().is_empty());
        assert_eq!(replay.final_snapshot(), &GameSnapshot::new());
        assert!(!replay.ends_dead());
    }

    #[test]
    fn test_event_kind_outlives_replay() {
        let kind = {
            let replay = Replay::run(&TurnSync::default(), GameSnapshot::new(), [ClientEvent::PollTurn]);
            replay.steps()[0].event()
        };
        assert_eq!(kind, "poll_turn");
    }
}
