//! Command intents: descriptions of work for the runtime to perform.
//!
//! The turn-sync core never performs I/O. Each transition returns one of
//! these values and the surrounding runtime executes it.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

/// Payload of a "start turn" request.
///
/// `after_turn` is the last turn number the client has seen; runtimes key
/// their in-flight guard on it so one turn is never requested twice at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct StartTurnRequest {
    session_id: Option<String>,
    player_id: Option<String>,
    after_turn: u32,
}

/// An effect the runtime should perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CommandIntent {
    /// Nothing to do.
    NoCmd,
    /// Ask the server to start (or re-announce) the next turn.
    SendStartTurn(StartTurnRequest),
    /// Feed a poll-turn event back into the core after a delay.
    SchedulePollTurn {
        /// Delay before the poll fires.
        #[serde(with = "duration_ms")]
        delay: Duration,
    },
    /// Several independent commands; members may run concurrently.
    BatchCmds(Vec<CommandIntent>),
}

impl CommandIntent {
    /// Builds a batch, collapsing trivial cases.
    ///
    /// `NoCmd` members are dropped, nested batches are flattened, a single
    /// survivor is returned unwrapped and an empty batch becomes `NoCmd`.
    #[instrument(skip(commands))]
    pub fn batch(commands: impl IntoIterator<Item = CommandIntent>) -> Self {
        let mut flat: Vec<CommandIntent> = commands
            .into_iter()
            .flat_map(CommandIntent::into_flat)
            .collect();
        match flat.len() {
            0 => CommandIntent::NoCmd,
            1 => flat.remove(0),
            _ => CommandIntent::BatchCmds(flat),
        }
    }

    /// Returns the leaf commands, flattening batches and dropping `NoCmd`.
    pub fn into_flat(self) -> Vec<CommandIntent> {
        match self {
            CommandIntent::NoCmd => Vec::new(),
            CommandIntent::BatchCmds(commands) => commands
                .into_iter()
                .flat_map(CommandIntent::into_flat)
                .collect(),
            leaf => vec![leaf],
        }
    }

    /// Whether this intent does nothing.
    pub fn is_none(&self) -> bool {
        match self {
            CommandIntent::NoCmd => true,
            CommandIntent::BatchCmds(commands) => commands.iter().all(CommandIntent::is_none),
            _ => false,
        }
    }

    /// Returns the start-turn payload if this intent (or any batch member) sends one.
    pub fn start_turn(&self) -> Option<&StartTurnRequest> {
        match self {
            CommandIntent::SendStartTurn(request) => Some(request),
            CommandIntent::BatchCmds(commands) => commands.iter().find_map(CommandIntent::start_turn),
            _ => None,
        }
    }

    /// Returns the poll delay if this intent (or any batch member) schedules one.
    pub fn poll_delay(&self) -> Option<Duration> {
        match self {
            CommandIntent::SchedulePollTurn { delay } => Some(*delay),
            CommandIntent::BatchCmds(commands) => commands.iter().find_map(CommandIntent::poll_delay),
            _ => None,
        }
    }
}

impl std::fmt::Display for CommandIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandIntent::NoCmd => write!(f, "none"),
            CommandIntent::SendStartTurn(request) => {
                write!(f, "start-turn(after {})", request.after_turn)
            }
            CommandIntent::SchedulePollTurn { delay } => {
                write!(f, "poll-turn(in {}ms)", delay.as_millis())
            }
            CommandIntent::BatchCmds(commands) => {
                let parts: Vec<String> = commands.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
