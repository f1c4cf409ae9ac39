//! Input line parsing.
//!
//! Plain text is a chat message; lines starting with `/` are commands.

use hackroom_server::infrastructure::dto::websocket::{
    ClientEvent, LeaveRoomPayload, MessagePayload, NoteAddPayload, NoteDeletePayload,
    RoomPayload, TimerSetPayload,
};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  <text>                      send a chat message
  /timer                      show the current timer
  /timer set <secs|mm:ss>     set the countdown
  /timer start|pause|resume|reset
  /note <text>                pin a note
  /unnote <note id>           remove a note
  /leave                      leave the room and exit
  /quit                       exit
  /help                       show this help";

/// What one input line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(ClientEvent),
    ShowTimer,
    Help,
    /// Send `leaveRoom`, then end the session
    Leave,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try /help)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid duration '{0}': use seconds (90) or mm:ss (01:30)")]
    InvalidDuration(String),
}

/// Room and name the session joined with
#[derive(Debug, Clone)]
pub struct Identity {
    pub room_id: String,
    pub username: String,
}

impl Identity {
    pub fn new(room_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            username: username.into(),
        }
    }

    fn room(&self) -> RoomPayload {
        RoomPayload {
            room_id: self.room_id.clone(),
        }
    }

    pub fn leave_event(&self) -> ClientEvent {
        ClientEvent::LeaveRoom(LeaveRoomPayload {
            room_id: self.room_id.clone(),
            username: Some(self.username.clone()),
        })
    }
}

/// Parse a duration given as whole seconds or `mm:ss`
pub fn parse_duration(input: &str) -> Result<i64, CommandError> {
    let invalid = || CommandError::InvalidDuration(input.to_string());
    match input.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: i64 = minutes.parse().map_err(|_| invalid())?;
            let seconds: i64 = seconds.parse().map_err(|_| invalid())?;
            if minutes < 0 || !(0..60).contains(&seconds) {
                return Err(invalid());
            }
            minutes
                .checked_mul(60)
                .and_then(|m| m.checked_add(seconds))
                .ok_or_else(invalid)
        }
        None => input.parse().map_err(|_| invalid()),
    }
}

/// Turn one trimmed, non-empty input line into a [`Command`]
pub fn parse_input(line: &str, identity: &Identity) -> Result<Command, CommandError> {
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Send(ClientEvent::Message(MessagePayload {
            room_id: identity.room_id.clone(),
            message: line.to_string(),
            username: identity.username.clone(),
        })));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match name {
        "timer" => parse_timer(args, identity),
        "note" => {
            if args.is_empty() {
                return Err(CommandError::Usage("/note <text>"));
            }
            Ok(Command::Send(ClientEvent::NoteAdd(NoteAddPayload {
                room_id: identity.room_id.clone(),
                username: identity.username.clone(),
                content: args.to_string(),
            })))
        }
        "unnote" => {
            if args.is_empty() {
                return Err(CommandError::Usage("/unnote <note id>"));
            }
            Ok(Command::Send(ClientEvent::NoteDelete(NoteDeletePayload {
                room_id: identity.room_id.clone(),
                note_id: args.to_string(),
                username: Some(identity.username.clone()),
            })))
        }
        "leave" => Ok(Command::Leave),
        "quit" | "exit" => Ok(Command::Quit),
        "help" => Ok(Command::Help),
        other => Err(CommandError::Unknown(format!("/{}", other))),
    }
}

fn parse_timer(args: &str, identity: &Identity) -> Result<Command, CommandError> {
    const USAGE: &str = "/timer [set <secs|mm:ss> | start | pause | resume | reset]";

    let mut words = args.split_whitespace();
    let event = match (words.next(), words.next(), words.next()) {
        (None, _, _) => return Ok(Command::ShowTimer),
        (Some("set"), Some(duration), None) => ClientEvent::TimerSet(TimerSetPayload {
            room_id: identity.room_id.clone(),
            total_seconds: parse_duration(duration)?,
        }),
        (Some("start"), None, _) => ClientEvent::TimerStart(identity.room()),
        (Some("pause"), None, _) => ClientEvent::TimerPause(identity.room()),
        (Some("resume"), None, _) => ClientEvent::TimerResume(identity.room()),
        (Some("reset"), None, _) => ClientEvent::TimerReset(identity.room()),
        _ => return Err(CommandError::Usage(USAGE)),
    };
    Ok(Command::Send(event))
}
