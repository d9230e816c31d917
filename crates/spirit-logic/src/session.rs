//! Session lifecycle: the three-state machine behind the flight game.
//!
//! ```text
//! Idle --Start--> Running --Collide--> Over --Restart--> Running
//! ```
//!
//! There is no pause and no way back to `Idle`; every other pair is rejected
//! and leaves the state untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SessionState {
    /// Menu shown, no simulation.
    #[default]
    Idle = 0,
    /// Simulation advances every tick.
    Running = 1,
    /// Simulation frozen, final score shown.
    Over = 2,
}

impl SessionState {
    pub fn is_running(self) -> bool {
        self == SessionState::Running
    }

    pub fn name(self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Over => "over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionEvent {
    Start,
    Collide,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot apply {event:?} while {}", .from.name())]
    Invalid {
        from: SessionState,
        event: SessionEvent,
    },
}

/// Next state for `event`, or an error if the lifecycle forbids it.
pub fn transition(
    from: SessionState,
    event: SessionEvent,
) -> Result<SessionState, TransitionError> {
    match (from, event) {
        (SessionState::Idle, SessionEvent::Start) => Ok(SessionState::Running),
        (SessionState::Running, SessionEvent::Collide) => Ok(SessionState::Over),
        (SessionState::Over, SessionEvent::Restart) => Ok(SessionState::Running),
        _ => Err(TransitionError::Invalid { from, event }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [SessionState; 3] =
        [SessionState::Idle, SessionState::Running, SessionState::Over];
    const ALL_EVENTS: [SessionEvent; 3] = [
        SessionEvent::Start,
        SessionEvent::Collide,
        SessionEvent::Restart,
    ];

    #[test]
    fn happy_path() {
        let s = transition(SessionState::Idle, SessionEvent::Start).unwrap();
        assert_eq!(s, SessionState::Running);
        let s = transition(s, SessionEvent::Collide).unwrap();
        assert_eq!(s, SessionState::Over);
        let s = transition(s, SessionEvent::Restart).unwrap();
        assert_eq!(s, SessionState::Running);
    }

    #[test]
    fn exactly_three_transitions_allowed() {
        let allowed = ALL_STATES
            .iter()
            .flat_map(|s| ALL_EVENTS.iter().map(move |e| (*s, *e)))
            .filter(|(s, e)| transition(*s, *e).is_ok())
            .count();
        assert_eq!(allowed, 3);
    }

    #[test]
    fn rejected_transition_reports_pair() {
        let err = transition(SessionState::Running, SessionEvent::Start).unwrap_err();
        assert_eq!(
            err,
            TransitionError::Invalid {
                from: SessionState::Running,
                event: SessionEvent::Start
            }
        );
        assert_eq!(err.to_string(), "cannot apply Start while running");
    }

    #[test]
    fn idle_cannot_restart() {
        assert!(transition(SessionState::Idle, SessionEvent::Restart).is_err());
        assert!(transition(SessionState::Idle, SessionEvent::Collide).is_err());
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(SessionState::default(), SessionState::Idle);
        assert!(!SessionState::Idle.is_running());
        assert!(SessionState::Running.is_running());
    }
}
