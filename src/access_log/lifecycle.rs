//! Start/stop state machine.

use std::fmt;

use thiserror::Error;

use crate::error::ConnectionError;

/// Operating state of the forwarder.
///
/// ```text
/// Stopped -> Starting -> Available -> Stopping -> Stopped
///               |
///               +-> Stopped   (connection failed)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Stopped,
    Starting,
    Available,
    Stopping,
}

impl LifecycleState {
    /// Whether log calls are processed in this state.
    pub fn is_available(self) -> bool {
        self == Self::Available
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Starting => "starting",
            Self::Available => "available",
            Self::Stopping => "stopping",
        }
    }

    /// Move to `next`, rejecting edges the machine does not have.
    pub(crate) fn transition(&mut self, next: Self) -> Result<(), LifecycleError> {
        let allowed = matches!(
            (*self, next),
            (Self::Stopped, Self::Starting)
                | (Self::Starting, Self::Available)
                | (Self::Starting, Self::Stopped)
                | (Self::Available, Self::Stopping)
                | (Self::Stopping, Self::Stopped)
        );
        if !allowed {
            return Err(LifecycleError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures surfaced by `start` and `stop`.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The store connection could not be opened; the forwarder stays stopped.
    #[error("access log failed to start: {0}")]
    Start(#[source] ConnectionError),
    /// The requested transition is not valid from the current state.
    #[error("cannot move access log from {from} to {to}")]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use LifecycleState::{Available, Starting, Stopped, Stopping};

    #[rstest]
    #[case(Stopped, Starting)]
    #[case(Starting, Available)]
    #[case(Starting, Stopped)]
    #[case(Available, Stopping)]
    #[case(Stopping, Stopped)]
    fn permits_lifecycle_edges(#[case] from: LifecycleState, #[case] to: LifecycleState) {
        let mut state = from;
        state.transition(to).expect("edge must be allowed");
        assert_eq!(state, to);
    }

    #[rstest]
    #[case(Stopped, Available)]
    #[case(Stopped, Stopping)]
    #[case(Available, Starting)]
    #[case(Available, Stopped)]
    #[case(Stopping, Available)]
    fn rejects_other_edges(#[case] from: LifecycleState, #[case] to: LifecycleState) {
        let mut state = from;
        let err = state.transition(to).expect_err("edge must be rejected");
        assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
        assert_eq!(state, from);
    }

    #[rstest]
    fn only_available_accepts_log_calls() {
        assert!(Available.is_available());
        assert!(![Stopped, Starting, Stopping].iter().any(|s| s.is_available()));
    }
}
