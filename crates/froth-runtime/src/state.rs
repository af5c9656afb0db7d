//! Run state machine for the frame loop.
//!
//! `Stopped → Running ⇄ Paused → Disposed`. Disposed is terminal. Every
//! transition method returns whether it took effect; invalid requests leave
//! the state untouched.

/// Why the loop is paused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    /// The page is hidden; resumes automatically when visible again
    Hidden,
    /// The rendering context was lost; resumes only on explicit restart
    DeviceLost,
}

/// Lifecycle state of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    Paused(PauseReason),
    Disposed,
}

impl RunState {
    pub fn name(&self) -> &'static str {
        match self {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
            RunState::Paused(PauseReason::Hidden) => "paused (hidden)",
            RunState::Paused(PauseReason::DeviceLost) => "paused (device lost)",
            RunState::Disposed => "disposed",
        }
    }
}

/// Guards the allowed transitions between [`RunState`]s.
#[derive(Debug)]
pub struct RunStateMachine {
    state: RunState,
}

impl RunStateMachine {
    /// Creates a machine in the `Stopped` state.
    pub fn new() -> Self {
        Self {
            state: RunState::Stopped,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_disposed(&self) -> bool {
        self.state == RunState::Disposed
    }

    /// `Stopped → Running`
    pub fn start(&mut self) -> bool {
        self.transition(RunState::Stopped, RunState::Running)
    }

    /// `Running → Paused(reason)`. A device loss while hidden upgrades the
    /// pause so that becoming visible no longer resumes.
    pub fn pause(&mut self, reason: PauseReason) -> bool {
        match (self.state, reason) {
            (RunState::Running, _) => {
                self.set(RunState::Paused(reason));
                true
            }
            (RunState::Paused(PauseReason::Hidden), PauseReason::DeviceLost) => {
                self.set(RunState::Paused(PauseReason::DeviceLost));
                true
            }
            _ => false,
        }
    }

    /// `Paused(Hidden) → Running`
    pub fn resume_visible(&mut self) -> bool {
        self.transition(RunState::Paused(PauseReason::Hidden), RunState::Running)
    }

    /// `Paused(any) → Running`
    pub fn restart(&mut self) -> bool {
        match self.state {
            RunState::Paused(_) => {
                self.set(RunState::Running);
                true
            }
            _ => false,
        }
    }

    /// Any state → `Disposed`. Returns false if already disposed.
    pub fn dispose(&mut self) -> bool {
        if self.state == RunState::Disposed {
            return false;
        }
        self.set(RunState::Disposed);
        true
    }

    fn transition(&mut self, from: RunState, to: RunState) -> bool {
        if self.state == from {
            self.set(to);
            true
        } else {
            false
        }
    }

    fn set(&mut self, next: RunState) {
        tracing::debug!(from = self.state.name(), to = next.name(), "run state");
        self.state = next;
    }
}

impl Default for RunStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_stopped() {
        let sm = RunStateMachine::new();
        assert_eq!(sm.state(), RunState::Stopped);
        assert!(!sm.is_running());
    }

    #[test]
    fn start_pause_resume() {
        let mut sm = RunStateMachine::new();
        assert!(sm.start());
        assert!(sm.is_running());

        assert!(sm.pause(PauseReason::Hidden));
        assert_eq!(sm.state(), RunState::Paused(PauseReason::Hidden));

        assert!(sm.resume_visible());
        assert!(sm.is_running());
    }

    #[test]
    fn cannot_start_twice() {
        let mut sm = RunStateMachine::new();
        assert!(sm.start());
        assert!(!sm.start());
    }

    #[test]
    fn pause_requires_running() {
        let mut sm = RunStateMachine::new();
        assert!(!sm.pause(PauseReason::Hidden));
        assert_eq!(sm.state(), RunState::Stopped);
    }

    #[test]
    fn device_lost_needs_restart() {
        let mut sm = RunStateMachine::new();
        sm.start();
        assert!(sm.pause(PauseReason::DeviceLost));
        assert!(!sm.resume_visible());
        assert_eq!(sm.state(), RunState::Paused(PauseReason::DeviceLost));

        assert!(sm.restart());
        assert!(sm.is_running());
    }

    #[test]
    fn device_lost_while_hidden_upgrades() {
        let mut sm = RunStateMachine::new();
        sm.start();
        sm.pause(PauseReason::Hidden);
        assert!(sm.pause(PauseReason::DeviceLost));
        assert!(!sm.resume_visible());
    }

    #[test]
    fn restart_requires_pause() {
        let mut sm = RunStateMachine::new();
        assert!(!sm.restart());
        sm.start();
        assert!(!sm.restart());
    }

    #[test]
    fn dispose_is_terminal_and_idempotent() {
        let mut sm = RunStateMachine::new();
        sm.start();
        assert!(sm.dispose());
        assert!(!sm.dispose());
        assert!(!sm.start());
        assert!(!sm.restart());
        assert!(!sm.pause(PauseReason::Hidden));
        assert!(sm.is_disposed());
    }

    #[test]
    fn dispose_from_stopped() {
        let mut sm = RunStateMachine::new();
        assert!(sm.dispose());
        assert_eq!(sm.state(), RunState::Disposed);
    }
}
