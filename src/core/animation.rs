//! Cooperative frame loop state
//!
//! A loop is either Stopped or Running with a [`CancelToken`]. Every start
//! issues a fresh token and cancels the previous one, so a frame callback
//! left over from an earlier run sees its token cancelled and stops instead
//! of painting alongside the new loop.

use std::cell::Cell;
use std::rc::Rc;

/// Shared cancellation flag, checked by the frame callback before painting
/// and before rescheduling.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Debug, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running(CancelToken),
}

#[derive(Debug, Default)]
pub struct AnimationLoop {
    state: LoopState,
    /// Number of times the loop has been started
    generation: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run, cancelling any run in flight
    pub fn start(&mut self) -> CancelToken {
        self.stop();
        let token = CancelToken::new();
        self.state = LoopState::Running(token.clone());
        self.generation += 1;
        token
    }

    /// Cancel the current run. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            LoopState::Running(token) => {
                token.cancel();
                true
            }
            LoopState::Stopped => false,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_stopped() {
        let anim = AnimationLoop::new();
        assert!(!anim.is_running());
        assert_eq!(anim.generation(), 0);
    }

    #[test]
    fn stop_cancels_token() {
        let mut anim = AnimationLoop::new();
        let token = anim.start();
        assert!(anim.is_running());
        assert!(!token.is_cancelled());

        assert!(anim.stop());
        assert!(token.is_cancelled());
        assert!(!anim.is_running());
        assert!(!anim.stop(), "second stop is a no-op");
    }

    #[test]
    fn restart_invalidates_previous_token() {
        let mut anim = AnimationLoop::new();
        let first = anim.start();
        let second = anim.start();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(anim.generation(), 2);
        assert!(matches!(anim.state(), LoopState::Running(_)));
    }
}
