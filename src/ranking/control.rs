use std::sync::Arc;

use tokio::sync::watch;

use super::progress::Progress;

/// Requested run state. The loop reads it at each candidate boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlSignal {
    #[default]
    Run,
    Pause,
    Stop,
}

/// Cloneable handle for steering a run from another task.
///
/// Signals never abort an in-flight provider call; they take effect before the
/// next candidate.
#[derive(Debug, Clone)]
pub struct ControlHandle {
    control: Arc<watch::Sender<ControlSignal>>,
    progress: watch::Receiver<Progress>,
}

impl ControlHandle {
    pub(crate) fn new(
        control: Arc<watch::Sender<ControlSignal>>,
        progress: watch::Receiver<Progress>,
    ) -> Self {
        Self { control, progress }
    }

    pub fn pause(&self) {
        self.control.send_replace(ControlSignal::Pause);
    }

    pub fn resume(&self) {
        self.control.send_replace(ControlSignal::Run);
    }

    pub fn stop(&self) {
        self.control.send_replace(ControlSignal::Stop);
    }

    pub fn signal(&self) -> ControlSignal {
        *self.control.borrow()
    }

    /// Latest published progress.
    pub fn progress(&self) -> Progress {
        self.progress.borrow().clone()
    }

    /// Receiver that wakes on every progress update.
    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.progress.clone()
    }
}
