// messages from UI to the run watcher thread
pub enum RunnerCommand {
    Cancel,
}

// messages from the run watcher thread to the UI
pub enum RunnerUpdate {
    /// one line of simulator stdout or stderr
    Line(String),
    /// process exited on its own or after a cancel
    Finished { success: bool, code: Option<i32> },
    /// the watcher could not track the process
    Failed(String),
}

/// lifecycle of the current (or most recent) simulator run
#[derive(Clone, Debug, PartialEq)]
pub enum RunState {
    Idle,
    Running,
    Finished { success: bool, code: Option<i32> },
    Failed(String),
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}
