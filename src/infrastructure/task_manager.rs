use tokio::task::JoinHandle;

/// Tracks background tasks (connection readers, reconnection timers) so they
/// can be aborted together when the session is torn down.
pub struct TaskManager {
    handles: Vec<JoinHandle<()>>,
}

impl TaskManager {
    /// Create a new empty task manager
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Spawn a task and track it, forgetting handles of tasks that already finished
    pub fn spawn<F>(&mut self, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.handles.retain(|handle| !handle.is_finished());
        let handle = tokio::spawn(future);
        self.handles.push(handle);
    }

    /// Number of tracked tasks that are still running
    #[cfg(test)]
    pub(crate) fn active(&self) -> usize {
        self.handles
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Abort all tasks without waiting
    pub fn abort_all(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
        self.handles.clear();
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.abort_all();
    }
}
