//! Import progress reporting.

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called when games are added to the import queue.
    fn on_queued(&self, total_queue: usize, queue: usize);

    /// Called after each queued game is committed or skipped.
    ///
    /// `name` is set for games that were created.
    fn on_game(&self, done: usize, total: usize, name: Option<&str>);

    /// Called when a phase starts (e.g., "Importing from Lutris").
    fn on_phase(&self, message: &str);

    /// Called when the import is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_queued(&self, _total_queue: usize, _queue: usize) {}
    fn on_game(&self, _done: usize, _total: usize, _name: Option<&str>) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}
