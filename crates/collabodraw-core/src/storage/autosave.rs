//! Auto-save functionality for board persistence.
//!
//! Provides periodic saving of the board to prevent data loss.

use super::{BoardRepository, Storage, StorageResult, Version};
use crate::board::Board;
use crate::time::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Version description for user-triggered saves.
pub const MANUAL_SAVE_DESCRIPTION: &str = "Manual save";
/// Version description for periodic saves.
pub const AUTO_SAVE_DESCRIPTION: &str = "Auto-save";

/// Tracks unsaved changes and writes the board on an interval.
pub struct AutoSaveManager<S: Storage> {
    repository: BoardRepository<S>,
    /// Auto-save interval.
    interval: Duration,
    /// Last save timestamp.
    last_save: Option<Instant>,
    /// Whether the board has unsaved changes.
    dirty: bool,
}

impl<S: Storage> AutoSaveManager<S> {
    /// Create a new auto-save manager writing through `repository`.
    pub fn new(repository: BoardRepository<S>) -> Self {
        Self {
            repository,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            dirty: false,
        }
    }

    /// Set the auto-save interval.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Get the auto-save interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Mark the board as having unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if the board has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Restart the interval at `now` without saving (after load).
    pub fn mark_clean(&mut self, now: Instant) {
        self.dirty = false;
        self.last_save = Some(now);
    }

    /// Check if the board is dirty and the interval has elapsed.
    pub fn should_save(&self, now: Instant) -> bool {
        if !self.dirty {
            return false;
        }
        match self.last_save {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }

    /// Auto-save if needed. Returns true if a save was performed.
    pub fn maybe_save(&mut self, board: &Board, now: Instant) -> StorageResult<bool> {
        if !self.should_save(now) {
            return Ok(false);
        }
        self.save(board, AUTO_SAVE_DESCRIPTION, now)?;
        Ok(true)
    }

    /// Write the board and append a version described by `description`.
    pub fn save(&mut self, board: &Board, description: &str, now: Instant) -> StorageResult<Version> {
        self.repository.save_board(board)?;
        let version = self.repository.add_version(board, description)?;
        self.mark_clean(now);
        Ok(version)
    }

    /// Get the repository.
    pub fn repository(&self) -> &BoardRepository<S> {
        &self.repository
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn manager() -> AutoSaveManager<MemoryStorage> {
        AutoSaveManager::new(BoardRepository::new(Arc::new(MemoryStorage::new())))
    }

    #[test]
    fn test_autosave_manager_creation() {
        let manager = manager();
        assert!(!manager.is_dirty());
        assert!(!manager.should_save(Instant::now()));
        assert_eq!(manager.interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_autosave_waits_for_interval() {
        let mut manager = manager();
        let start = Instant::now();
        manager.mark_clean(start);
        manager.mark_dirty();
        assert!(!manager.should_save(start + Duration::from_secs(29)));
        assert!(manager.should_save(start + Duration::from_secs(30)));
    }

    #[test]
    fn test_maybe_save_writes_board_and_version() {
        let mut manager = manager();
        let board = Board::new("Roadmap");
        let now = Instant::now();
        assert!(!manager.maybe_save(&board, now).unwrap());

        manager.mark_dirty();
        assert!(manager.maybe_save(&board, now).unwrap());
        assert!(!manager.is_dirty());

        let repo = manager.repository();
        assert_eq!(repo.load_board().map(|b| b.name), Some("Roadmap".to_string()));
        let versions = repo.versions();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].description, AUTO_SAVE_DESCRIPTION);
    }

    #[test]
    fn test_manual_save() {
        let mut manager = manager();
        let board = Board::new("Roadmap");
        let version = manager
            .save(&board, MANUAL_SAVE_DESCRIPTION, Instant::now())
            .unwrap();
        assert_eq!(version.description, "Manual save");
        assert_eq!(version.board().unwrap(), board);
    }
}
