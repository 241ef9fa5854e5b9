//! Board, version log and user records on top of a key-value backend.

use super::{Storage, StorageError, StorageResult};
use crate::board::Board;
use crate::presence::User;
use crate::time::{format_clock, now_millis};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Key of the persisted board.
pub const BOARD_KEY: &str = "collabodraw-board";
/// Key of the version log.
pub const VERSIONS_KEY: &str = "collabodraw-versions";
/// Key of the current user record.
pub const USER_KEY: &str = "collabodraw-user";
/// Number of versions kept in the log.
pub const MAX_VERSIONS: usize = 10;

/// A coarse snapshot of the board, independent of undo/redo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub description: String,
    /// Serialized board.
    pub data: String,
}

impl Version {
    /// Snapshot `board` now.
    pub fn capture(board: &Board, description: &str) -> StorageResult<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            timestamp: now_millis(),
            description: description.to_string(),
            data: board.to_json()?,
        })
    }

    /// Decode the stored board.
    pub fn board(&self) -> StorageResult<Board> {
        Ok(Board::from_json(&self.data)?)
    }

    /// Capture time as `HH:MM:SS`.
    pub fn time_label(&self) -> String {
        format_clock(self.timestamp)
    }
}

/// Typed access to the board, version log and user records.
pub struct BoardRepository<S: Storage> {
    storage: Arc<S>,
}

impl<S: Storage> Clone for BoardRepository<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: Storage> BoardRepository<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Read a key, mapping `NotFound` to `None`.
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        match self.storage.load(key) {
            Ok(value) => Ok(Some(value)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Persist the board under [`BOARD_KEY`].
    pub fn save_board(&self, board: &Board) -> StorageResult<()> {
        self.storage.save(BOARD_KEY, &board.to_json()?)?;
        log::info!("Board saved: {}", board.name);
        Ok(())
    }

    /// Load the saved board.
    ///
    /// A missing record is `None`. An unreadable or malformed record is
    /// logged and also treated as `None`.
    pub fn load_board(&self) -> Option<Board> {
        let json = match self.read(BOARD_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                log::error!("Failed to read saved board: {}", e);
                return None;
            }
        };
        match Board::from_json(&json) {
            Ok(board) => {
                log::info!("Board loaded: {}", board.name);
                Some(board)
            }
            Err(e) => {
                log::error!("Error loading board: {}", e);
                None
            }
        }
    }

    /// The version log, newest first, at most [`MAX_VERSIONS`] entries.
    pub fn versions(&self) -> Vec<Version> {
        let json = match self.read(VERSIONS_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::error!("Failed to read version history: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Version>>(&json) {
            Ok(mut versions) => {
                versions.truncate(MAX_VERSIONS);
                versions
            }
            Err(e) => {
                log::error!("Malformed version history: {}", e);
                Vec::new()
            }
        }
    }

    /// Prepend a snapshot of `board` to the version log.
    pub fn add_version(&self, board: &Board, description: &str) -> StorageResult<Version> {
        let version = Version::capture(board, description)?;
        let mut versions = self.versions();
        versions.insert(0, version.clone());
        versions.truncate(MAX_VERSIONS);
        self.storage.save(VERSIONS_KEY, &serde_json::to_string(&versions)?)?;
        log::debug!("Version {} added ({})", version.id, description);
        Ok(version)
    }

    /// Look up a version and decode its board.
    ///
    /// Unknown ids are `Ok(None)`; undecodable data is an error.
    pub fn restore_version(&self, id: &str) -> StorageResult<Option<(Version, Board)>> {
        let Some(version) = self.versions().into_iter().find(|v| v.id == id) else {
            return Ok(None);
        };
        let board = version.board()?;
        Ok(Some((version, board)))
    }

    /// The current user, created with defaults on first access.
    pub fn current_user(&self) -> StorageResult<User> {
        if let Some(json) = self.read(USER_KEY)? {
            match serde_json::from_str::<User>(&json) {
                Ok(user) if !user.id.is_empty() => return Ok(user),
                Ok(_) => log::warn!("Stored user has no id, recreating"),
                Err(e) => log::warn!("Malformed user record, recreating: {}", e),
            }
        }
        let user = User::default();
        self.storage.save(USER_KEY, &serde_json::to_string(&user)?)?;
        Ok(user)
    }
}
