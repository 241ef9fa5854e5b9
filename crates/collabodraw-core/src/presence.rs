//! Local presence for a single-user session.
//!
//! There is no network transport: remote users only exist if added
//! explicitly, their cursors are simulated, and broadcasts are logged.

use crate::elements::{ElementId, HexColor};
use kurbo::{Point, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lower bound of simulated cursor coordinates.
pub const CURSOR_MIN: f64 = 100.0;
/// Upper bound (exclusive) of simulated cursor coordinates.
pub const CURSOR_MAX: f64 = 400.0;

/// A participant of the board session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub color: HexColor,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "User".to_string(),
            initials: "U".to_string(),
            color: HexColor::rgb(0x3b, 0x82, 0xf6),
        }
    }
}

/// Simulated pointer position of another user.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCursor {
    pub user_id: String,
    pub name: String,
    pub color: HexColor,
    pub position: Point,
}

/// A local change announced to other participants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Change {
    Draw { id: ElementId, kind: &'static str },
    Move { ids: Vec<ElementId>, delta: Vec2 },
    Delete { ids: Vec<ElementId> },
    Cursor { position: Point, user: String },
    Clear,
}

/// Online users (current user first) and their cursors.
#[derive(Debug, Clone)]
pub struct Presence {
    users: Vec<User>,
    cursors: Vec<RemoteCursor>,
}

impl Presence {
    /// Start a session with only the current user online.
    pub fn new(current: User) -> Self {
        Self {
            users: vec![current],
            cursors: Vec::new(),
        }
    }

    /// The local user.
    pub fn current_user(&self) -> Option<&User> {
        self.users.first()
    }

    /// Everyone online, the current user first.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Add another participant. Returns false if already present.
    pub fn join(&mut self, user: User) -> bool {
        if self.users.iter().any(|u| u.id == user.id) {
            return false;
        }
        log::debug!("{} joined", user.name);
        self.users.push(user);
        true
    }

    /// Remove a participant other than the current user.
    pub fn leave(&mut self, user_id: &str) -> bool {
        let Some(index) = self.users.iter().skip(1).position(|u| u.id == user_id) else {
            return false;
        };
        self.users.remove(index + 1);
        self.cursors.retain(|c| c.user_id != user_id);
        true
    }

    /// Place every other user's cursor at a fresh random position.
    pub fn refresh_cursors<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cursors = self
            .users
            .iter()
            .skip(1)
            .map(|user| RemoteCursor {
                user_id: user.id.clone(),
                name: user.name.clone(),
                color: user.color,
                position: Point::new(
                    rng.random_range(CURSOR_MIN..CURSOR_MAX),
                    rng.random_range(CURSOR_MIN..CURSOR_MAX),
                ),
            })
            .collect();
    }

    pub fn cursors(&self) -> &[RemoteCursor] {
        &self.cursors
    }

    /// Announce a local change. Only logged; nothing is sent anywhere.
    pub fn broadcast(&self, change: &Change) {
        match serde_json::to_string(change) {
            Ok(payload) => log::debug!("Broadcasting change: {}", payload),
            Err(e) => log::warn!("Failed to encode change: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest(name: &str) -> User {
        User {
            name: name.to_string(),
            initials: name[..1].to_string(),
            ..User::default()
        }
    }

    #[test]
    fn test_default_user() {
        let user = User::default();
        assert_eq!(user.name, "User");
        assert_eq!(user.initials, "U");
        assert_eq!(user.color.to_string(), "#3b82f6");
        assert!(!user.id.is_empty());
    }

    #[test]
    fn test_current_user_first() {
        let me = User::default();
        let mut presence = Presence::new(me.clone());
        assert!(presence.join(guest("Ada")));
        assert_eq!(presence.users().len(), 2);
        assert_eq!(presence.current_user(), Some(&me));
        assert!(!presence.leave(&me.id));
    }

    #[test]
    fn test_cursors_in_range_and_exclude_self() {
        let mut presence = Presence::new(User::default());
        presence.join(guest("Ada"));
        presence.join(guest("Grace"));
        let mut rng = rand::rng();
        for _ in 0..100 {
            presence.refresh_cursors(&mut rng);
            assert_eq!(presence.cursors().len(), 2);
            for cursor in presence.cursors() {
                assert!((CURSOR_MIN..CURSOR_MAX).contains(&cursor.position.x));
                assert!((CURSOR_MIN..CURSOR_MAX).contains(&cursor.position.y));
            }
        }
    }

    #[test]
    fn test_leave_drops_cursor() {
        let mut presence = Presence::new(User::default());
        let ada = guest("Ada");
        presence.join(ada.clone());
        presence.refresh_cursors(&mut rand::rng());
        assert!(presence.leave(&ada.id));
        assert!(presence.cursors().is_empty());
    }

    #[test]
    fn test_change_payload() {
        let change = Change::Move {
            ids: Vec::new(),
            delta: Vec2::new(1.0, 2.0),
        };
        let value = serde_json::to_value(&change).unwrap();
        assert_eq!(value["type"], "move");
        assert_eq!(value["delta"]["x"], 1.0);
    }
}
