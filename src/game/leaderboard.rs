//! Leader Board
//!
//! Per-player score plus the position and time of the last successful
//! claim, which the anti-cheat check measures movement against.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use chrono::{DateTime, Utc};

use crate::core::position::Position;

/// Appended to a player's display name when they are banned.
pub const BAN_MARKER: &str = " (cheated, banned)";

/// State of a single player.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerRecord {
    /// Player id as presented by the client
    pub id: String,
    /// Display name
    pub name: String,
    /// Number of diamonds claimed while not banned
    pub score: u32,
    /// Position of the last claimed diamond
    pub position: Position,
    /// When the last diamond was claimed
    pub last_claim_at: DateTime<Utc>,
    /// Disqualified for implausible movement; never cleared
    pub banned: bool,
}

impl PlayerRecord {
    /// Create a fresh record standing at `position`.
    ///
    /// The display name starts out as the player id.
    pub fn new(id: &str, position: Position, at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            score: 0,
            position,
            last_claim_at: at,
            banned: false,
        }
    }

    /// Ban the player. Idempotent.
    pub fn ban(&mut self) {
        if !self.banned {
            self.banned = true;
            self.name.push_str(BAN_MARKER);
        }
    }

    /// Record a successful claim. Returns the new score.
    pub fn credit(&mut self, position: Position, at: DateTime<Utc>, name: String) -> u32 {
        self.position = position;
        self.last_claim_at = at;
        self.name = name;
        self.score += 1;
        self.score
    }
}

/// All player records, keyed by player id.
#[derive(Debug, Default)]
pub struct LeaderBoard {
    records: BTreeMap<String, PlayerRecord>,
}

impl LeaderBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a player's record.
    pub fn get(&self, player_id: &str) -> Option<&PlayerRecord> {
        self.records.get(player_id)
    }

    /// Get a player's record, creating it with `create` if absent.
    ///
    /// The flag is `true` when the record was created by this call.
    pub fn get_or_create(
        &mut self,
        player_id: &str,
        create: impl FnOnce() -> PlayerRecord,
    ) -> (&mut PlayerRecord, bool) {
        match self.records.entry(player_id.to_string()) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => (entry.insert(create()), true),
        }
    }

    /// Iterate records in player id order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.records.values()
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nobody is playing.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record, banned players included.
    pub fn reset_all(&mut self) {
        self.records.clear();
    }
}
