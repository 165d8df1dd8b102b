//! Protocol Messages
//!
//! JSON shapes exchanged with browser clients. The core types stay free of
//! wire concerns; these views flatten them into what the client expects.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::game::diamond::Diamond;
use crate::game::leaderboard::LeaderBoard;

/// Key of the placeholder entry of an empty leader board.
pub const NOBODY_KEY: &str = "none";

/// Name of the placeholder entry of an empty leader board.
pub const NOBODY_NAME: &str = "nobody is playing";

/// A diamond as listed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiamondView {
    /// Diamond id.
    pub id: u64,
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
    /// CSS color.
    pub color: String,
    /// Always true; lets clients tell diamonds from other sprites.
    pub is_diamond: bool,
}

impl From<&Diamond> for DiamondView {
    fn from(diamond: &Diamond) -> Self {
        Self {
            id: diamond.id,
            x: diamond.position.x,
            y: diamond.position.y,
            color: diamond.color.to_string(),
            is_diamond: true,
        }
    }
}

/// Convert a snapshot into its wire form.
pub fn diamond_list(diamonds: &[Diamond]) -> Vec<DiamondView> {
    diamonds.iter().map(DiamondView::from).collect()
}

/// Reply to a claim: accepted, or refused with the current score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimReply {
    /// Human-readable message.
    pub msg: String,
    /// Player's score, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl ClaimReply {
    /// Accepted claim.
    pub fn accepted(diamond_id: u64, score: u32) -> Self {
        Self { msg: format!("diamond {} is yours!", diamond_id), score: Some(score) }
    }

    /// Refused because the player is banned.
    pub fn banned(score: u32) -> Self {
        Self { msg: "don't cheat!".to_string(), score: Some(score) }
    }

    /// Refused because of a wrong password.
    pub fn wrong_password() -> Self {
        Self { msg: "wrong player password".to_string(), score: None }
    }
}

/// One leader board entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Diamonds claimed.
    pub score: u32,
    /// Display name.
    pub name: String,
}

/// Leader board as sent to clients: player id to entry.
pub type LeaderboardView = BTreeMap<String, ScoreEntry>;

/// Build the leader board view, with a placeholder entry when empty.
pub fn leaderboard_view(board: &LeaderBoard) -> LeaderboardView {
    if board.is_empty() {
        let mut view = LeaderboardView::new();
        view.insert(
            NOBODY_KEY.to_string(),
            ScoreEntry { score: 0, name: NOBODY_NAME.to_string() },
        );
        return view;
    }

    board
        .iter()
        .map(|record| {
            (record.id.clone(), ScoreEntry { score: record.score, name: record.name.clone() })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use crate::core::position::Position;
    use crate::game::diamond::Color;
    use crate::game::leaderboard::PlayerRecord;

    #[test]
    fn test_diamond_view_json() {
        let diamond = Diamond::new(42, Position::new(300, 400), Color::new("#0f0"));
        let json = serde_json::to_value(DiamondView::from(&diamond)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 42, "x": 300, "y": 400, "color": "#0f0", "isDiamond": true })
        );
    }

    #[test]
    fn test_claim_reply_json() {
        let json = serde_json::to_value(ClaimReply::accepted(7, 3)).unwrap();
        assert_eq!(json, serde_json::json!({ "msg": "diamond 7 is yours!", "score": 3 }));

        let json = serde_json::to_value(ClaimReply::wrong_password()).unwrap();
        assert_eq!(json, serde_json::json!({ "msg": "wrong player password" }));

        let json = serde_json::to_value(ClaimReply::banned(1)).unwrap();
        assert_eq!(json, serde_json::json!({ "msg": "don't cheat!", "score": 1 }));
    }

    #[test]
    fn test_empty_leaderboard_placeholder() {
        let view = leaderboard_view(&LeaderBoard::new());
        assert_eq!(view.len(), 1);
        assert_eq!(view[NOBODY_KEY], ScoreEntry { score: 0, name: NOBODY_NAME.into() });
    }

    #[test]
    fn test_leaderboard_view() {
        let mut board = LeaderBoard::new();
        let at = DateTime::<Utc>::from_timestamp_millis(0).unwrap();
        let (record, _) = board.get_or_create("p1", || PlayerRecord::new("p1", Position::default(), at));
        record.credit(Position::new(1, 1), at, "Pat".into());

        let view = leaderboard_view(&board);
        assert_eq!(view.len(), 1);
        assert_eq!(view["p1"], ScoreEntry { score: 1, name: "Pat".into() });
    }
}
