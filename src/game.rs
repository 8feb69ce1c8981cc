//! Game data model
//!
//! Mock player, game and scoring types carried by the client state. These
//! are static fixtures with no server authority; hands are the only fields
//! the roll loop writes back into.

use serde::{Deserialize, Serialize};

/// A player at the table. `hand` holds the current face value of each die.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub username: String,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub points: u32,
    #[serde(rename = "totalGamesPlayed", default)]
    pub total_games_played: u32,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(rename = "isReady", default)]
    pub is_ready: bool,
    #[serde(default)]
    pub hand: Option<Vec<u8>>,
}

impl Player {
    /// The built-in local player fixture.
    pub fn mock() -> Self {
        Self {
            id: "1".to_string(),
            username: "Player 1".to_string(),
            avatar_url: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=1".to_string()),
            points: 0,
            total_games_played: 5,
            achievements: Vec::new(),
            is_ready: true,
            hand: Some(vec![1, 2, 3, 4, 5]),
        }
    }

    /// Load a player fixture from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read player file '{}': {}", path, e))?;
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse player file '{}': {}", path, e))
    }

    /// Save this player as pretty-printed JSON.
    pub fn save_to_file(&self, path: &str) -> Result<(), String> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize player: {}", e))?;
        std::fs::write(path, contents)
            .map_err(|e| format!("Failed to write player file '{}': {}", path, e))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Playing,
    Finished,
}

/// One table's game fixture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub id: String,
    pub status: GameStatus,
    pub players: Vec<Player>,
    #[serde(rename = "currentTurn")]
    pub current_turn: String,
    #[serde(rename = "roundPoints", default)]
    pub round_points: u32,
    #[serde(default)]
    pub winner: Option<String>,
}

impl GameState {
    /// A single-player table fixture with the given player on turn.
    pub fn mock(player: Player) -> Self {
        let current_turn = player.id.clone();
        Self {
            id: "1".to_string(),
            status: GameStatus::Playing,
            players: vec![player],
            current_turn,
            round_points: 0,
            winner: None,
        }
    }
}

/// The nine dice-poker hand ranks, best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PokerHand {
    #[serde(rename = "Five of a Kind")]
    FiveOfAKind,
    #[serde(rename = "Four of a Kind")]
    FourOfAKind,
    #[serde(rename = "Full House")]
    FullHouse,
    #[serde(rename = "High Straight")]
    HighStraight,
    #[serde(rename = "Low Straight")]
    LowStraight,
    #[serde(rename = "Three of a Kind")]
    ThreeOfAKind,
    #[serde(rename = "Two Pair")]
    TwoPair,
    #[serde(rename = "One Pair")]
    OnePair,
    #[serde(rename = "Nothing")]
    Nothing,
}

impl PokerHand {
    pub fn name(&self) -> &'static str {
        match self {
            PokerHand::FiveOfAKind => "Five of a Kind",
            PokerHand::FourOfAKind => "Four of a Kind",
            PokerHand::FullHouse => "Full House",
            PokerHand::HighStraight => "High Straight",
            PokerHand::LowStraight => "Low Straight",
            PokerHand::ThreeOfAKind => "Three of a Kind",
            PokerHand::TwoPair => "Two Pair",
            PokerHand::OnePair => "One Pair",
            PokerHand::Nothing => "Nothing",
        }
    }

    /// All ranks, best first.
    pub fn all() -> [PokerHand; 9] {
        [
            PokerHand::FiveOfAKind,
            PokerHand::FourOfAKind,
            PokerHand::FullHouse,
            PokerHand::HighStraight,
            PokerHand::LowStraight,
            PokerHand::ThreeOfAKind,
            PokerHand::TwoPair,
            PokerHand::OnePair,
            PokerHand::Nothing,
        ]
    }
}

/// Lifetime scoring summary shown next to the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    #[serde(rename = "totalPoints", default)]
    pub total_points: u32,
    #[serde(rename = "gamesPlayed", default)]
    pub games_played: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(rename = "bestHand", default)]
    pub best_hand: Option<PokerHand>,
    #[serde(rename = "achievementsUnlocked", default)]
    pub achievements_unlocked: u32,
}

impl PlayerStats {
    pub fn mock() -> Self {
        Self {
            total_points: 120,
            games_played: 5,
            wins: 2,
            best_hand: Some(PokerHand::FullHouse),
            achievements_unlocked: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    /// RFC 3339 timestamp; `None` while still locked.
    #[serde(rename = "unlockedAt", default)]
    pub unlocked_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_player_shape() {
        let player = Player::mock();
        assert_eq!(player.id, "1");
        assert_eq!(player.username, "Player 1");
        assert_eq!(
            player.avatar_url.as_deref(),
            Some("https://api.dicebear.com/7.x/avataaars/svg?seed=1")
        );
        assert_eq!(player.total_games_played, 5);
        assert_eq!(player.hand, Some(vec![1, 2, 3, 4, 5]));
        assert!(player.achievements.is_empty());
    }

    #[test]
    fn test_mock_game_puts_player_on_turn() {
        let game = GameState::mock(Player::mock());
        assert_eq!(game.status, GameStatus::Playing);
        assert_eq!(game.current_turn, "1");
        assert_eq!(game.players.len(), 1);
        assert_eq!(game.round_points, 0);
        assert!(game.winner.is_none());
    }

    #[test]
    fn test_player_json_field_names() {
        let json = serde_json::to_string(&Player::mock()).expect("serialize player");
        assert!(json.contains("\"avatarUrl\":\"https://api.dicebear.com"));
        assert!(json.contains("\"totalGamesPlayed\":5"));
        assert!(json.contains("\"isReady\":true"));
        assert!(json.contains("\"hand\":[1,2,3,4,5]"));
    }

    #[test]
    fn test_player_parses_with_missing_optional_fields() {
        let json = r#"{"id":"9","username":"Visitor"}"#;
        let player: Player = serde_json::from_str(json).expect("parse minimal player");
        assert_eq!(player.username, "Visitor");
        assert_eq!(player.points, 0);
        assert!(player.hand.is_none());
        assert!(!player.is_ready);
    }

    #[test]
    fn test_game_status_serializes_lowercase() {
        let json = serde_json::to_string(&GameStatus::Playing).expect("serialize status");
        assert_eq!(json, "\"playing\"");
        let status: GameStatus = serde_json::from_str("\"finished\"").expect("parse status");
        assert_eq!(status, GameStatus::Finished);
    }

    #[test]
    fn test_poker_hand_names_match_serde_strings() {
        for hand in PokerHand::all() {
            let json = serde_json::to_string(&hand).expect("serialize hand");
            assert_eq!(json, format!("\"{}\"", hand.name()));
        }
    }

    #[test]
    fn test_poker_hand_parse_display_string() {
        let hand: PokerHand =
            serde_json::from_str("\"Five of a Kind\"").expect("parse hand name");
        assert_eq!(hand, PokerHand::FiveOfAKind);
    }

    #[test]
    fn test_player_file_round_trip() {
        let path = std::env::temp_dir().join("dicepoker_player_roundtrip.json");
        let path = path.to_str().expect("temp path is valid utf-8");

        let mut player = Player::mock();
        player.points = 77;
        player.save_to_file(path).expect("save player");

        let loaded = Player::load_from_file(path).expect("load player");
        assert_eq!(loaded, player);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_missing_file_is_an_error() {
        let result = Player::load_from_file("/nonexistent/player.json");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to read"));
    }
}
