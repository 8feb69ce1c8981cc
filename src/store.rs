//! Client-side game store
//!
//! Owns the table's shared state: the rolling flag, which dice are held,
//! how many rolls remain in the turn, and the mock game/player fixtures.
//! Everything mutates through named entry points; callers get narrow reads
//! (the rolling flag, one index's held state) rather than raw fields.

use std::collections::HashSet;

use crate::game::{GameState, Player, PlayerStats};

/// Rolls granted at the start of each turn.
pub const ROLLS_PER_TURN: u32 = 3;

#[derive(Clone, Debug)]
pub struct GameStore {
    game: Option<GameState>,
    current_player: Option<Player>,
    player_stats: Option<PlayerStats>,
    rolling: bool,
    held_dice: HashSet<usize>,
    rolls_left: u32,
}

impl Default for GameStore {
    fn default() -> Self {
        Self {
            game: None,
            current_player: None,
            player_stats: None,
            rolling: false,
            held_dice: HashSet::new(),
            rolls_left: ROLLS_PER_TURN,
        }
    }
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Fixtures ===

    pub fn set_game(&mut self, game: GameState) {
        self.game = Some(game);
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn set_current_player(&mut self, player: Player) {
        self.current_player = Some(player);
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current_player.as_ref()
    }

    pub fn set_player_stats(&mut self, stats: PlayerStats) {
        self.player_stats = Some(stats);
    }

    pub fn player_stats(&self) -> Option<&PlayerStats> {
        self.player_stats.as_ref()
    }

    // === Roll flow ===

    pub fn is_rolling(&self) -> bool {
        self.rolling
    }

    pub fn set_rolling(&mut self, rolling: bool) {
        self.rolling = rolling;
    }

    /// The roll-button guard: starts a roll only when rolls remain and no
    /// roll is in flight. Consumes one roll on success.
    pub fn start_roll(&mut self) -> bool {
        if self.rolls_left == 0 || self.rolling {
            return false;
        }
        self.rolling = true;
        self.decrement_rolls();
        true
    }

    pub fn rolls_left(&self) -> u32 {
        self.rolls_left
    }

    pub fn decrement_rolls(&mut self) {
        self.rolls_left = self.rolls_left.saturating_sub(1);
    }

    /// Start a fresh turn: full roll count, no held dice.
    pub fn reset_rolls(&mut self) {
        self.rolls_left = ROLLS_PER_TURN;
        self.held_dice.clear();
    }

    // === Held dice ===

    pub fn toggle_held_die(&mut self, index: usize) {
        if !self.held_dice.remove(&index) {
            self.held_dice.insert(index);
        }
    }

    pub fn is_held(&self, index: usize) -> bool {
        self.held_dice.contains(&index)
    }

    /// Held die indices in ascending order.
    pub fn held_dice(&self) -> Vec<usize> {
        let mut held: Vec<usize> = self.held_dice.iter().copied().collect();
        held.sort_unstable();
        held
    }

    // === Hand writeback ===

    /// Write a resolved face value into the current player's hand. No-ops
    /// when there is no player, no hand, or the index is out of range.
    pub fn update_die_value(&mut self, index: usize, value: u8) {
        let Some(player) = self.current_player.as_mut() else {
            return;
        };
        let Some(hand) = player.hand.as_mut() else {
            return;
        };
        if let Some(slot) = hand.get_mut(index) {
            *slot = value;
        }
    }

    /// The current player's hand, if one is set.
    pub fn hand(&self) -> Option<&[u8]> {
        self.current_player.as_ref()?.hand.as_deref()
    }
}
