//! Per-tick update logic for the dice simulation
//!
//! - `dice`: roll impulse, settle detection, and face resolution

mod dice;

pub use dice::{check_die_settled, determine_up_face, roll_die, update_die, SETTLE_THRESHOLD};
