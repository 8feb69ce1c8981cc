//! Dice Poker core library
//!
//! A physics-simulated dice-poker table without the rendering: rapier rigid
//! bodies for the dice, settle detection over consecutive pose samples, face
//! resolution against the world up vector, and the client-side store the
//! resolved values flow into.

pub mod dice3d;
pub mod game;
pub mod store;
