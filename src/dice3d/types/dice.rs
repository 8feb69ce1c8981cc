//! Dice-related types
//!
//! This module contains the per-die roll state machine, the physics sample
//! it compares across ticks, the d6 face-normal table, and the settle event
//! emitted when a die comes to rest.

use nalgebra::{UnitQuaternion, Vector3};

/// Position and orientation of a rigid body at one simulation tick.
///
/// Ephemeral: produced from the physics engine each tick and compared against
/// the previous tick's sample to decide whether the die is still moving.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidBodySample {
    pub position: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl RigidBodySample {
    /// Euclidean distance between this sample's position and another's.
    pub fn position_delta(&self, other: &RigidBodySample) -> f32 {
        (other.position - self.position).norm()
    }

    /// Quaternion-alignment deficit between the two orientations: 0 when
    /// identical, growing as they diverge.
    pub fn orientation_delta(&self, other: &RigidBodySample) -> f32 {
        1.0 - self.rotation.quaternion().dot(other.rotation.quaternion())
    }
}

/// Per-die roll state machine.
///
/// `value` only changes on a settle transition (not settled -> settled),
/// never mid-roll. `last_sample` is `None` until the first tick of a roll has
/// been sampled, which prevents a false settle on tick one.
#[derive(Clone, Debug)]
pub struct RollState {
    /// The rolling flag as seen on the previous tick, used to detect the
    /// rising edge that fires the roll impulse.
    pub was_rolling: bool,
    pub settled: bool,
    pub last_sample: Option<RigidBodySample>,
    pub value: u8,
}

impl Default for RollState {
    fn default() -> Self {
        Self {
            was_rolling: false,
            settled: false,
            last_sample: None,
            value: 1,
        }
    }
}

/// One die on the table: its face-normal table plus its roll state.
#[derive(Clone, Debug)]
pub struct Die {
    pub face_normals: Vec<(Vector3<f32>, u8)>,
    pub state: RollState,
}

impl Die {
    pub fn new() -> Self {
        Self {
            face_normals: d6_face_normals(),
            state: RollState::default(),
        }
    }

    /// Create a die whose starting face value is already known (e.g. seeded
    /// from a player's existing hand).
    pub fn with_value(value: u8) -> Self {
        let mut die = Self::new();
        die.state.value = value;
        die
    }

    pub fn value(&self) -> u8 {
        self.state.value
    }

    pub fn is_settled(&self) -> bool {
        self.state.settled
    }
}

impl Default for Die {
    fn default() -> Self {
        Self::new()
    }
}

/// Local-space face normals of a standard d6 and the value painted on each
/// face, in fixed iteration order +X, -X, +Y, -Y, +Z, -Z.
///
/// Opposite faces sum to 7. The order matters: face resolution breaks exact
/// dot-product ties by keeping the first candidate seen.
pub fn d6_face_normals() -> Vec<(Vector3<f32>, u8)> {
    vec![
        (Vector3::x(), 6),
        (-Vector3::x(), 1),
        (Vector3::y(), 5),
        (-Vector3::y(), 2),
        (Vector3::z(), 3),
        (-Vector3::z(), 4),
    ]
}

/// Event emitted when a die settles: which die, and the face it landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettledDie {
    pub index: usize,
    pub value: u8,
}
