//! Per-tick die update: roll impulse on the rising edge of the rolling flag,
//! settle detection by differencing consecutive pose samples, and face
//! resolution once the die has come to rest.

use nalgebra::{UnitQuaternion, Vector3};
use rand::Rng;
use tracing::debug;

use crate::dice3d::port::BodyPort;
use crate::dice3d::types::{Die, RigidBodySample, RollState};

/// Motion threshold below which two consecutive samples count as at rest.
/// Applied to both the position delta and the orientation-alignment deficit.
pub const SETTLE_THRESHOLD: f32 = 0.001;

/// Advance one die by one simulation tick.
///
/// Runs after the physics engine has stepped the body. On the rising edge of
/// `rolling` the roll impulse fires; while `rolling` stays true the settle
/// detector compares the current pose against the previous tick's. The edge
/// is tracked across calls, so `rolling` must be observed false for at least
/// one call before the next roll can fire. Returns the resolved face value
/// on the tick the die settles, `None` otherwise.
pub fn update_die(
    die: &mut Die,
    body: &mut impl BodyPort,
    rolling: bool,
    rng: &mut impl Rng,
) -> Option<u8> {
    let mut resolved = None;

    if rolling && !die.state.was_rolling {
        roll_die(&mut die.state, body, rng);
    }

    if rolling {
        let sample = RigidBodySample {
            position: body.position(),
            rotation: body.orientation(),
        };
        if check_die_settled(&mut die.state, sample) {
            die.state.value = determine_up_face(&sample.rotation, &die.face_normals);
            resolved = Some(die.state.value);
        }
    }

    die.state.was_rolling = rolling;
    resolved
}

/// Kick off a new roll: clear the previous roll's settle state and throw the
/// die with a randomized impulse pair.
///
/// Linear impulse: x and z uniform in [-1, 1), y uniform in [3, 4) so the die
/// always hops off the table. Angular impulse: each axis uniform in [-5, 5).
/// Fires once per rising edge; a flickering flag legitimately rethrows.
pub fn roll_die(state: &mut RollState, body: &mut impl BodyPort, rng: &mut impl Rng) {
    state.settled = false;
    state.last_sample = None;

    let impulse = Vector3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(3.0..4.0),
        rng.gen_range(-1.0..1.0),
    );
    let torque = Vector3::new(
        rng.gen_range(-5.0..5.0),
        rng.gen_range(-5.0..5.0),
        rng.gen_range(-5.0..5.0),
    );

    body.apply_impulse(impulse, true);
    body.apply_torque_impulse(torque, true);

    debug!(
        "roll impulse applied: linear ({:.2}, {:.2}, {:.2}), angular ({:.2}, {:.2}, {:.2})",
        impulse.x, impulse.y, impulse.z, torque.x, torque.y, torque.z
    );
}

/// Compare the current sample against the previous tick's and update the
/// settle state. Returns true only on the settle transition, so the face
/// resolver runs exactly once per landing.
///
/// The first sampled tick of a roll has nothing to compare against and can
/// never settle; it only records the sample. A die that wobbles back above
/// the threshold is marked unsettled again and may re-fire on a later rest.
pub fn check_die_settled(state: &mut RollState, sample: RigidBodySample) -> bool {
    let mut settled_now = false;

    if let Some(last) = &state.last_sample {
        let position_delta = last.position_delta(&sample);
        let orientation_delta = last.orientation_delta(&sample);

        if position_delta < SETTLE_THRESHOLD && orientation_delta < SETTLE_THRESHOLD {
            if !state.settled {
                state.settled = true;
                settled_now = true;
            }
        } else {
            state.settled = false;
        }
    }

    state.last_sample = Some(sample);
    settled_now
}

/// Determine the upward-facing value of a die from its orientation.
///
/// Rotates each local face normal into world space and keeps the one most
/// aligned with world up (0, 1, 0). Exact ties keep the first candidate in
/// the table's fixed order.
pub fn determine_up_face(
    rotation: &UnitQuaternion<f32>,
    face_normals: &[(Vector3<f32>, u8)],
) -> u8 {
    let rot = rotation.to_rotation_matrix();
    let up = Vector3::y();

    let mut best_match = 1;
    let mut best_dot = -2.0_f32;

    for (normal, value) in face_normals {
        let world_normal = rot * *normal;
        let dot = world_normal.dot(&up);

        if dot > best_dot {
            best_dot = dot;
            best_match = *value;
        }
    }

    best_match
}
