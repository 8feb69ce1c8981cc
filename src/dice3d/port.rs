//! Port trait for the per-die update to read poses and apply roll impulses
//! without depending on a specific physics crate.

use nalgebra::{UnitQuaternion, Vector3};
use rapier3d::dynamics::RigidBody;

/// Narrow view of one rigid body as the roll logic consumes it: two pose
/// reads and the two one-shot impulse applications.
pub trait BodyPort {
    fn position(&self) -> Vector3<f32>;
    fn orientation(&self) -> UnitQuaternion<f32>;
    fn apply_impulse(&mut self, impulse: Vector3<f32>, wake: bool);
    fn apply_torque_impulse(&mut self, torque: Vector3<f32>, wake: bool);
}

impl BodyPort for RigidBody {
    fn position(&self) -> Vector3<f32> {
        *self.translation()
    }

    fn orientation(&self) -> UnitQuaternion<f32> {
        *self.rotation()
    }

    fn apply_impulse(&mut self, impulse: Vector3<f32>, wake: bool) {
        RigidBody::apply_impulse(self, impulse, wake);
    }

    fn apply_torque_impulse(&mut self, torque: Vector3<f32>, wake: bool) {
        RigidBody::apply_torque_impulse(self, torque, wake);
    }
}
