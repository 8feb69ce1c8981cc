//! Physics table scene
//!
//! Owns the rapier world for one table: a fixed floor with four walls, a row
//! of d6 rigid bodies, and the fixed-timestep loop that steps the simulation
//! and runs each die's per-tick update.

use nalgebra::{UnitQuaternion, Vector3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rapier3d::prelude::*;
use tracing::info;

use crate::dice3d::systems::update_die;
use crate::dice3d::types::{Die, SettledDie};

/// Table footprint; dice spawn near the center, so the walls mostly matter
/// for wild bounces.
const TABLE_SIZE: f32 = 20.0;
const FLOOR_THICKNESS: f32 = 0.5;
const WALL_HEIGHT: f32 = 2.0;
const WALL_THICKNESS: f32 = 0.5;

const SPAWN_HEIGHT: f32 = 5.0;
const DIE_HALF_EXTENT: f32 = 0.5;
const DIE_RESTITUTION: f32 = 0.7;
const DIE_FRICTION: f32 = 0.5;
const TABLE_RESTITUTION: f32 = 0.2;
const TABLE_FRICTION: f32 = 0.8;

/// Scene construction parameters.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Number of dice on the table.
    pub dice: usize,
    /// RNG seed for the roll impulses; entropy-seeded when `None`.
    pub seed: Option<u64>,
    /// Simulation timestep in seconds.
    pub timestep: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            dice: 5,
            seed: None,
            timestep: 1.0 / 60.0,
        }
    }
}

struct DieBody {
    handle: RigidBodyHandle,
    die: Die,
}

/// A dice table backed by a rapier rigid-body world.
pub struct DiceScene {
    gravity: Vector3<f32>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    rng: StdRng,
    dice: Vec<DieBody>,
}

impl DiceScene {
    pub fn new(config: SceneConfig) -> Self {
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        spawn_table(&mut bodies, &mut colliders);

        let mut dice = Vec::with_capacity(config.dice);
        for index in 0..config.dice {
            let handle = spawn_die(&mut bodies, &mut colliders, spawn_position(index, config.dice));
            dice.push(DieBody {
                handle,
                die: Die::new(),
            });
        }

        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            gravity: Vector3::new(0.0, -9.81, 0.0),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rng,
            dice,
        }
    }

    /// Advance the world by one tick and run every die's update.
    ///
    /// `rolling` supplies each die's rolling flag by index, so callers can
    /// exclude held dice without handing the whole game state over. Throws
    /// fire on the rising edge of the flag: a die only rethrows after a step
    /// has observed its flag low. Returns the dice that settled on this tick.
    pub fn step(&mut self, rolling: impl Fn(usize) -> bool) -> Vec<SettledDie> {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        let mut settled = Vec::new();
        for (index, die_body) in self.dice.iter_mut().enumerate() {
            // Body not in the set: skip this die's tick entirely.
            let Some(body) = self.bodies.get_mut(die_body.handle) else {
                continue;
            };

            if let Some(value) = update_die(&mut die_body.die, body, rolling(index), &mut self.rng)
            {
                info!("Die {} landed on: {}", index, value);
                settled.push(SettledDie { index, value });
            }
        }
        settled
    }

    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    pub fn dice_count(&self) -> usize {
        self.dice.len()
    }

    pub fn die_value(&self, index: usize) -> Option<u8> {
        self.dice.get(index).map(|d| d.die.value())
    }

    /// Face values of every die, in table order.
    pub fn values(&self) -> Vec<u8> {
        self.dice.iter().map(|d| d.die.value()).collect()
    }

    pub fn die_settled(&self, index: usize) -> Option<bool> {
        self.dice.get(index).map(|d| d.die.is_settled())
    }

    pub fn all_settled(&self) -> bool {
        self.dice.iter().all(|d| d.die.is_settled())
    }

    /// Current world pose of a die.
    pub fn die_pose(&self, index: usize) -> Option<(Vector3<f32>, UnitQuaternion<f32>)> {
        let die_body = self.dice.get(index)?;
        let body = self.bodies.get(die_body.handle)?;
        Some((*body.translation(), *body.rotation()))
    }
}

/// Fixed floor and four walls enclosing the play area.
fn spawn_table(bodies: &mut RigidBodySet, colliders: &mut ColliderSet) {
    let half_size = TABLE_SIZE / 2.0;

    // (position, full size) per slab, floor first.
    let slabs = [
        (
            Vector3::new(0.0, -FLOOR_THICKNESS / 2.0, 0.0),
            Vector3::new(TABLE_SIZE, FLOOR_THICKNESS, TABLE_SIZE),
        ),
        (
            Vector3::new(0.0, WALL_HEIGHT / 2.0, -half_size),
            Vector3::new(TABLE_SIZE, WALL_HEIGHT, WALL_THICKNESS),
        ),
        (
            Vector3::new(0.0, WALL_HEIGHT / 2.0, half_size),
            Vector3::new(TABLE_SIZE, WALL_HEIGHT, WALL_THICKNESS),
        ),
        (
            Vector3::new(-half_size, WALL_HEIGHT / 2.0, 0.0),
            Vector3::new(WALL_THICKNESS, WALL_HEIGHT, TABLE_SIZE),
        ),
        (
            Vector3::new(half_size, WALL_HEIGHT / 2.0, 0.0),
            Vector3::new(WALL_THICKNESS, WALL_HEIGHT, TABLE_SIZE),
        ),
    ];

    for (position, size) in slabs {
        let body = bodies.insert(RigidBodyBuilder::fixed().translation(position).build());
        colliders.insert_with_parent(
            ColliderBuilder::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0)
                .restitution(TABLE_RESTITUTION)
                .friction(TABLE_FRICTION)
                .build(),
            body,
            bodies,
        );
    }
}

fn spawn_die(
    bodies: &mut RigidBodySet,
    colliders: &mut ColliderSet,
    position: Vector3<f32>,
) -> RigidBodyHandle {
    let handle = bodies.insert(RigidBodyBuilder::dynamic().translation(position).build());
    colliders.insert_with_parent(
        ColliderBuilder::cuboid(DIE_HALF_EXTENT, DIE_HALF_EXTENT, DIE_HALF_EXTENT)
            .restitution(DIE_RESTITUTION)
            .friction(DIE_FRICTION)
            .build(),
        handle,
        bodies,
    );
    handle
}

/// Dice drop in a centered row above the table; five dice land on
/// x in {-2, -1, 0, 1, 2}.
fn spawn_position(index: usize, count: usize) -> Vector3<f32> {
    let x = index as f32 - (count as f32 - 1.0) / 2.0;
    Vector3::new(x, SPAWN_HEIGHT, 0.0)
}
