mod forces;
mod quadtree;

use eframe::egui::{Vec2, vec2};
use tracing::{debug, warn};

use forces::{
    ChargeParams, CollisionScratch, accumulate_charge, apply_centering, apply_collisions,
    resolve_overlaps,
};
use quadtree::QuadNode;

const INITIAL_RADIUS: f32 = 10.0;
const DISTANCE_MIN_SQ: f32 = 1.0;
const COLLISION_STRENGTH: f32 = 1.0;

#[derive(Clone, Copy, Debug)]
pub struct SimulationParams {
    pub center: Vec2,
    pub charge_strength: f32,
    pub theta: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    pub velocity_decay: f32,
    pub settle_passes: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            center: vec2(300.0, 300.0),
            charge_strength: 1.0,
            theta: 0.9,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            settle_passes: 4_000,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LayoutNode {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

#[derive(Default)]
struct PhysicsScratch {
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    radii: Vec<f32>,
    collision: CollisionScratch,
    near: Vec<usize>,
}

pub struct Simulation {
    nodes: Vec<LayoutNode>,
    params: SimulationParams,
    alpha: f32,
    ticks: usize,
    settled: bool,
    scratch: PhysicsScratch,
}

impl Simulation {
    pub fn new(radii: &[f32], params: SimulationParams) -> Self {
        let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
        let nodes = radii
            .iter()
            .enumerate()
            .map(|(index, &radius)| {
                let distance = INITIAL_RADIUS * (0.5 + index as f32).sqrt();
                let angle = index as f32 * golden_angle;
                LayoutNode {
                    position: params.center + vec2(angle.cos(), angle.sin()) * distance,
                    velocity: Vec2::ZERO,
                    radius,
                }
            })
            .collect::<Vec<_>>();

        Self {
            settled: nodes.is_empty(),
            nodes,
            params,
            alpha: 1.0,
            ticks: 0,
            scratch: PhysicsScratch::default(),
        }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advances one tick. Returns `true` while the layout is still moving.
    pub fn step(&mut self) -> bool {
        if self.settled {
            return false;
        }

        self.alpha *= 1.0 - self.params.alpha_decay;
        self.ticks += 1;

        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch.velocities.clear();
        scratch.radii.clear();
        for node in &self.nodes {
            scratch.positions.push(node.position);
            scratch.velocities.push(node.velocity);
            scratch.radii.push(node.radius);
        }

        if let Some(tree) = QuadNode::build(&scratch.positions, &scratch.radii) {
            let params = ChargeParams {
                strength: self.params.charge_strength,
                alpha: self.alpha,
                theta: self.params.theta,
                distance_min_sq: DISTANCE_MIN_SQ,
            };
            for (index, velocity) in scratch.velocities.iter_mut().enumerate() {
                accumulate_charge(&tree, index, &scratch.positions, params, velocity);
            }
        }

        apply_centering(&mut scratch.positions, self.params.center);
        apply_collisions(
            &scratch.positions,
            &mut scratch.velocities,
            &scratch.radii,
            COLLISION_STRENGTH,
            &mut scratch.collision,
        );

        let retain = 1.0 - self.params.velocity_decay;
        for ((node, position), velocity) in self
            .nodes
            .iter_mut()
            .zip(&scratch.positions)
            .zip(&scratch.velocities)
        {
            node.velocity = *velocity * retain;
            node.position = *position + node.velocity;
        }

        if self.alpha < self.params.alpha_min {
            self.settle();
            return false;
        }

        true
    }

    fn settle(&mut self) {
        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch.radii.clear();
        for node in &self.nodes {
            scratch.positions.push(node.position);
            scratch.radii.push(node.radius);
        }

        let resolved = resolve_overlaps(
            &mut scratch.positions,
            &scratch.radii,
            self.params.settle_passes,
            &mut scratch.near,
        );
        if !resolved {
            warn!(
                nodes = self.nodes.len(),
                "layout still has overlapping bubbles after settling"
            );
        }

        for (node, position) in self.nodes.iter_mut().zip(&scratch.positions) {
            node.position = *position;
            node.velocity = Vec2::ZERO;
        }

        self.settled = true;
        debug!(ticks = self.ticks, nodes = self.nodes.len(), "layout settled");
    }
}
