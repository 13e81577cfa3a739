mod forces;
mod quadtree;

use eframe::egui::Vec2;

use crate::config::LayoutConfig;

use super::nodes::VisualNode;
use forces::{RepulsionParams, accumulate_pairwise, accumulate_repulsion_for_node};
use quadtree::QuadNode;

/// Maps a node to the x-coordinate the active mode pulls it toward.
pub type TargetFn = Box<dyn Fn(&VisualNode) -> f32>;

/// Called with the full node set after every tick.
pub type Observer = Box<dyn FnMut(&[VisualNode])>;

#[derive(Clone, Copy, Debug)]
pub struct StepParams {
    pub strength: f32,
    pub velocity_decay: f32,
    pub alpha: f32,
    pub center_y: f32,
    pub theta: f32,
    pub distance_min: f32,
    pub max_speed: f32,
}

#[derive(Default)]
pub struct ForceScratch {
    forces: Vec<Vec2>,
    positions: Vec<Vec2>,
    charges: Vec<f32>,
}

/// Advances every node by one tick: positioning pull, many-body repulsion with
/// charge `-radius^2 * strength`, then damped integration.
pub fn step(
    nodes: &mut [VisualNode],
    target_x: &dyn Fn(&VisualNode) -> f32,
    params: StepParams,
    scratch: &mut ForceScratch,
) {
    let node_count = nodes.len();
    if node_count == 0 {
        return;
    }

    scratch.forces.resize(node_count, Vec2::ZERO);
    scratch.forces.fill(Vec2::ZERO);
    scratch.positions.clear();
    scratch.charges.clear();
    for node in nodes.iter() {
        scratch.positions.push(node.pos);
        scratch
            .charges
            .push(-(node.radius * node.radius) * params.strength);
    }

    let forces = &mut scratch.forces;
    let positions = &scratch.positions;
    let charges = &scratch.charges;
    let alpha = params.alpha;

    for (node, force) in nodes.iter().zip(forces.iter_mut()) {
        force.x += (target_x(node) - node.pos.x) * params.strength * alpha;
        force.y += (params.center_y - node.pos.y) * params.strength * alpha;
    }

    if node_count > 1 {
        let repulsion = RepulsionParams {
            alpha,
            distance_min_sq: params.distance_min * params.distance_min,
            theta_sq: params.theta * params.theta,
        };

        if params.theta > 0.0
            && let Some(tree) = QuadNode::build(positions, charges)
        {
            for (index, force) in forces.iter_mut().enumerate() {
                accumulate_repulsion_for_node(&tree, index, positions, charges, repulsion, force);
            }
        } else {
            accumulate_pairwise(positions, charges, repulsion, forces);
        }
    }

    let retained = (1.0 - params.velocity_decay).clamp(0.0, 1.0);
    let max_speed_sq = params.max_speed * params.max_speed;
    for (node, force) in nodes.iter_mut().zip(forces.iter()) {
        let mut velocity = (node.velocity + *force) * retained;
        if !velocity.is_finite() {
            velocity = Vec2::ZERO;
        }

        let speed_sq = velocity.length_sq();
        if speed_sq > max_speed_sq {
            velocity *= params.max_speed / speed_sq.sqrt();
        }

        node.velocity = velocity;
        node.pos += velocity;
    }
}

/// Owns the node set and drives [`step`] on an energy (alpha) schedule that
/// cools toward zero and halts below `alpha_min`.
pub struct LayoutEngine {
    nodes: Vec<VisualNode>,
    config: LayoutConfig,
    center_y: f32,
    target_x: TargetFn,
    alpha: f32,
    running: bool,
    ticks: u64,
    pending_secs: f32,
    scratch: ForceScratch,
    observer: Option<Observer>,
}

impl LayoutEngine {
    /// Starts stopped; call [`LayoutEngine::restart`] to begin relaxing.
    pub fn new(
        nodes: Vec<VisualNode>,
        config: LayoutConfig,
        center_y: f32,
        target_x: TargetFn,
    ) -> Self {
        Self {
            nodes,
            config,
            center_y,
            target_x,
            alpha: 1.0,
            running: false,
            ticks: 0,
            pending_secs: 0.0,
            scratch: ForceScratch::default(),
            observer: None,
        }
    }

    pub fn nodes(&self) -> &[VisualNode] {
        &self.nodes
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Cooled below `alpha_min` on its own, as opposed to stopped early.
    pub fn is_settled(&self) -> bool {
        !self.running && self.alpha < self.config.alpha_min
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = Some(observer);
    }

    pub fn restart(&mut self, target_x: TargetFn) {
        self.target_x = target_x;
        self.alpha = 1.0;
        self.running = true;
        self.pending_secs = 0.0;
        log::debug!("layout restarted with {} nodes", self.nodes.len());
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.pending_secs = 0.0;
    }

    /// Runs one tick if the engine is running. Returns whether it is still running.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.alpha += (0.0 - self.alpha) * self.config.alpha_decay;
        let params = StepParams {
            strength: self.config.force_strength,
            velocity_decay: self.config.velocity_decay,
            alpha: self.alpha,
            center_y: self.center_y,
            theta: self.config.theta,
            distance_min: self.config.distance_min,
            max_speed: self.config.max_speed,
        };
        step(
            &mut self.nodes,
            self.target_x.as_ref(),
            params,
            &mut self.scratch,
        );
        self.ticks += 1;

        if let Some(observer) = self.observer.as_mut() {
            observer(&self.nodes);
        }

        if self.alpha < self.config.alpha_min {
            self.running = false;
            log::debug!(
                "layout settled after {} ticks (kinetic energy {:.5})",
                self.ticks,
                self.kinetic_energy()
            );
        }

        self.running
    }

    /// Host-loop entry point: converts elapsed seconds into fixed ticks.
    pub fn advance(&mut self, delta_seconds: f32) -> usize {
        if !self.running {
            self.pending_secs = 0.0;
            return 0;
        }

        let interval = 1.0 / self.config.ticks_per_second.max(1.0);
        let max_ticks = self.config.max_ticks_per_advance.max(1);
        self.pending_secs += delta_seconds.max(0.0);

        let mut ran = 0;
        while self.pending_secs >= interval && ran < max_ticks {
            self.pending_secs -= interval;
            ran += 1;
            if !self.tick() {
                break;
            }
        }

        if ran == max_ticks {
            self.pending_secs = self.pending_secs.min(interval);
        }
        ran
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.nodes
            .iter()
            .map(|node| node.velocity.length_sq())
            .sum()
    }
}
