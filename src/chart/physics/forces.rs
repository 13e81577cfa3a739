use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadNode;

const COINCIDENT_OFFSET: f32 = 1e-3;

#[derive(Clone, Copy)]
pub(super) struct RepulsionParams {
    pub(super) alpha: f32,
    pub(super) distance_min_sq: f32,
    pub(super) theta_sq: f32,
}

/// Deterministic nudge for bodies sharing a position. Antisymmetric in its
/// arguments so the pair separates.
fn coincident_offset(index: usize, other: usize) -> Vec2 {
    let (low, high, sign) = if index < other {
        (index, other, 1.0)
    } else {
        (other, index, -1.0)
    };
    let angle = ((low as f32) * 0.618_034 + (high as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin()) * (COINCIDENT_OFFSET * sign)
}

/// Velocity change per unit of source charge for a body at `delta` from it.
fn charge_response(delta: Vec2, params: RepulsionParams) -> Vec2 {
    let mut distance_sq = delta.length_sq();
    if distance_sq < params.distance_min_sq {
        distance_sq = (params.distance_min_sq * distance_sq).sqrt();
    }
    delta * (params.alpha / distance_sq)
}

fn separation(positions: &[Vec2], index: usize, other: usize) -> Vec2 {
    let delta = positions[other] - positions[index];
    if delta.length_sq() <= COINCIDENT_OFFSET * COINCIDENT_OFFSET {
        coincident_offset(index, other)
    } else {
        delta
    }
}

pub(super) fn accumulate_pairwise(
    positions: &[Vec2],
    charges: &[f32],
    params: RepulsionParams,
    forces: &mut [Vec2],
) {
    for index in 0..positions.len() {
        for other in (index + 1)..positions.len() {
            let delta = separation(positions, index, other);
            let response = charge_response(delta, params);
            forces[index] += response * charges[other];
            forces[other] -= response * charges[index];
        }
    }
}

pub(super) fn accumulate_repulsion_for_node(
    node: &QuadNode,
    index: usize,
    positions: &[Vec2],
    charges: &[f32],
    params: RepulsionParams,
    force: &mut Vec2,
) {
    if node.charge == 0.0 {
        return;
    }

    let point = positions[index];

    if node.is_leaf() {
        for &other_index in &node.indices {
            if other_index == index {
                continue;
            }
            let delta = separation(positions, index, other_index);
            *force += charge_response(delta, params) * charges[other_index];
        }
        return;
    }

    let delta = node.center - point;
    let distance_sq = delta.length_sq();
    let side = node.bounds.size;
    let can_approximate =
        !node.bounds.contains(point) && (side * side) < params.theta_sq * distance_sq;

    if can_approximate {
        *force += charge_response(delta, params) * node.charge;
        return;
    }

    for child in node.children.iter().flatten() {
        accumulate_repulsion_for_node(child, index, positions, charges, params, force);
    }
}
