use eframe::egui::{Vec2, vec2};

use crate::util::fallback_angle;

use super::quadtree::QuadNode;

const COINCIDENT_DISTANCE_SQ: f32 = 1e-9;
const COINCIDENT_NUDGE: f32 = 1e-3;
const OVERLAP_TOLERANCE: f32 = 1e-4;
const OVERLAP_SLACK: f32 = 1e-3;

#[derive(Clone, Copy)]
pub(super) struct ChargeParams {
    pub(super) strength: f32,
    pub(super) alpha: f32,
    pub(super) theta: f32,
    pub(super) distance_min_sq: f32,
}

#[derive(Default)]
pub(super) struct CollisionScratch {
    predicted: Vec<Vec2>,
    near: Vec<usize>,
}

fn separation(point: Vec2, other: Vec2, from: usize, to: usize) -> Vec2 {
    let delta = point - other;
    if delta.length_sq() > COINCIDENT_DISTANCE_SQ {
        delta
    } else {
        let angle = fallback_angle(from, to);
        vec2(angle.cos(), angle.sin()) * COINCIDENT_NUDGE
    }
}

/// Uniform many-body repulsion, inverse to distance. Far cells are folded
/// into their center of mass once `side / distance < theta`.
pub(super) fn accumulate_charge(
    node: &QuadNode,
    index: usize,
    positions: &[Vec2],
    params: ChargeParams,
    velocity: &mut Vec2,
) {
    if node.mass <= 0.0 {
        return;
    }

    let point = positions[index];
    let scale = params.strength * params.alpha;

    if node.is_leaf() {
        for &other_index in &node.indices {
            if other_index == index {
                continue;
            }
            let delta = separation(point, positions[other_index], index, other_index);
            let distance_sq = delta.length_sq().max(params.distance_min_sq);
            *velocity += delta * (scale / distance_sq);
        }
        return;
    }

    let delta = point - node.center_of_mass;
    let distance_sq = delta.length_sq();
    let side = node.bounds.side_length();
    let can_approximate = !node.bounds.contains(point)
        && (side * side) < (params.theta * params.theta * distance_sq);

    if can_approximate {
        *velocity += delta * ((scale * node.mass) / distance_sq.max(params.distance_min_sq));
        return;
    }

    for child in node.children.iter().flatten() {
        accumulate_charge(child, index, positions, params, velocity);
    }
}

pub(super) fn apply_centering(positions: &mut [Vec2], center: Vec2) {
    if positions.is_empty() {
        return;
    }

    let mut mean = Vec2::ZERO;
    for position in positions.iter() {
        mean += *position;
    }
    mean /= positions.len() as f32;

    let shift = center - mean;
    for position in positions.iter_mut() {
        *position += shift;
    }
}

pub(super) fn apply_collisions(
    positions: &[Vec2],
    velocities: &mut [Vec2],
    radii: &[f32],
    strength: f32,
    scratch: &mut CollisionScratch,
) {
    scratch.predicted.clear();
    scratch.predicted.extend(
        positions
            .iter()
            .zip(velocities.iter())
            .map(|(position, velocity)| *position + *velocity),
    );

    let Some(tree) = QuadNode::build(&scratch.predicted, radii) else {
        return;
    };

    for index in 0..positions.len() {
        let radius = radii[index];
        scratch.near.clear();
        tree.collect_near(scratch.predicted[index], radius, &mut scratch.near);

        for &other in &scratch.near {
            if other <= index {
                continue;
            }

            let reach = radius + radii[other];
            let delta = separation(
                positions[index] + velocities[index],
                positions[other] + velocities[other],
                index,
                other,
            );
            let distance_sq = delta.length_sq();
            if distance_sq >= reach * reach {
                continue;
            }

            let distance = distance_sq.sqrt();
            let push = delta * (((reach - distance) / distance) * strength);
            let radius_sq = radius * radius;
            let other_sq = radii[other] * radii[other];
            let share = other_sq / (radius_sq + other_sq);

            velocities[index] += push * share;
            velocities[other] -= push * (1.0 - share);
        }
    }
}

/// Moves overlapping circles apart directly until no pair overlaps. Returns
/// `false` if overlaps remain after `max_passes`.
pub(super) fn resolve_overlaps(
    positions: &mut [Vec2],
    radii: &[f32],
    max_passes: usize,
    near: &mut Vec<usize>,
) -> bool {
    for _ in 0..max_passes {
        let Some(tree) = QuadNode::build(positions, radii) else {
            return true;
        };

        let mut moved = false;
        for index in 0..positions.len() {
            let radius = radii[index];
            near.clear();
            tree.collect_near(positions[index], radius, near);

            for &other in near.iter() {
                if other <= index {
                    continue;
                }

                let reach = radius + radii[other];
                let delta = separation(positions[index], positions[other], index, other);
                let distance = delta.length();
                let overlap = reach - distance;
                if overlap <= OVERLAP_TOLERANCE {
                    continue;
                }

                let correction = (delta / distance) * (overlap + OVERLAP_SLACK);
                let radius_sq = radius * radius;
                let other_sq = radii[other] * radii[other];
                let share = other_sq / (radius_sq + other_sq);

                positions[index] += correction * share;
                positions[other] -= correction * (1.0 - share);
                moved = true;
            }
        }

        if !moved {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_pushes_nodes_apart() {
        let positions = vec![vec2(0.0, 0.0), vec2(10.0, 0.0)];
        let tree = QuadNode::build(&positions, &[1.0, 1.0]).unwrap();
        let params = ChargeParams {
            strength: 30.0,
            alpha: 1.0,
            theta: 0.9,
            distance_min_sq: 1.0,
        };

        let mut left = Vec2::ZERO;
        let mut right = Vec2::ZERO;
        accumulate_charge(&tree, 0, &positions, params, &mut left);
        accumulate_charge(&tree, 1, &positions, params, &mut right);

        assert!(left.x < 0.0);
        assert!(right.x > 0.0);
        assert!((left.x + right.x).abs() < 1e-5);
    }

    #[test]
    fn charge_falls_off_with_distance() {
        let params = ChargeParams {
            strength: 1.0,
            alpha: 1.0,
            theta: 0.9,
            distance_min_sq: 1.0,
        };
        let push_at = |distance: f32| {
            let positions = vec![vec2(0.0, 0.0), vec2(distance, 0.0)];
            let tree = QuadNode::build(&positions, &[1.0, 1.0]).unwrap();
            let mut velocity = Vec2::ZERO;
            accumulate_charge(&tree, 1, &positions, params, &mut velocity);
            velocity.x
        };

        let near = push_at(10.0);
        let far = push_at(20.0);
        assert!((near - 0.1).abs() < 1e-5);
        assert!((near / far - 2.0).abs() < 1e-4);
    }

    #[test]
    fn centering_moves_mean_to_center() {
        let mut positions = vec![vec2(0.0, 0.0), vec2(10.0, 20.0), vec2(-4.0, 7.0)];
        apply_centering(&mut positions, vec2(300.0, 300.0));

        let mean = positions.iter().fold(Vec2::ZERO, |sum, p| sum + *p) / 3.0;
        assert!((mean - vec2(300.0, 300.0)).length() < 1e-3);
        assert!(((positions[1] - positions[0]) - vec2(10.0, 20.0)).length() < 1e-4);
    }

    #[test]
    fn collisions_separate_overlapping_pair() {
        let positions = vec![vec2(0.0, 0.0), vec2(4.0, 0.0)];
        let mut velocities = vec![Vec2::ZERO; 2];
        let mut scratch = CollisionScratch::default();

        apply_collisions(&positions, &mut velocities, &[5.0, 5.0], 1.0, &mut scratch);

        assert!(velocities[0].x < 0.0);
        assert!(velocities[1].x > 0.0);
        let next_distance = (positions[1] + velocities[1]) - (positions[0] + velocities[0]);
        assert!((next_distance.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn resolve_separates_coincident_circles() {
        let mut positions = vec![vec2(50.0, 50.0); 6];
        let radii = vec![3.0, 5.0, 8.0, 3.0, 12.0, 1.0];
        let mut near = Vec::new();

        assert!(resolve_overlaps(&mut positions, &radii, 2_000, &mut near));

        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let distance = (positions[i] - positions[j]).length();
                assert!(distance + 1e-3 >= radii[i] + radii[j]);
            }
        }
    }
}
