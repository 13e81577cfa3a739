use eframe::egui::{Vec2, vec2};

const QUADTREE_LEAF_CAPACITY: usize = 12;
const QUADTREE_MAX_DEPTH: usize = 10;

/// Square cell anchored at its top-left corner. Quadrants are numbered by bit:
/// bit 0 set for the right half, bit 1 set for the bottom half.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct QuadBounds {
    pub(super) min: Vec2,
    pub(super) size: f32,
}

impl QuadBounds {
    /// Smallest square (padded by one unit) covering every point, or `None`
    /// when any coordinate is not finite.
    fn covering(points: &[Vec2]) -> Option<Self> {
        if !points.iter().all(|point| point.is_finite()) {
            return None;
        }
        let (first, rest) = points.split_first()?;
        let (lo, hi) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), point| (lo.min(*point), hi.max(*point)));

        let extent = hi - lo;
        let size = extent.x.max(extent.y).max(1.0) + 2.0;
        let padding = (vec2(size, size) - extent) * 0.5;
        Some(Self {
            min: lo - padding,
            size,
        })
    }

    fn mid(self) -> Vec2 {
        self.min + vec2(self.size, self.size) * 0.5
    }

    pub(super) fn contains(self, point: Vec2) -> bool {
        let max = self.min + vec2(self.size, self.size);
        (self.min.x..=max.x).contains(&point.x) && (self.min.y..=max.y).contains(&point.y)
    }

    fn quadrant_of(self, point: Vec2) -> usize {
        let mid = self.mid();
        usize::from(point.x >= mid.x) | (usize::from(point.y >= mid.y) << 1)
    }

    fn quadrant(self, index: usize) -> Self {
        let half = self.size * 0.5;
        let step = vec2((index & 1) as f32, (index >> 1) as f32) * half;
        Self {
            min: self.min + step,
            size: half,
        }
    }
}

/// Barnes-Hut cell. `charge` is the summed charge of every body below it and
/// `center` their centroid weighted by absolute charge.
pub(super) struct QuadNode {
    pub(super) bounds: QuadBounds,
    pub(super) center: Vec2,
    pub(super) charge: f32,
    pub(super) indices: Vec<usize>,
    pub(super) children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    pub(super) fn build(positions: &[Vec2], charges: &[f32]) -> Option<Self> {
        let bounds = QuadBounds::covering(positions)?;
        let indices = (0..positions.len()).collect::<Vec<_>>();
        Some(Self::build_node(bounds, indices, positions, charges, 0))
    }

    fn build_node(
        bounds: QuadBounds,
        indices: Vec<usize>,
        positions: &[Vec2],
        charges: &[f32],
        depth: usize,
    ) -> Self {
        let mut weighted = Vec2::ZERO;
        let mut weight = 0.0_f32;
        let mut charge = 0.0_f32;
        let mut centroid = Vec2::ZERO;
        for &index in &indices {
            let body_weight = charges[index].abs();
            weighted += positions[index] * body_weight;
            weight += body_weight;
            charge += charges[index];
            centroid += positions[index];
        }

        let center = if weight > 0.0 {
            weighted / weight
        } else if !indices.is_empty() {
            centroid / indices.len() as f32
        } else {
            bounds.mid()
        };

        let mut node = Self {
            bounds,
            center,
            charge,
            indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= QUADTREE_MAX_DEPTH || node.indices.len() <= QUADTREE_LEAF_CAPACITY {
            return node;
        }

        let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
        for &index in &node.indices {
            let quadrant = bounds.quadrant_of(positions[index]);
            buckets[quadrant].push(index);
        }

        let non_empty = buckets.iter().filter(|bucket| !bucket.is_empty()).count();
        if non_empty <= 1 {
            return node;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }

            let child_bounds = bounds.quadrant(quadrant);
            node.children[quadrant] = Some(Box::new(Self::build_node(
                child_bounds,
                bucket,
                positions,
                charges,
                depth + 1,
            )));
        }
        node.indices.clear();
        node
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(|child| child.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(count: usize) -> Vec<Vec2> {
        (0..count)
            .map(|index| vec2((index % 10) as f32 * 15.0, (index / 10) as f32 * 15.0))
            .collect()
    }

    fn leaf_indices(node: &QuadNode, out: &mut Vec<usize>) {
        out.extend(node.indices.iter().copied());
        for child in node.children.iter().flatten() {
            leaf_indices(child, out);
        }
    }

    #[test]
    fn every_body_lands_in_exactly_one_leaf() {
        let positions = grid(73);
        let charges = vec![-1.0; positions.len()];
        let tree = QuadNode::build(&positions, &charges).expect("tree builds");

        let mut indices = Vec::new();
        leaf_indices(&tree, &mut indices);
        indices.sort_unstable();
        assert_eq!(indices, (0..73).collect::<Vec<_>>());
        assert!(!tree.is_leaf());
        assert!((tree.charge + 73.0).abs() < 1e-4);
    }

    #[test]
    fn center_is_weighted_by_charge_magnitude() {
        let positions = vec![vec2(0.0, 0.0), vec2(10.0, 0.0)];
        let charges = vec![-3.0, -1.0];
        let tree = QuadNode::build(&positions, &charges).expect("tree builds");

        assert!((tree.center.x - 2.5).abs() < 1e-5);
        assert_eq!(tree.center.y, 0.0);
    }

    #[test]
    fn quadrants_tile_the_parent_cell() {
        let bounds = QuadBounds {
            min: vec2(0.0, 0.0),
            size: 8.0,
        };

        assert_eq!(bounds.quadrant_of(vec2(1.0, 1.0)), 0);
        assert_eq!(bounds.quadrant_of(vec2(5.0, 1.0)), 1);
        assert_eq!(bounds.quadrant_of(vec2(1.0, 5.0)), 2);
        assert_eq!(bounds.quadrant_of(vec2(5.0, 5.0)), 3);
        assert_eq!(bounds.quadrant(3).min, vec2(4.0, 4.0));
        assert_eq!(bounds.quadrant(1).size, 4.0);
        for index in 0..4 {
            assert!(bounds.quadrant(index).contains(bounds.quadrant(index).mid()));
        }
    }

    #[test]
    fn covering_square_holds_every_point() {
        let points = vec![vec2(-3.0, 10.0), vec2(40.0, 12.0), vec2(5.0, -7.0)];
        let bounds = QuadBounds::covering(&points).expect("finite points");

        assert!(points.iter().all(|point| bounds.contains(*point)));
        assert!(QuadBounds::covering(&[]).is_none());
    }

    #[test]
    fn non_finite_positions_build_no_tree() {
        let positions = vec![vec2(f32::NAN, 0.0)];
        assert!(QuadNode::build(&positions, &[-1.0]).is_none());
    }
}
