//! # Barnes–Hut Quadtree (2D)
//!
//! Approximates the gravitational acceleration on every body by treating
//! distant groups of bodies as one pseudo-body at their center of mass,
//! replacing the `O(N²)` all-pairs sum with roughly `O(N log N)` work.
//!
//! - The plane is recursively split into 4 quadrants.
//! - Leaves hold the bodies that landed in them. A leaf holds more than one
//!   body only when those bodies share an exact position, or when the tree
//!   reached [`MAX_DEPTH`].
//! - Every node stores the total mass and center of mass (COM) of its
//!   subtree and its square bounding box.
//!
//! Coincident pairs contribute nothing to each other, same as the direct
//! model.

use crate::simulation::states::{NVec2, System};

/// Depth at which nodes stop splitting and keep every body they receive
pub const MAX_DEPTH: usize = 48;

/// A single quadtree node.
///
/// Either a leaf (no children, zero or more bodies) or an internal node
/// (children, no bodies of its own).
pub struct BarnesHutNode {
    pub mass: f64,
    pub com: NVec2,
    pub bbox_min: NVec2,
    pub bbox_max: NVec2,
    pub children: [Option<usize>; 4], // indices into BarnesHutTree::nodes
    pub bodies: Vec<usize>, // body indices held by a leaf
}

impl BarnesHutNode {
    fn empty(bbox_min: NVec2, bbox_max: NVec2) -> Self {
        Self {
            mass: 0.0,
            com: NVec2::zeros(),
            bbox_min,
            bbox_max,
            children: [None; 4],
            bodies: Vec::new(),
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.iter().all(|c| c.is_none())
    }

    fn contains(&self, p: &NVec2) -> bool {
        p.x >= self.bbox_min.x && p.x <= self.bbox_max.x && p.y >= self.bbox_min.y && p.y <= self.bbox_max.y
    }
}

/// A quadtree built over one snapshot of a [`System`].
pub struct BarnesHutTree {
    pub nodes: Vec<BarnesHutNode>,
    pub root: usize,
}

/// The body a traversal computes acceleration for
struct Target {
    pos: NVec2,
    g: f64,
    theta: f64,
}

impl BarnesHutTree {
    /// Build the tree from the current positions in `sys`.
    ///
    /// 1. Compute a square bounding box around all bodies.
    /// 2. Insert every body, splitting leaves as needed.
    /// 3. Fill in mass and COM bottom-up.
    pub fn build(sys: &System) -> Self {
        let (bbox_min, bbox_max) = compute_global_bbox(sys);

        let root = 0;
        let mut tree = BarnesHutTree {
            nodes: vec![BarnesHutNode::empty(bbox_min, bbox_max)],
            root,
        };

        for i in 0..sys.bodies.len() {
            tree.insert_body(root, i, sys, 0);
        }

        tree.compute_mass_and_com(sys, root);
        tree
    }

    /// Net acceleration on body `i`.
    ///
    /// Nodes whose size over distance falls below `theta` are used as a single
    /// mass at their COM; nearer nodes, and every node whose box holds body
    /// `i`, are opened. Leaves are summed exactly,
    /// skipping bodies at body `i`'s position.
    pub fn accel_on_body(&self, i: usize, sys: &System, g: f64, theta: f64) -> NVec2 {
        let target = Target { pos: sys.bodies[i].x, g, theta };
        let mut acc = NVec2::zeros();
        self.traverse_node(self.root, &target, sys, &mut acc);
        acc
    }

    // helpers ==============================================================================

    /// Insert body `body_idx` below `node_idx`.
    ///
    /// - Leaf that is empty, only holds bodies at the same position, or sits
    ///   at [`MAX_DEPTH`]: keep the body here.
    /// - Any other leaf: split into 4 and push the residents down.
    /// - Internal node: descend into the quadrant containing the body.
    fn insert_body(&mut self, node_idx: usize, body_idx: usize, sys: &System, depth: usize) {
        let bbox_min = self.nodes[node_idx].bbox_min;
        let bbox_max = self.nodes[node_idx].bbox_max;
        let pos = sys.bodies[body_idx].x;

        if self.nodes[node_idx].is_leaf() {
            let shares_position = self.nodes[node_idx]
                .bodies
                .first()
                .map_or(true, |&b| sys.bodies[b].x == pos);

            if shares_position || depth >= MAX_DEPTH {
                self.nodes[node_idx].bodies.push(body_idx);
                return;
            }

            let residents = std::mem::take(&mut self.nodes[node_idx].bodies);
            self.subdivide(node_idx, bbox_min, bbox_max);
            for resident in residents {
                self.insert_body(node_idx, resident, sys, depth);
            }
        }

        let quadrant = child_index_for_point(&pos, &bbox_min, &bbox_max);
        let child_node_idx = match self.nodes[node_idx].children[quadrant] {
            Some(idx) => idx,
            None => {
                let (cmin, cmax) = child_bbox(&bbox_min, &bbox_max, quadrant);
                let new_idx = self.nodes.len();
                self.nodes.push(BarnesHutNode::empty(cmin, cmax));
                self.nodes[node_idx].children[quadrant] = Some(new_idx);
                new_idx
            }
        };

        self.insert_body(child_node_idx, body_idx, sys, depth + 1);
    }

    /// Turn a leaf into an internal node with 4 empty quadrants
    fn subdivide(&mut self, node_idx: usize, bbox_min: NVec2, bbox_max: NVec2) {
        for quadrant in 0..4 {
            let (cmin, cmax) = child_bbox(&bbox_min, &bbox_max, quadrant);
            let new_node_idx = self.nodes.len();
            self.nodes.push(BarnesHutNode::empty(cmin, cmax));
            self.nodes[node_idx].children[quadrant] = Some(new_node_idx);
        }
    }

    /// Post-order pass filling `mass` and `com` for every node in the subtree
    fn compute_mass_and_com(&mut self, sys: &System, node_idx: usize) {
        let mut mass = 0.0;
        let mut com = NVec2::zeros();

        for &bidx in &self.nodes[node_idx].bodies {
            let b = &sys.bodies[bidx];
            mass += b.m;
            com += b.x * b.m;
        }

        let children = self.nodes[node_idx].children;
        for child_idx in children.into_iter().flatten() {
            self.compute_mass_and_com(sys, child_idx);
            let cn = &self.nodes[child_idx];
            if cn.mass > 0.0 {
                mass += cn.mass;
                com += cn.com * cn.mass;
            }
        }

        if mass > 0.0 {
            com /= mass;
        }

        let node = &mut self.nodes[node_idx];
        node.mass = mass;
        node.com = com;
    }

    fn traverse_node(&self, node_idx: usize, target: &Target, sys: &System, acc: &mut NVec2) {
        let node = &self.nodes[node_idx];

        if node.mass == 0.0 {
            return;
        }

        if node.is_leaf() {
            for &bidx in &node.bodies {
                let b = &sys.bodies[bidx];
                let r = b.x - target.pos;
                let r2 = r.dot(&r);
                if r2 == 0.0 {
                    continue; // self or coincident
                }
                let inv_r = r2.sqrt().recip();
                *acc += target.g * b.m * inv_r * inv_r * inv_r * r;
            }
            return;
        }

        let size_vec = node.bbox_max - node.bbox_min;
        let size = size_vec.x.max(size_vec.y);

        let r = node.com - target.pos;
        let dist = r.norm();

        // a box holding the target also holds the target's own mass
        if !node.contains(&target.pos) && dist > 0.0 && size / dist < target.theta {
            // Far enough away: one mass at the COM
            let inv_r = dist.recip();
            *acc += target.g * node.mass * inv_r * inv_r * inv_r * r;
        } else {
            for child_idx in node.children.iter().flatten() {
                self.traverse_node(*child_idx, target, sys, acc);
            }
        }
    }
}

// helpers ===========================================================================

/// Square box enclosing every body, so a node's size is a single number.
fn compute_global_bbox(sys: &System) -> (NVec2, NVec2) {
    let mut min = NVec2::new(f64::INFINITY, f64::INFINITY);
    let mut max = NVec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);

    for b in &sys.bodies {
        min.x = min.x.min(b.x.x);
        min.y = min.y.min(b.x.y);
        max.x = max.x.max(b.x.x);
        max.y = max.y.max(b.x.y);
    }

    let center = (min + max) * 0.5;
    let half = (max - min) * 0.5;
    let max_half = half.x.max(half.y);
    let half = NVec2::new(max_half, max_half);

    (center - half, center + half)
}

/// Quadrant of `p` inside a box.
///
/// - Bit 0 (value 1): x >= center.x
/// - Bit 1 (value 2): y >= center.y
fn child_index_for_point(p: &NVec2, bbox_min: &NVec2, bbox_max: &NVec2) -> usize {
    let center = (bbox_min + bbox_max) * 0.5;
    let mut idx = 0;

    if p.x >= center.x { idx |= 1; }
    if p.y >= center.y { idx |= 2; }

    idx
}

/// Box of quadrant `child_idx`, same bit layout as [`child_index_for_point`]
fn child_bbox(parent_min: &NVec2, parent_max: &NVec2, child_idx: usize) -> (NVec2, NVec2) {
    let center = (parent_min + parent_max) * 0.5;

    let mut min = *parent_min;
    let mut max = *parent_max;

    if (child_idx & 1) == 0 {
        max.x = center.x;
    } else {
        min.x = center.x;
    }

    if (child_idx & 2) == 0 {
        max.y = center.y;
    } else {
        min.y = center.y;
    }

    (min, max)
}
