//! Cloth constraints: tolerance-band edge lengths and the floor plane.

use crate::float::Float;
use crate::graph::{Edge, Vertex};
use crate::vec::{Vec, Vec3};

/// Floor height as a multiple of cloth scale.
pub const FLOOR_PLANE_Y: f32 = -1.15;
/// Fraction of horizontal motion kept on floor contact.
pub const FLOOR_PLANE_FRICTION: f32 = 0.1;
/// Lift above the plane after contact, against re-penetration by rounding.
pub const FLOOR_EPSILON: f32 = 1e-4;

/// Relax one edge toward its tolerance band.
///
/// Nothing moves while the length lies within
/// `[rest·(1−flex), rest·(1+flex)]`. Outside it, the edge is pulled to the
/// nearest band limit: split evenly between free endpoints, given wholly to
/// the free endpoint when the other is pinned, and skipped when both are
/// pinned. Returns whether a correction was applied.
pub fn relax_edge<F: Float>(edge: &Edge<F>, vertices: &mut [Vertex<F>]) -> bool {
    if !edge.is_active() {
        return false;
    }
    let (a, b) = (edge.vertex_a.0, edge.vertex_b.0);
    let a_pos = vertices[a].pos;
    let b_pos = vertices[b].pos;
    let a_fixed = vertices[a].fixed;
    let b_fixed = vertices[b].fixed;

    let delta = b_pos - a_pos;
    let len_sq = delta.length_sq();
    let lower = edge.resting_length * (F::one() - edge.flex_coeff);
    let upper = edge.resting_length * (F::one() + edge.flex_coeff);
    let target = if len_sq < lower * lower {
        lower
    } else if len_sq > upper * upper {
        upper
    } else {
        return false;
    };

    let dist = len_sq.sqrt();
    if dist.is_near_zero(F::from_f32(1e-10)) {
        return false; // degenerate
    }
    let correction = delta.scale((dist - target) / dist);

    match (a_fixed, b_fixed) {
        (false, false) => {
            let half = correction.scale(F::half());
            vertices[a].pos = a_pos + half;
            vertices[b].pos = b_pos - half;
        }
        (true, false) => vertices[b].pos = b_pos - correction,
        (false, true) => vertices[a].pos = a_pos + correction,
        (true, true) => return false,
    }
    true
}

/// Horizontal floor at `y = height` with friction on contact.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloorPlane<F: Float> {
    pub height: F,
    pub friction: F,
}

impl<F: Float> FloorPlane<F> {
    pub fn new(height: F, friction: F) -> Self {
        FloorPlane { height, friction }
    }

    /// Push a vertex that sank below the plane back onto it.
    ///
    /// A step that crossed the plane is rewound along its own path to the
    /// crossing, the rewound horizontal part is replayed scaled by
    /// `friction`, and `y` is lifted just above the plane. A step that never
    /// crossed (no vertical motion, or already under the plane when it
    /// began) only loses horizontal speed. Returns whether the vertex was in
    /// contact.
    pub fn resolve(&self, v: &mut Vertex<F>) -> bool {
        if v.pos.y >= self.height {
            return false;
        }
        let path = v.pos - v.pos_old;
        if v.pos_old.y < self.height || path.y.is_near_zero(F::from_f32(1e-12)) {
            let lost = path.horizontal().scale(F::one() - self.friction);
            v.pos = v.pos - lost;
        } else {
            let ratio = ((self.height - v.pos.y) / path.y).abs().clamp(F::zero(), F::one());
            let rewind = path.scale(ratio);
            v.pos = v.pos - rewind + rewind.horizontal().scale(self.friction);
        }
        v.pos = Vec3::new(v.pos.x, self.height + F::from_f32(FLOOR_EPSILON), v.pos.z);
        true
    }
}
