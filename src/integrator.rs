//! Position-based verlet integration of cloth vertices.

use crate::constraint::FloorPlane;
use crate::float::Float;
use crate::graph::Vertex;
use crate::vec::{Vec, Vec3};

/// Environmental forces applied every substep.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Forces<F: Float> {
    /// Acceleration; scaled by vertex mass before the force sum.
    pub gravity: Vec3<F>,
    /// Force, independent of mass.
    pub wind: Vec3<F>,
}

impl<F: Float> Forces<F> {
    pub fn none() -> Self {
        Forces { gravity: Vec3::zero(), wind: Vec3::zero() }
    }
}

/// Advance one vertex by one verlet step. Pinned and inactive vertices are
/// left untouched.
///
/// `pos_new = 2·pos − pos_old + (mass·gravity + wind) / mass · dt²`
pub fn integrate_vertex<F: Float>(v: &mut Vertex<F>, forces: &Forces<F>, dt: F) -> bool {
    if !v.is_free() {
        return false;
    }
    let mut accel = forces.gravity.scale(v.mass) + forces.wind;
    if !v.mass.is_near_zero(F::from_f32(1e-10)) {
        accel = accel.scale(F::one() / v.mass);
    }
    let new_pos = v.pos.scale(F::two()) - v.pos_old + accel.scale(dt * dt);
    v.pos_old = v.pos;
    v.pos = new_pos;
    true
}

/// Integrate every vertex, resolving each one against the floor right after
/// it moves. Returns how many vertices touched the floor.
pub fn integrate_all<F: Float>(
    vertices: &mut [Vertex<F>],
    forces: &Forces<F>,
    dt: F,
    floor: &FloorPlane<F>,
) -> usize {
    let mut contacts = 0;
    for v in vertices.iter_mut() {
        if integrate_vertex(v, forces, dt) && floor.resolve(v) {
            contacts += 1;
        }
    }
    contacts
}

/// Implicit per-step velocity (`pos − pos_old`).
pub fn velocity_raw<F: Float>(v: &Vertex<F>) -> Vec3<F> {
    v.pos - v.pos_old
}
