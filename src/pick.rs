//! Ray picking of cloth vertices.

use crate::float::Float;
use crate::graph::{ClothGraph, VertexId};
use crate::mat::Mat4;
use crate::vec::{Vec, Vec3};

/// Pick sphere radius times lattice side; roughly half a diagonal cell
/// for unit scale.
pub const PICK_RADIUS_FACTOR: f32 = 0.71;

/// A world-space ray. The direction is normalized on construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray<F: Float> {
    pub origin: Vec3<F>,
    pub direction: Vec3<F>,
}

impl<F: Float> Ray<F> {
    pub fn new(origin: Vec3<F>, direction: Vec3<F>) -> Self {
        Ray { origin, direction: direction.normalize() }
    }

    pub fn at(&self, t: F) -> Vec3<F> {
        self.origin + self.direction.scale(t)
    }

    /// Distance along the ray to the first point on the sphere's surface
    /// in front of the origin. An origin inside the sphere hits the far side.
    pub fn intersect_sphere(&self, center: Vec3<F>, radius: F) -> Option<F> {
        let to_center = center - self.origin;
        let t_mid = to_center.dot(self.direction);
        let miss_sq = to_center.length_sq() - t_mid * t_mid;
        let r_sq = radius * radius;
        if miss_sq > r_sq {
            return None;
        }
        let half_chord = (r_sq - miss_sq).max(F::zero()).sqrt();
        let near = t_mid - half_chord;
        if near >= F::zero() {
            return Some(near);
        }
        let far = t_mid + half_chord;
        if far >= F::zero() { Some(far) } else { None }
    }
}

/// A picked vertex and where the ray met it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pick<F: Float> {
    pub vertex: VertexId,
    /// Distance along the ray to the pick sphere.
    pub distance: F,
    /// The vertex position in world space.
    pub world_pos: Vec3<F>,
}

/// World-space pick radius for a lattice with `n` vertices per side.
pub fn pick_radius<F: Float>(n: usize) -> F {
    F::from_f32(PICK_RADIUS_FACTOR) / F::from_usize(n.max(1))
}

/// Nearest active vertex whose pick sphere the ray enters. Ties keep the
/// lower index.
pub fn pick_nearest<F: Float>(graph: &ClothGraph<F>, model: &Mat4<F>, ray: &Ray<F>) -> Option<Pick<F>> {
    let radius = pick_radius::<F>(graph.n());
    let mut best: Option<Pick<F>> = None;
    for v in graph.vertices().iter().filter(|v| v.is_active()) {
        let world_pos = model.transform_point(v.pos);
        let Some(distance) = ray.intersect_sphere(world_pos, radius) else {
            continue;
        };
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(Pick { vertex: v.index(), distance, world_pos });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_sphere_front_surface() {
        let ray = Ray::new(Vec3::new(0.0f64, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0));
        let t = ray.intersect_sphere(Vec3::zero(), 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-12);
        assert!((ray.at(t).z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ray_misses_offset_sphere() {
        let ray = Ray::new(Vec3::new(0.0f32, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray.intersect_sphere(Vec3::new(2.0, 0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn sphere_behind_origin_is_ignored() {
        let ray = Ray::new(Vec3::new(0.0f32, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(ray.intersect_sphere(Vec3::zero(), 1.0).is_none());
    }

    #[test]
    fn origin_inside_sphere_hits_far_side() {
        let ray = Ray::new(Vec3::zero(), Vec3::new(1.0f64, 0.0, 0.0));
        let t = ray.intersect_sphere(Vec3::zero(), 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-12);
    }
}
