//! The cloth engine: owns the lattice, steps physics on a fixed clock, and
//! exposes grabbing, tearing, and the per-frame triangle mesh.

use log::debug;

use crate::arrangement::FixedPointArrangement;
use crate::config::{validate_scale, validate_vertex_count, ClothConfig};
use crate::constraint::FloorPlane;
use crate::error::ClothError;
use crate::float::Float;
use crate::graph::{ClothGraph, EdgeId, Vertex, VertexId};
use crate::integrator::Forces;
use crate::mat::Mat4;
use crate::mesh::{compute_normals, MeshBuffer, RenderVertex};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::pick::{pick_nearest, Pick, Ray};
use crate::solver::{substep, FixedStep};
use crate::tear::{self, TearReport};
use crate::vec::{Vec, Vec3};

#[derive(Copy, Clone, Debug)]
struct Grab<F: Float> {
    vertex: VertexId,
    /// World-space distance from the ray origin when grabbed.
    distance: F,
    was_fixed: bool,
}

/// A tearable cloth simulation.
///
/// # Example
/// ```
/// use drape::{Cloth, ClothConfig, FixedPointArrangement};
///
/// let mut cloth: Cloth<f32> = Cloth::new(
///     ClothConfig::new().with_vertex_count(8).with_arrangement(FixedPointArrangement::AllTop),
/// ).unwrap();
/// cloth.step(1.0 / 30.0);
/// assert_eq!(cloth.triangle_count(), 7 * 7 * 2);
/// ```
pub struct Cloth<F: Float> {
    config: ClothConfig<F>,
    graph: ClothGraph<F>,
    mesh: MeshBuffer<F>,
    model: Mat4<F>,
    model_inverse: Option<Mat4<F>>,
    clock: FixedStep<F>,
    grab: Option<Grab<F>>,
    paused: bool,
}

impl<F: Float> Cloth<F> {
    pub fn new(config: ClothConfig<F>) -> Result<Self, ClothError> {
        config.validate()?;
        let model = Self::default_model_matrix(config.scale);
        let mut cloth = Cloth {
            graph: ClothGraph::build(config.vertex_count, config.scale, config.arrangement),
            mesh: MeshBuffer::new(config.vertex_count),
            model,
            model_inverse: model.affine_inverse(),
            clock: FixedStep::new(config.time_step),
            grab: None,
            paused: false,
            config,
        };
        cloth.rebuild_mesh();
        Ok(cloth)
    }

    /// Default placement: centred horizontally, hanging from just above the
    /// origin, shrunk so the cloth spans one world unit at any scale.
    pub fn default_model_matrix(scale: F) -> Mat4<F> {
        let inv = F::one() / scale;
        let offset = Vec3::new(
            -(scale * F::half()),
            F::from_f32(1.1) * scale * F::half(),
            F::zero(),
        );
        Mat4::from_scale(Vec3::new(inv, inv, inv)) * Mat4::from_translation(offset)
    }

    /// Rebuild the lattice from the current configuration, discarding tears,
    /// grabs, and banked time.
    pub fn restart(&mut self) {
        let (n, scale) = (self.config.vertex_count, self.config.scale);
        self.graph = ClothGraph::build(n, scale, self.config.arrangement);
        self.mesh.reserve_for(n);
        self.set_model_matrix(Self::default_model_matrix(scale));
        self.clock.reset();
        self.grab = None;
        self.rebuild_mesh();
        debug!(
            "cloth restart: n={}, {} vertices, {} edges, arrangement {:?}",
            self.config.vertex_count,
            self.graph.vertex_count(),
            self.graph.edge_count(),
            self.config.arrangement
        );
    }

    /// Advance by `dt` seconds of real time and rebuild the mesh.
    pub fn step(&mut self, dt: F) {
        self.step_observed(dt, &mut NoOpStepObserver);
    }

    /// [`step`](Cloth::step), reporting solver progress to `observer`.
    pub fn step_observed<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        if !self.paused {
            self.clock.accumulate(dt);
        }
        let forces = Forces { gravity: self.config.gravity, wind: self.config.wind };
        let floor = self.floor();
        let step = self.clock.step();
        while self.clock.take() {
            substep(&mut self.graph, &forces, &floor, step, self.config.iterations, observer);
        }
        self.rebuild_mesh();
        observer.on_step_complete();
    }

    /// Recompute normals and the triangle list from current positions.
    pub fn rebuild_mesh(&mut self) {
        compute_normals(&mut self.graph);
        self.mesh.rebuild(&self.graph);
    }

    /// Triangle list from the last rebuild, three vertices per triangle.
    pub fn mesh(&self) -> &[RenderVertex<F>] {
        self.mesh.as_slice()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    pub fn floor(&self) -> FloorPlane<F> {
        FloorPlane::new(self.config.scale * self.config.floor_height, self.config.floor_friction)
    }

    // ---- environment ----

    pub fn set_gravity(&mut self, gravity: Vec3<F>) {
        self.config.gravity = gravity;
    }

    pub fn set_wind(&mut self, wind: Vec3<F>) {
        self.config.wind = wind;
    }

    pub fn gravity(&self) -> Vec3<F> { self.config.gravity }
    pub fn wind(&self) -> Vec3<F> { self.config.wind }

    // ---- configuration that restarts ----

    pub fn set_vertex_count(&mut self, n: usize) -> Result<(), ClothError> {
        validate_vertex_count(n)?;
        if self.config.vertex_count != n {
            self.config.vertex_count = n;
            self.restart();
        }
        Ok(())
    }

    pub fn set_scale(&mut self, scale: F) -> Result<(), ClothError> {
        validate_scale(scale)?;
        if self.config.scale != scale {
            self.config.scale = scale;
            self.restart();
        }
        Ok(())
    }

    pub fn set_fixed_point_arrangement(&mut self, arrangement: FixedPointArrangement) {
        if self.config.arrangement != arrangement {
            self.config.arrangement = arrangement;
            self.restart();
        }
    }

    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn vertex_count(&self) -> usize { self.config.vertex_count }
    pub fn scale(&self) -> F { self.config.scale }
    pub fn arrangement(&self) -> FixedPointArrangement { self.config.arrangement }
    pub fn time_step(&self) -> F { self.clock.step() }

    // ---- model transform ----

    /// Replace the cloth-to-world transform until the next restart.
    pub fn set_model_matrix(&mut self, model: Mat4<F>) {
        self.model = model;
        self.model_inverse = model.affine_inverse();
    }

    pub fn model_matrix(&self) -> &Mat4<F> { &self.model }

    // ---- picking, grabbing, tearing ----

    /// Nearest active vertex under the ray.
    pub fn pick(&self, ray: &Ray<F>) -> Option<Pick<F>> {
        pick_nearest(&self.graph, &self.model, ray)
    }

    /// Pin the vertex under the ray so it can be dragged. Any previous grab
    /// is released first.
    pub fn grab(&mut self, ray: &Ray<F>) -> Option<VertexId> {
        self.release_grab();
        let pick = self.pick(ray)?;
        let distance = (pick.world_pos - ray.origin).length();
        let v = self.graph.vertex_mut(pick.vertex);
        let was_fixed = v.fixed;
        v.fixed = true;
        self.grab = Some(Grab { vertex: pick.vertex, distance, was_fixed });
        debug!("grabbed vertex {:?} at distance {:?}", pick.vertex, distance);
        Some(pick.vertex)
    }

    /// Move the grabbed vertex to a world-space position. Returns false when
    /// nothing is grabbed or the model transform cannot be inverted.
    pub fn update_grab(&mut self, world_target: Vec3<F>) -> bool {
        let (Some(grab), Some(inverse)) = (self.grab, self.model_inverse) else {
            return false;
        };
        let v = self.graph.vertex_mut(grab.vertex);
        if !v.is_active() {
            return false;
        }
        v.pos_old = v.pos;
        v.pos = inverse.transform_point(world_target);
        true
    }

    /// Move the grabbed vertex along a new ray, keeping its grab distance.
    pub fn update_grab_along_ray(&mut self, ray: &Ray<F>) -> bool {
        match self.grab {
            Some(grab) => self.update_grab(ray.at(grab.distance)),
            None => false,
        }
    }

    /// Let go of the grabbed vertex, restoring the pinned state it had when
    /// grabbed (or the last one given to [`set_fixed`](Cloth::set_fixed)
    /// while held).
    pub fn release_grab(&mut self) -> Option<VertexId> {
        let grab = self.grab.take()?;
        self.graph.vertex_mut(grab.vertex).fixed = grab.was_fixed;
        debug!("released vertex {:?}", grab.vertex);
        Some(grab.vertex)
    }

    pub fn grabbed_vertex(&self) -> Option<VertexId> {
        self.grab.map(|g| g.vertex)
    }

    /// Tear out the vertex under the ray.
    pub fn tear_at(&mut self, ray: &Ray<F>) -> Option<VertexId> {
        let pick = self.pick(ray)?;
        self.erase_vertex(pick.vertex).then_some(pick.vertex)
    }

    /// Deactivate a vertex and cascade. Returns false if it was already
    /// inactive or does not exist.
    pub fn erase_vertex(&mut self, id: VertexId) -> bool {
        if id.0 >= self.graph.vertex_count() {
            return false;
        }
        let report = tear::erase_vertex(&mut self.graph, id);
        self.after_tear(report)
    }

    /// Deactivate an edge and cascade. Returns false if it was already
    /// inactive or does not exist.
    pub fn erase_edge(&mut self, id: EdgeId) -> bool {
        if id.0 >= self.graph.edge_count() {
            return false;
        }
        let report = tear::erase_edge(&mut self.graph, id);
        self.after_tear(report)
    }

    fn after_tear(&mut self, report: TearReport) -> bool {
        if report.is_empty() {
            return false;
        }
        debug!("tear removed {} vertices and {} edges", report.vertices, report.edges);
        if let Some(grab) = self.grab {
            if !self.graph.vertex(grab.vertex).is_active() {
                self.grab = None;
            }
        }
        true
    }

    /// Manually pin or unpin a vertex.
    ///
    /// A grabbed vertex stays pinned while held; the new state is applied
    /// when the grab is released.
    pub fn set_fixed(&mut self, id: VertexId, fixed: bool) -> Result<(), ClothError> {
        let count = self.graph.vertex_count();
        if id.0 >= count {
            return Err(ClothError::VertexOutOfBounds { index: id.0, count });
        }
        match &mut self.grab {
            Some(grab) if grab.vertex == id => grab.was_fixed = fixed,
            _ => self.graph.vertex_mut(id).fixed = fixed,
        }
        Ok(())
    }

    // ---- pause ----

    pub fn pause(&mut self) { self.paused = true; }
    pub fn resume(&mut self) { self.paused = false; }

    /// Flip the pause state; returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool { self.paused }

    // ---- inspection ----

    pub fn graph(&self) -> &ClothGraph<F> { &self.graph }
    pub fn vertex(&self, id: VertexId) -> &Vertex<F> { self.graph.vertex(id) }
    pub fn active_vertex_count(&self) -> usize { self.graph.active_vertex_count() }
    pub fn active_edge_count(&self) -> usize { self.graph.active_edge_count() }
}
