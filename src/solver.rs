//! Fixed-step cloth solver: integrate, relax edges, resolve the floor.

use crate::constraint::{relax_edge, FloorPlane};
use crate::float::Float;
use crate::graph::{ClothGraph, Vertex};
use crate::integrator::{integrate_all, Forces};
use crate::observer::StepObserver;

/// Relaxation passes over all edges per substep.
pub const PHYSICS_ITERATIONS: usize = 16;
/// Default physics substep, in seconds.
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// One pass over every active edge. Returns how many edges were corrected.
pub fn relax_all<F: Float>(graph: &mut ClothGraph<F>) -> usize {
    let (edges, vertices) = graph.parts_mut();
    edges.iter().filter(|e| relax_edge(e, vertices)).count()
}

/// Resolve every free vertex against the floor. Returns the contact count.
pub fn resolve_floor_all<F: Float>(vertices: &mut [Vertex<F>], floor: &FloorPlane<F>) -> usize {
    let mut contacts = 0;
    for v in vertices.iter_mut().filter(|v| v.is_free()) {
        if floor.resolve(v) {
            contacts += 1;
        }
    }
    contacts
}

/// Run one physics substep of length `dt`.
pub fn substep<F: Float, O: StepObserver>(
    graph: &mut ClothGraph<F>,
    forces: &Forces<F>,
    floor: &FloorPlane<F>,
    dt: F,
    iterations: usize,
    observer: &mut O,
) {
    let contacts = integrate_all(graph.vertices_mut(), forces, dt, floor);
    observer.on_integrate();

    for i in 0..iterations {
        let corrected = relax_all(graph);
        observer.on_constraint_iteration(i, corrected);
    }

    // relaxation can push vertices back under the floor
    let late_contacts = resolve_floor_all(graph.vertices_mut(), floor);
    observer.on_floor_contacts(contacts + late_contacts);
    log::trace!(
        "substep: {} floor contacts after integration, {} after relaxation",
        contacts,
        late_contacts
    );
}

/// Decouples physics from frame delivery: real time accumulates and is
/// spent in whole substeps.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedStep<F: Float> {
    step: F,
    accumulated: F,
}

impl<F: Float> FixedStep<F> {
    pub fn new(step: F) -> Self {
        FixedStep { step, accumulated: F::zero() }
    }

    pub fn step(&self) -> F { self.step }
    pub fn accumulated(&self) -> F { self.accumulated }

    pub fn accumulate(&mut self, dt: F) {
        if dt > F::zero() && dt.is_finite() {
            self.accumulated = self.accumulated + dt;
        }
    }

    /// Spend one substep if more than a full step is banked.
    pub fn take(&mut self) -> bool {
        if self.accumulated > self.step {
            self.accumulated = self.accumulated - self.step;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = F::zero();
    }
}
