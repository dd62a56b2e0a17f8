//! Step observer trait for monitoring cloth simulation progress.

/// Trait for observing cloth simulation steps.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after all vertices have been integrated (verlet step).
    fn on_integrate(&mut self) {}

    /// Called after each relaxation pass with the number of edges it
    /// corrected.
    fn on_constraint_iteration(&mut self, _iteration: usize, _corrected: usize) {}

    /// Called once per substep with the number of floor contacts resolved.
    fn on_floor_contacts(&mut self, _contacts: usize) {}

    /// Called when a frame is fully complete (all substeps, normals, mesh).
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
