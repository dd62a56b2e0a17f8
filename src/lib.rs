//! Tearable mass-spring cloth with verlet integration.
//!
//! `drape` simulates an n×n cloth lattice and hands a renderer a fresh
//! triangle mesh every frame. It is the physics core only: windowing,
//! cameras and GPU upload belong to the caller, who feeds in a frame time,
//! pick rays, and configuration changes.
//!
//! # Features
//!
//! - **Lattice graph**: structural, shear, and bend edges over an arena of
//!   vertices with stable ids
//! - **Verlet integration**: gravity and wind on a fixed substep, decoupled
//!   from frame rate
//! - **Tolerance-band relaxation**: edges only correct once they leave
//!   `rest·(1±flex)`, which keeps the sheet from jittering
//! - **Floor collision**: motion rewound onto the plane, with friction
//! - **Tearing**: cascading deactivation that never leaves a dangling
//!   edge or brace
//! - **Mesh output**: angle-weighted normals and a reusable triangle buffer
//! - **Picking**: ray-sphere vertex picking for grab and tear tools
//! - **Observable**: monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: needs only `alloc`

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod mat;
pub mod arrangement;
pub mod graph;
pub mod integrator;
pub mod constraint;
pub mod solver;
pub mod tear;
pub mod mesh;
pub mod pick;
pub mod cloth;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec2, Vec3};
pub use mat::Mat4;
pub use arrangement::FixedPointArrangement;
pub use graph::{ClothGraph, Edge, EdgeId, Slot, Vertex, VertexId};
pub use integrator::Forces;
pub use constraint::FloorPlane;
pub use tear::TearReport;
pub use mesh::{MeshBuffer, RenderVertex};
pub use pick::{Pick, Ray};
pub use cloth::Cloth;
pub use config::ClothConfig;
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::ClothError;
