//! Deformable window surfaces for compositing window managers.
//!
//! `wobbly` is the physics core behind the classic "wobbly windows"
//! effect: when a window is moved, resized, mapped, or snapped to a
//! boundary, its rendered surface lags and springs back like an elastic
//! sheet instead of translating rigidly.
//!
//! # Features
//!
//! - **Spring grids**: a fixed 4x4 mass-spring lattice per window with
//!   grab and maximize anchoring
//! - **Fixed-step integration**: explicit integration with friction on a
//!   15 ms quantum, reporting independent residual-force/velocity flags
//! - **Magnetic edges**: per-node snap/release state machines against
//!   screen and sibling-window boundaries
//! - **Bezier meshes**: bicubic surface evaluation and adaptive
//!   tessellation with per-layer texture coordinates
//! - **Observable**: monitor stepping and snaps via the `StepObserver`
//!   trait
//! - **`no_std` compatible**: the engine performs no I/O and never blocks
//!
//! The host compositor drives the [`Engine`] event surface directly;
//! window-system plumbing, GPU drawing, and stacking policy stay outside.

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod geometry;
pub mod edge;
pub mod finder;
pub mod node;
pub mod spring;
pub mod model;
pub mod integrator;
pub mod surface;
pub mod tessellation;
pub mod config;
pub mod error;
pub mod observer;
pub mod engine;

// Re-export primary API
pub use float::Float;
pub use vec::{Axis, Vec2};
pub use geometry::{Neighbor, NeighborKind, Rect, Workspace};
pub use edge::{Direction, Edge, EdgeMask};
pub use node::Node;
pub use spring::Spring;
pub use model::{Model, GRID_HEIGHT, GRID_WIDTH, MAX_SPRINGS, NODE_COUNT};
pub use integrator::{StepResult, STEP_MS};
pub use tessellation::{tessellate, Mesh, TextureTransform};
pub use config::Config;
pub use error::EngineError;
pub use observer::{NoOpStepObserver, StepObserver};
pub use engine::{Engine, WindowId, WindowKind};
