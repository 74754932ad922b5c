//! # stripnest core
//!
//! Shared types for the stripnest strip packing engine.
//!
//! The geometry and the packer itself live in `stripnest-d2`; this crate holds
//! what a caller needs to configure a run and consume its output.
//!
//! ## Core Components
//!
//! | Type | Role |
//! |------|------|
//! | [`Config`] | Strip size, item gap, rotation and ordering |
//! | [`Solver`] | Common interface of packing solvers |
//! | [`NestEvent`] | `StripOpened` / `ItemPlaced` / `RunComplete` stream |
//! | [`PauseToken`] | Cooperative pause/resume of a running job |
//! | [`Placement`] | Offset + strip id applied to a shape at read time |
//! | [`NestReport`] | Strips used, per-strip utilization, unplaced items |
//! | [`Transform2D`] | Rotation about the origin over `nalgebra` |
//!
//! ## Configuration
//!
//! ```rust
//! use stripnest_core::{Config, ItemOrder};
//!
//! let config = Config::new()
//!     .with_strip(1200.0, 600.0)
//!     .with_item_gap(2.0)
//!     .with_rotation(true)
//!     .with_order(ItemOrder::AreaDecreasing);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod event;
pub mod pause;
pub mod placement;
pub mod result;
pub mod solver;
pub mod transform;

// Re-exports
pub use error::{Error, Result};
pub use event::NestEvent;
pub use pause::PauseToken;
pub use placement::Placement;
pub use result::{NestReport, StripUsage};
pub use solver::{Config, ItemOrder, Solver};
pub use transform::Transform2D;
