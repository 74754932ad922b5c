//! # stripnest 2D
//!
//! Polygon geometry, no-fit polygon orbiting and a greedy NFP strip packer.
//!
//! ## Features
//!
//! - Tolerance-based point and segment predicates
//! - Polygons with cached bounds/area and a read-time [`Placement`]
//! - Orbiting NFP (outer loops, inner loops, closed-form rectangle case)
//! - Outer-boundary merge of touching polygons
//! - Outline offsetting for item gaps and rotate-to-minimum-bounds
//! - Strip packer with progress events and pause/resume on a worker thread
//!
//! ## Quick Start
//!
//! ```rust
//! use stripnest_d2::{Config, NestEvent, Polygon, Solver, StripNester};
//!
//! let items = vec![
//!     Polygon::rectangle(1.0, 1.0),
//!     Polygon::rectangle(1.0, 1.0),
//!     Polygon::rectangle(1.0, 1.0),
//! ];
//!
//! let nester = StripNester::new(Config::new().with_strip(2.0, 1.0).with_rotation(false));
//! let mut placed = 0;
//! let report = nester
//!     .solve_with_events(&items, &mut |event| {
//!         if let NestEvent::ItemPlaced { .. } = event {
//!             placed += 1;
//!         }
//!     })
//!     .unwrap();
//!
//! assert_eq!(placed, 3);
//! assert_eq!(report.strips_used(), 2);
//! ```
//!
//! ## No-Fit Polygons
//!
//! ```rust
//! use stripnest_d2::{no_fit_polygon, Polygon};
//!
//! let a = Polygon::rectangle(2.0, 1.0);
//! let b = Polygon::rectangle(1.0, 1.0);
//! let nfp = no_fit_polygon(&a, &b, false, false);
//! assert_eq!(nfp.len(), 1);
//! ```

pub mod kernel;
pub mod merge;
pub mod nester;
pub mod nfp;
pub mod offset;
pub mod point;
pub mod polygon;

// Re-exports
pub use nester::{NestHandle, StripNester};
pub use nfp::{
    in_nfp, no_fit_polygon, no_fit_polygon_rectangle, search_start_point, Nfp, Role, VisitedSet,
};
pub use point::{fuzzy_equal, line_intersect, on_segment, z_cross_product, Point, FLOAT_TOL};
pub use polygon::{OffsetRing, PointInPolygon, Polygon, Rect};
pub use stripnest_core::{
    Config, Error, ItemOrder, NestEvent, NestReport, PauseToken, Placement, Result, Solver,
    StripUsage, Transform2D,
};
