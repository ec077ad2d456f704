//! Navigator core – section registry, visibility resolution, category bar
//! and sticky-header logic.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Geometry
//! comes in through [`geometry::GeometryProvider`], so every piece can be
//! driven by a fake layout in tests.

pub mod catalog;
pub mod category_bar;
pub mod geometry;
pub mod navigator;
pub mod registry;
pub mod resolver;
pub mod selection;
pub mod smooth_scroll;
pub mod sticky;
pub mod viewport;
