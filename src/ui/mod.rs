//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer lays the catalog out as a scrolling page and paints the
//! navigator's state (active pill, arrows, compact headers) on top of it.
//! No navigation decisions are made here.

pub mod category_bar;
pub mod chrome;
pub mod layout;
pub mod page;
pub mod popup;
pub mod theme;
