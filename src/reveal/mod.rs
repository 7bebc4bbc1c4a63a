// Scroll reveal module
// Flips elements to their revealed presentation once they scroll into view

pub mod engine;
pub mod layout;

pub use engine::{ScrollRevealEngine, DEFAULT_THRESHOLD_PX};
pub use layout::{ElementId, Layout, LayoutSnapshot};
