// Geometry engine: window bounds and the pure transitions applied to them

pub mod transitions;
pub mod types;

pub use transitions::{apply_drag, cascade_origin, default_bounds_at, maximize, restore};
pub use types::*;
