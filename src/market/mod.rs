//! Pure transformations from the raw snapshot table to the dashboard's
//! derived views. Everything here is stateless and recomputed per render.

pub mod current_info;
pub mod daily_change;
pub mod normalize;
pub mod selector;
