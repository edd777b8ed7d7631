/// Rendering of the individual chart kinds and the surrounding panels.
pub mod heatmap;
pub mod panels;
pub mod pie;
pub mod plot;
