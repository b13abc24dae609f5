//! Charts module - chart specifications and rendering

mod builder;
mod layout;
mod plotter;
mod renderer;
mod spec;

pub use builder::{ChartBuilder, ChartOutcome};
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use spec::ChartId;
