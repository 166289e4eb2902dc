pub mod config;
pub mod dataset;
pub mod render;
pub mod routing;
pub mod util;
