pub mod loader;
pub mod svg;
