pub mod overlay;
pub mod reveal;
pub mod scroll;
pub mod stage;
