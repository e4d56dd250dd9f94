pub mod composer;
pub mod grid;
