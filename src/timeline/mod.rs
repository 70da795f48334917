pub mod dsl;
pub mod markers;
pub mod model;
pub mod project;
