//! Application services built on the domain layer.

pub mod render;
