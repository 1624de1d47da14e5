pub mod geometry;
pub mod support;
pub mod deviation;
pub mod neighborhood;
pub mod simplify;
pub mod error;
pub mod config;
pub mod polyline_io;

pub use crate::geometry::Point;
pub use crate::simplify::{simplify, simplify_with, simplify_indices, SimplifyOptions, Simplification};
