//! Neighborhood operators over facility open/closed vectors.
//!
//! Used by the simulated annealing strategy to generate candidate moves and
//! its random initial seed.

mod operators;

pub use operators::{
    flip, flip_at, random_area_operate, range_flip, range_flip_between, reverse, reverse_between,
    shuffle, Operator,
};
