//! Clustering and combination algorithms

pub mod geodesy;
pub mod compatibility;
pub mod clustering;
pub mod combiner;

pub use geodesy::{great_circle_distance, distance_between};
pub use compatibility::compatible;
pub use clustering::{cluster, DisjointSet};
pub use combiner::{WeightedCombiner, MemberWeight};
