//! Density-based clustering of trigger primitives.
//!
//! Primitives are projected onto the `(time_peak / time_scale, channel)`
//! plane and grouped with DBSCAN: points within `eps` of each other are
//! neighbours, a point with at least `min_samples` neighbours (itself
//! included) is a core point, and clusters are the transitive closure of
//! core-point neighbourhoods. Points reachable from no core point are
//! labelled noise.

pub mod dbscan;

pub use dbscan::{DbscanClusterer, DbscanConfig, ClusterLabel, NOISE};
