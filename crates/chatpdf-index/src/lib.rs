//! Exact nearest-neighbour index over chunk embeddings and its on-disk store

pub mod flat;
pub mod manifest;
pub mod store;

pub use flat::VectorIndex;
pub use manifest::Manifest;
pub use store::{IndexStore, TrustPolicy};
