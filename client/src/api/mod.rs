//! REST API boundary of the client.
//!
//! This module consumes, not defines, the marketplace API: request plumbing
//! in `client`, wire models in `models`, and the normalization boundary for
//! heterogeneous response shapes in `normalize`.

pub mod client;
pub mod models;
pub mod normalize;
