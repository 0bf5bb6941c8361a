//! Core types for the key relay verifier.

pub mod node;
pub mod edge;
pub mod graph;
pub mod path;
pub mod party;

pub use node::NodeId;
pub use edge::Edge;
pub use graph::Graph;
pub use path::Path;
pub use party::{UserPair, Adversary};
