//! Simulation world: the agent registry plus the concrete agent kinds built from steering,
//! navigation and behavior trees.
//!
//! A host loop owns an [`Environment`] and calls [`Environment::update`] once per frame. Enable the
//! `parallel` feature to update agents on the rayon thread pool.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod environment;
pub mod flocking;
pub mod planning;
pub mod trees;

pub use environment::{Bounds, Environment, EnvironmentConfig};
pub use flocking::{FlockingAgent, FlockingConfig};
pub use planning::{PlanningAgent, PlanningConfig, PlanningMemory, PlanningState};
pub use trees::{patrol_tree, search_tree};
