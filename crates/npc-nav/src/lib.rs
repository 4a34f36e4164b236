//! Grid navigation: walkability map, A* search and waypoint following.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod astar;
pub mod error;
pub mod follow;
pub mod grid;
pub mod navigator;

pub use astar::{AStarPathfinder, Node};
pub use error::{NavError, Result};
pub use follow::PathFollower;
pub use grid::{Cell, GridWorld};
pub use navigator::Navigator;
