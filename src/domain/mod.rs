//! Domain layer: hierarchy model and pure aggregation
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod aggregate;
pub mod arena;
pub mod builder;
pub mod error;
pub mod node;

pub use aggregate::{level_total, percentage, summarize_level, sort_by_value_desc, LevelEntry, LevelSummary};
pub use arena::{HierarchyModel, HierarchyNode, NodeData};
pub use builder::ModelBuilder;
pub use error::{DomainError, DomainResult};
pub use node::{slugify, NodeKind, NodeSpec};
