//! drillview: hierarchical drill-down aggregation engine.
//!
//! A reusable core for analytics dashboards that render pre-aggregated
//! metrics: navigate from top-level category totals into nested
//! subcategories, toggle leaf-level filters persisted in a shareable URL,
//! and go back/reset, while totals and percentages stay consistent.
//!
//! Layers:
//! - [`domain`] — immutable hierarchy model and pure aggregation
//! - [`application`] — navigation state machine, filter state, share URLs
//! - [`cli`] — terminal frontend over the engine
//! - [`format`] — display-only number formatting

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod format;
pub mod util;

pub use application::{
    current_level, reduce, DrilldownController, FilterState, NavAction, NavEvent, NavState,
};
pub use domain::{HierarchyModel, ModelBuilder, NodeKind, NodeSpec};
