//! Drill-down navigation: reducer-style state machine over the hierarchy.
//!
//! Navigation state lives in an explicit [`NavState`] advanced only through
//! [`reduce`], so the state machine is unit-testable without any rendering
//! harness. [`DrilldownController`] wraps the reducer for hosts that prefer
//! method calls over dispatched actions.

use generational_arena::Index;
use tracing::debug;

use crate::application::filter::FilterState;
use crate::domain::arena::HierarchyModel;
use crate::domain::node::NodeKind;

/// Navigation state of one mounted view: breadcrumb path plus filter
/// selections. Created empty on mount; the path only ever changes by
/// exactly one element per drill/back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavState {
    /// Previously-selected nodes, root-first. Displayed level is the last
    /// element's children, or the root set when empty.
    pub path: Vec<Index>,
    /// Active leaf filter selections, independent of the path.
    pub filters: FilterState,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.path.is_empty()
    }
}

/// User-triggered state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    /// Select a node by display name in the current level. Internal nodes
    /// descend; leaf nodes toggle their filter instead. Never both.
    Drill(String),
    Back,
    Reset,
    ToggleFilter { key: String, value: String },
    ClearFilter(String),
}

/// Outcome signal of one transition, consumed by the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    /// A successful internal-node drill; carries the new breadcrumb path.
    DrilledDown { node: Index, path: Vec<Index> },
    /// A filter was toggled; `value` is `None` when it toggled off.
    FilterToggled { key: String, value: Option<String> },
    FilterCleared { key: String },
    /// Drill target unknown or inert: state is unchanged.
    Rejected,
    /// Transition applied without a host-visible signal (back/reset).
    Handled,
}

/// Level currently displayed for `state`: root set when the path is empty,
/// else the last path element's children. Total over missing nodes, never
/// panics.
pub fn current_level<'a>(model: &'a HierarchyModel, state: &NavState) -> &'a [Index] {
    match state.path.last() {
        Some(&idx) => model.children_of(idx),
        None => model.roots(),
    }
}

/// Advance navigation state by one action.
///
/// Pure over its inputs: returns the next state and the event to signal.
/// Every action is total; ill-targeted drills leave the state untouched
/// with no partial mutation.
pub fn reduce(model: &HierarchyModel, state: &NavState, action: NavAction) -> (NavState, NavEvent) {
    match action {
        NavAction::Drill(name) => reduce_drill(model, state, &name),
        NavAction::Back => {
            let mut next = state.clone();
            // Idempotent at the root
            next.path.pop();
            (next, NavEvent::Handled)
        }
        NavAction::Reset => {
            // Back to the freshly-mounted state: path and filters both empty
            (NavState::new(), NavEvent::Handled)
        }
        NavAction::ToggleFilter { key, value } => {
            let mut next = state.clone();
            let active = next.filters.toggle(&key, &value);
            debug!(key = %key, active = ?active, "filter toggled");
            (next, NavEvent::FilterToggled { key, value: active })
        }
        NavAction::ClearFilter(key) => {
            let mut next = state.clone();
            next.filters.clear(&key);
            (next, NavEvent::FilterCleared { key })
        }
    }
}

fn reduce_drill(model: &HierarchyModel, state: &NavState, name: &str) -> (NavState, NavEvent) {
    let level = current_level(model, state);
    let Some(idx) = model.find_in_level(level, name) else {
        debug!(name = %name, "drill target not in current level; ignoring");
        return (state.clone(), NavEvent::Rejected);
    };
    let Some(node) = model.get_node(idx) else {
        return (state.clone(), NavEvent::Rejected);
    };

    match &node.data.kind {
        NodeKind::Internal => {
            let mut next = state.clone();
            next.path.push(idx);
            let path = next.path.clone();
            debug!(name = %name, depth = path.len(), "drilled down");
            (next, NavEvent::DrilledDown { node: idx, path })
        }
        // Drilling and filtering are mutually exclusive outcomes: a leaf
        // selection is redirected to the filter path, never the breadcrumb.
        NodeKind::Leaf {
            filter_key,
            filter_value,
        } => reduce(
            model,
            state,
            NavAction::ToggleFilter {
                key: filter_key.clone(),
                value: filter_value.clone(),
            },
        ),
        NodeKind::Inert => (state.clone(), NavEvent::Rejected),
    }
}

/// Convenience wrapper owning one view's state against a borrowed model.
#[derive(Debug)]
pub struct DrilldownController<'a> {
    model: &'a HierarchyModel,
    state: NavState,
}

impl<'a> DrilldownController<'a> {
    pub fn new(model: &'a HierarchyModel) -> Self {
        Self {
            model,
            state: NavState::new(),
        }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn filters(&self) -> &FilterState {
        &self.state.filters
    }

    /// Snapshot of the breadcrumb path, root-first.
    pub fn current_path(&self) -> Vec<Index> {
        self.state.path.clone()
    }

    /// Breadcrumb names, root-first.
    pub fn breadcrumb(&self) -> Vec<String> {
        self.state
            .path
            .iter()
            .filter_map(|&idx| self.model.get_node(idx))
            .map(|node| node.data.name.clone())
            .collect()
    }

    pub fn current_level(&self) -> &'a [Index] {
        current_level(self.model, &self.state)
    }

    pub fn drill(&mut self, name: &str) -> NavEvent {
        self.apply(NavAction::Drill(name.to_string()))
    }

    pub fn back(&mut self) -> NavEvent {
        self.apply(NavAction::Back)
    }

    pub fn reset(&mut self) -> NavEvent {
        self.apply(NavAction::Reset)
    }

    pub fn toggle_filter(&mut self, key: &str, value: &str) -> NavEvent {
        self.apply(NavAction::ToggleFilter {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    pub fn clear_filter(&mut self, key: &str) -> NavEvent {
        self.apply(NavAction::ClearFilter(key.to_string()))
    }

    fn apply(&mut self, action: NavAction) -> NavEvent {
        let (next, event) = reduce(self.model, &self.state, action);
        self.state = next;
        event
    }
}
