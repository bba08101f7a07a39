//! Pure aggregation over a level snapshot: totals and percentages.
//!
//! Stateless functions over whatever level the controller currently exposes.
//! Display formatting lives in [`crate::format`] and never feeds back here.

use generational_arena::Index;

use crate::domain::arena::HierarchyModel;

/// One row of a rendered level: computed share alongside the raw value.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelEntry {
    pub index: Index,
    pub name: String,
    pub value: f64,
    pub percentage: f64,
}

/// Snapshot of a whole level with its total, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSummary {
    pub total: f64,
    pub entries: Vec<LevelEntry>,
}

/// Sum of values over a level. Empty levels total 0.
pub fn level_total(model: &HierarchyModel, level: &[Index]) -> f64 {
    level
        .iter()
        .filter_map(|&idx| model.get_node(idx))
        .map(|node| node.data.value)
        .sum()
}

/// Share of `value` in `total`, as a percentage. Never divides by zero:
/// a non-positive total yields 0 for every node.
pub fn percentage(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        (value / total) * 100.0
    } else {
        0.0
    }
}

/// Compute the full summary for a level, in the order the caller supplies.
/// No implicit sort; see [`sort_by_value_desc`] for the bar-chart transform.
pub fn summarize_level(model: &HierarchyModel, level: &[Index]) -> LevelSummary {
    let total = level_total(model, level);
    let entries = level
        .iter()
        .filter_map(|&idx| model.get_node(idx).map(|node| (idx, node)))
        .map(|(idx, node)| LevelEntry {
            index: idx,
            name: node.data.name.clone(),
            value: node.data.value,
            percentage: percentage(node.data.value, total),
        })
        .collect();
    LevelSummary { total, entries }
}

/// Caller-level transform for value-descending presentations (bar charts).
/// Stable: equal values keep document order.
pub fn sort_by_value_desc(entries: &mut [LevelEntry]) {
    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::ModelBuilder;

    fn two_level_model() -> HierarchyModel {
        ModelBuilder::from_json(
            r#"[
                {"name": "AI", "value": 80, "children": [
                    {"name": "Copilot", "value": 50, "filter_key": "track"},
                    {"name": "Security", "value": 30, "filter_key": "track"}
                ]},
                {"name": "Git", "value": 20, "filter_key": "track"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn given_root_level_when_totalling_then_sums_values() {
        let model = two_level_model();
        assert_eq!(level_total(&model, model.roots()), 100.0);
    }

    #[test]
    fn given_empty_level_when_totalling_then_zero() {
        let model = two_level_model();
        assert_eq!(level_total(&model, &[]), 0.0);
    }

    #[test]
    fn given_zero_total_when_computing_percentage_then_zero() {
        assert_eq!(percentage(50.0, 0.0), 0.0);
        assert_eq!(percentage(0.0, 0.0), 0.0);
    }

    #[test]
    fn given_level_when_summarizing_then_percentages_sum_to_hundred() {
        let model = two_level_model();
        let summary = summarize_level(&model, model.roots());
        let sum: f64 = summary.entries.iter().map(|e| e.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum was {}", sum);
    }

    #[test]
    fn given_child_level_when_summarizing_then_matches_two_level_model() {
        let model = two_level_model();
        let children = model.children_of(model.roots()[0]);
        let summary = summarize_level(&model, children);
        assert_eq!(summary.total, 80.0);
        assert_eq!(summary.entries[0].percentage, 62.5);
        assert_eq!(summary.entries[1].percentage, 37.5);
    }

    #[test]
    fn given_all_zero_values_when_summarizing_then_every_percentage_is_zero() {
        let model = ModelBuilder::from_json(
            r#"[
                {"name": "A", "value": 0, "filter_key": "k"},
                {"name": "B", "value": 0, "filter_key": "k"}
            ]"#,
        )
        .unwrap();
        let summary = summarize_level(&model, model.roots());
        assert_eq!(summary.total, 0.0);
        assert!(summary.entries.iter().all(|e| e.percentage == 0.0));
    }

    #[test]
    fn given_summary_when_sorting_desc_then_largest_first() {
        let model = two_level_model();
        let mut summary = summarize_level(&model, model.roots());
        // Document order is already descending here, so reverse first
        summary.entries.reverse();
        sort_by_value_desc(&mut summary.entries);
        assert_eq!(summary.entries[0].name, "AI");
        assert_eq!(summary.entries[1].name, "Git");
    }
}
