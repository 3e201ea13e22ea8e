/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Conditional row styling: an ordered list of (comparison, style) rules
//! evaluated first-match-wins against a named per-row metric.

use std::collections::BTreeMap;

/// Visual style applied to a table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStyle {
    /// CSS class name emitted by the renderer
    pub class: &'static str,
    /// Background color
    pub background: &'static str,
    /// Foreground (text) color
    pub foreground: &'static str,
}

/// Critical utilization
pub const ALERT: RowStyle = RowStyle {
    class: "alert",
    background: "#fde8e8",
    foreground: "#9b1c1c",
};

/// Elevated utilization
pub const WARNING: RowStyle = RowStyle {
    class: "warning",
    background: "#fdf6b2",
    foreground: "#723b13",
};

/// Normal utilization
pub const OK: RowStyle = RowStyle {
    class: "ok",
    background: "#def7ec",
    foreground: "#03543f",
};

/// Comparison operator for a styling rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Strictly greater than the threshold
    GreaterThan,
    /// Greater than or equal to the threshold
    AtLeast,
}

impl Comparison {
    fn matches(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::GreaterThan => value > threshold,
            Comparison::AtLeast => value >= threshold,
        }
    }
}

/// One styling rule: field name, comparison, threshold, resulting style
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// Metric field the rule reads
    pub field: &'static str,
    /// Comparison operator
    pub comparison: Comparison,
    /// Threshold value
    pub threshold: f64,
    /// Style applied when the rule matches
    pub style: RowStyle,
}

impl StyleRule {
    /// Evaluate the rule against a row's metric map.
    ///
    /// A rule whose field is absent from the row never matches.
    pub fn applies(&self, metrics: &BTreeMap<String, f64>) -> bool {
        metrics
            .get(self.field)
            .map(|value| self.comparison.matches(*value, self.threshold))
            .unwrap_or(false)
    }
}

/// Select the style for a row: the first rule that matches wins, later
/// rules are ignored.
pub fn select_style<'a>(
    rules: &'a [StyleRule],
    metrics: &BTreeMap<String, f64>,
) -> Option<&'a RowStyle> {
    rules.iter().find(|rule| rule.applies(metrics)).map(|rule| &rule.style)
}

/// Metric field carrying utilization percentages
pub const USED_PERCENT: &str = "used_percent";

/// Rules for the Disks table: three tiers, alert above 90, warning above
/// 75, ok otherwise.
pub fn disk_rules() -> Vec<StyleRule> {
    vec![
        StyleRule {
            field: USED_PERCENT,
            comparison: Comparison::GreaterThan,
            threshold: 90.0,
            style: ALERT,
        },
        StyleRule {
            field: USED_PERCENT,
            comparison: Comparison::GreaterThan,
            threshold: 75.0,
            style: WARNING,
        },
        StyleRule {
            field: USED_PERCENT,
            comparison: Comparison::AtLeast,
            threshold: 0.0,
            style: OK,
        },
    ]
}

/// Rules for the Memory table: two tiers only, no explicit ok tier.
///
/// The missing third tier is intentional: the source layout this report
/// reproduces styles memory rows only when utilization is elevated, and the
/// asymmetry with the Disks table is kept rather than normalized away.
pub fn memory_rules() -> Vec<StyleRule> {
    vec![
        StyleRule {
            field: USED_PERCENT,
            comparison: Comparison::GreaterThan,
            threshold: 90.0,
            style: ALERT,
        },
        StyleRule {
            field: USED_PERCENT,
            comparison: Comparison::GreaterThan,
            threshold: 75.0,
            style: WARNING,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(value: f64) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        map.insert(USED_PERCENT.to_string(), value);
        map
    }

    #[test]
    fn test_disk_alert_boundary_is_strict() {
        let rules = disk_rules();
        // Exactly 90 is warning, not alert
        assert_eq!(select_style(&rules, &metrics(90.0)), Some(&WARNING));
        assert_eq!(select_style(&rules, &metrics(90.01)), Some(&ALERT));
    }

    #[test]
    fn test_disk_warning_boundary_is_strict() {
        let rules = disk_rules();
        assert_eq!(select_style(&rules, &metrics(75.0)), Some(&OK));
        assert_eq!(select_style(&rules, &metrics(75.01)), Some(&WARNING));
    }

    #[test]
    fn test_disk_ok_tier_covers_low_utilization() {
        let rules = disk_rules();
        assert_eq!(select_style(&rules, &metrics(0.0)), Some(&OK));
        assert_eq!(select_style(&rules, &metrics(42.5)), Some(&OK));
    }

    #[test]
    fn test_memory_has_no_ok_tier() {
        let rules = memory_rules();
        assert_eq!(select_style(&rules, &metrics(95.0)), Some(&ALERT));
        assert_eq!(select_style(&rules, &metrics(80.0)), Some(&WARNING));
        assert_eq!(select_style(&rules, &metrics(50.0)), None);
    }

    #[test]
    fn test_rule_with_missing_field_never_matches() {
        let rules = disk_rules();
        let empty = BTreeMap::new();
        assert_eq!(select_style(&rules, &empty), None);
    }

    #[test]
    fn test_first_match_wins_order() {
        // 95% satisfies all three disk rules; the first (alert) must win.
        let rules = disk_rules();
        assert_eq!(select_style(&rules, &metrics(95.0)), Some(&ALERT));
    }
}
