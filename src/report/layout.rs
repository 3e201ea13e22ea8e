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

//! Layout tree handed to the rendering sink: sections contain panels,
//! panels contain named tables, tables carry their own styling rules.

use crate::domain::styling::{select_style, RowStyle, StyleRule};
use std::collections::BTreeMap;

/// The complete document handed to the renderer
#[derive(Debug, Clone)]
pub struct ReportDocument {
    /// Document title
    pub title: String,
    /// Top-level sections (this report always has exactly one)
    pub sections: Vec<Section>,
    /// Centered footer line
    pub footer: String,
}

/// One titled section of the report
#[derive(Debug, Clone)]
pub struct Section {
    /// Section heading
    pub heading: String,
    /// Panels in display order
    pub panels: Vec<Panel>,
}

/// A panel grouping one or more named tables
#[derive(Debug, Clone)]
pub struct Panel {
    /// Panel heading
    pub heading: String,
    /// Tables in display order
    pub tables: Vec<TableBlock>,
}

/// One named table bound to one collector's result
#[derive(Debug, Clone)]
pub struct TableBlock {
    /// Table heading
    pub heading: String,
    /// Column headers
    pub columns: Vec<String>,
    /// Data rows; empty when the category was unavailable or had no data
    pub rows: Vec<TableRow>,
    /// Conditional row styling rules, evaluated first-match-wins
    pub style_rules: Vec<StyleRule>,
}

impl TableBlock {
    /// A table without conditional styling
    pub fn plain(heading: impl Into<String>, columns: Vec<String>, rows: Vec<TableRow>) -> Self {
        Self {
            heading: heading.into(),
            columns,
            rows,
            style_rules: Vec::new(),
        }
    }

    /// Style for one row, if any rule matches
    pub fn style_for(&self, row: &TableRow) -> Option<&RowStyle> {
        select_style(&self.style_rules, &row.metrics)
    }
}

/// One table row: display cells plus named numeric metrics the styling
/// rules evaluate against
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    /// Cell text in column order
    pub cells: Vec<String>,
    /// Named metrics for conditional styling
    pub metrics: BTreeMap<String, f64>,
}

impl TableRow {
    /// A row with no metrics
    pub fn plain(cells: Vec<String>) -> Self {
        Self {
            cells,
            metrics: BTreeMap::new(),
        }
    }

    /// A row carrying one named metric
    pub fn with_metric(cells: Vec<String>, field: &str, value: f64) -> Self {
        let mut metrics = BTreeMap::new();
        metrics.insert(field.to_string(), value);
        Self { cells, metrics }
    }
}

/// Convenience for building column header lists
pub fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
