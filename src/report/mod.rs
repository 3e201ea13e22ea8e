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

//! Report assembly: the layout model, the assembler, and the pipeline that
//! sequences collection and rendering.

pub mod assembler;
pub mod layout;

pub use assembler::{build_document, ReportContext};
pub use layout::{columns, Panel, ReportDocument, Section, TableBlock, TableRow};

use crate::domain::errors::ReportError;
use crate::domain::services::InventoryCollector;
use crate::ports::ReportRenderer;
use log::info;
use std::path::Path;
use std::sync::Arc;

/// Sequences the full run: collect all categories in fixed order, assemble
/// the document, and issue the single render call.
///
/// Collector failures have already been degraded to empty categories by the
/// time rendering happens; only a render failure escapes this call.
pub struct ReportPipeline {
    collector: InventoryCollector,
    renderer: Arc<dyn ReportRenderer>,
}

impl ReportPipeline {
    /// Create a pipeline over a collector and a rendering sink
    pub fn new(collector: InventoryCollector, renderer: Arc<dyn ReportRenderer>) -> Self {
        Self {
            collector,
            renderer,
        }
    }

    /// Execute one run, writing the report to `output`
    pub fn run(&self, context: &ReportContext, output: &Path) -> Result<(), ReportError> {
        info!("collecting host inventory for {}", context.host_name);
        let inventory = self.collector.collect_all();

        let document = build_document(&inventory, context);
        self.renderer.render(&document, output)?;

        info!("report written to {}", output.display());
        Ok(())
    }
}
