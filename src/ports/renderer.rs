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

use crate::domain::errors::RenderError;
use crate::report::layout::ReportDocument;
use std::path::Path;

/// Secondary port - report rendering sink
///
/// Accepts the assembled layout document and produces exactly one
/// self-contained HTML file at the given path, overwriting any existing
/// file. A failure here is fatal to the run.
pub trait ReportRenderer: Send + Sync {
    /// Render the document to the output path
    ///
    /// # Returns
    /// * `Ok(())` - The report file was written
    /// * `Err(RenderError)` - The file could not be written
    fn render(&self, document: &ReportDocument, output: &Path) -> Result<(), RenderError>;
}
