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

//! Dependency injection container wiring adapters into the report pipeline

use crate::adapters::{HtmlReportRenderer, LinuxSystemProbe, UnixCommandRunner};
use crate::domain::errors::ProbeError;
use crate::domain::services::InventoryCollector;
use crate::ports::{CommandRunner, ReportRenderer, SystemProbe};
use crate::report::ReportPipeline;
use std::sync::Arc;

/// Dependency injection container
pub struct ServiceContainer;

impl ServiceContainer {
    /// Create a new service container
    pub fn new() -> Self {
        Self
    }

    /// Create the command runner
    pub fn create_command_runner(&self) -> Arc<dyn CommandRunner> {
        Arc::new(UnixCommandRunner::new())
    }

    /// Create the platform-specific system probe
    pub fn create_system_probe(&self) -> Result<Arc<dyn SystemProbe>, ProbeError> {
        if cfg!(target_os = "linux") {
            Ok(Arc::new(LinuxSystemProbe::new(
                self.create_command_runner(),
            )))
        } else {
            Err(ProbeError::UnsupportedPlatform(std::env::consts::OS))
        }
    }

    /// Create the report renderer
    pub fn create_renderer(&self) -> Arc<dyn ReportRenderer> {
        Arc::new(HtmlReportRenderer::new())
    }

    /// Wire the full pipeline: probe, collector, renderer
    pub fn create_pipeline(&self) -> Result<ReportPipeline, ProbeError> {
        let probe = self.create_system_probe()?;
        let collector = InventoryCollector::new(probe);
        Ok(ReportPipeline::new(collector, self.create_renderer()))
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}
