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

//! Host Health Report Library
//!
//! This library collects a single host's inventory and health data and
//! renders it as one self-contained static HTML file, using a Ports and
//! Adapters (Hexagonal) architecture for maintainability and testability.
//!
//! # Architecture
//!
//! - **Domain**: Record entities, unit math, parsers, styling rules, and
//!   the collection service
//! - **Ports**: Interfaces for external interactions
//! - **Adapters**: Platform-specific implementations
//!
//! # Usage
//!
//! ```rust,no_run
//! use host_health_report::{ReportContext, ServiceContainer};
//! use std::path::Path;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let container = ServiceContainer::new();
//!     let pipeline = container.create_pipeline()?;
//!
//!     let context = ReportContext {
//!         host_name: "testbox".to_string(),
//!         user_name: "alice".to_string(),
//!         generated_at: chrono::Local::now(),
//!     };
//!     pipeline.run(&context, Path::new("host-health-report.html"))?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod container;
pub mod domain;
pub mod ports;
pub mod report;

pub use container::ServiceContainer;
pub use domain::{
    Collected, HostInventory, InventoryCollector, Membership, ProbeError, RenderError, ReportError,
};
pub use ports::{CommandRunner, ReportRenderer, SystemProbe};
pub use report::{build_document, ReportContext, ReportDocument, ReportPipeline};
