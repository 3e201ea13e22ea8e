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

//! Error types for the two failure tiers: recoverable probe failures and
//! fatal render failures.

use std::path::PathBuf;
use thiserror::Error;

/// Collector-tier errors raised while querying one category of host data.
///
/// These are always recoverable: the collection service logs them and
/// degrades the affected category to an empty result.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// An external command could not be executed
    #[error("command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// An external command is not installed on this host
    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// Reading a system file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Raw query output could not be interpreted
    #[error("failed to parse {source_name} output: {reason}")]
    Parse { source_name: String, reason: String },

    /// The probe has no implementation for the current operating system
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(&'static str),
}

impl ProbeError {
    /// Shorthand for a parse failure
    pub fn parse(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ProbeError::Parse {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Pipeline-tier errors raised while producing the HTML artifact.
///
/// These are fatal: no partial report is acceptable output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Creating the parent directory of the output path failed
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the report file failed
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level pipeline error returned to the binary entry point.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Preparing the report pipeline failed
    #[error("pipeline initialization failed: {0}")]
    Initialization(#[from] ProbeError),

    /// The final render/write call failed
    #[error(transparent)]
    Render(#[from] RenderError),
}
