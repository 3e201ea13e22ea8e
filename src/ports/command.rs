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

use crate::domain::errors::ProbeError;

/// Captured result of one external command run
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Whether the command exited successfully
    pub success: bool,
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// Standard output when the command succeeded, otherwise a
    /// `CommandFailed` error carrying the captured stderr.
    pub fn require_success(self, command: &str) -> Result<String, ProbeError> {
        if self.success {
            Ok(self.stdout)
        } else {
            Err(ProbeError::CommandFailed {
                command: command.to_string(),
                reason: if self.stderr.trim().is_empty() {
                    format!("exit code {:?}", self.exit_code)
                } else {
                    self.stderr.trim().to_string()
                },
            })
        }
    }
}

/// Secondary port - external command execution
///
/// Abstracts `std::process` so probes can be tested with canned output.
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion and capture its output
    ///
    /// # Returns
    /// * `Ok(CommandOutput)` - The process ran (it may still have failed)
    /// * `Err(ProbeError)` - The process could not be started
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ProbeError>;
}
