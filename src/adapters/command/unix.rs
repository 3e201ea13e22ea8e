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

//! Unix command execution adapter

use crate::domain::errors::ProbeError;
use crate::ports::{CommandOutput, CommandRunner};
use log::debug;
use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// Command runner backed by `std::process::Command`
pub struct UnixCommandRunner;

impl UnixCommandRunner {
    /// Create a new Unix command runner
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnixCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for UnixCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ProbeError> {
        debug!("executing: {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ProbeError::CommandNotFound(program.to_string()),
                _ => ProbeError::CommandFailed {
                    command: program.to_string(),
                    reason: e.to_string(),
                },
            })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            exit_code: output.status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_stdout() {
        let runner = UnixCommandRunner::new();
        let output = runner.run("echo", &["hello", "world"]).unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "hello world");
    }

    #[test]
    fn test_missing_command_maps_to_not_found() {
        let runner = UnixCommandRunner::new();
        let result = runner.run("definitely_not_a_real_command_12345", &[]);
        assert!(matches!(result, Err(ProbeError::CommandNotFound(_))));
    }

    #[test]
    fn test_failing_command_is_ok_but_unsuccessful() {
        let runner = UnixCommandRunner::new();
        let output = runner.run("false", &[]).unwrap();
        assert!(!output.success);
        assert!(output.require_success("false").is_err());
    }
}
