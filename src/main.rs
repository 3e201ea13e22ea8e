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

//! Command line entry point for the host health report

use chrono::Local;
use clap::Parser;
use host_health_report::{ReportContext, ServiceContainer};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use sysinfo::System;

#[derive(Parser)]
#[command(name = "host_health_report")]
#[command(about = "Generate a single-host inventory and health report as static HTML")]
struct Opt {
    /// Path of the HTML file to write
    #[arg(long, default_value = "host-health-report.html")]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = Opt::parse();

    let context = ReportContext {
        host_name: System::host_name().unwrap_or_else(|| "unknown-host".to_string()),
        user_name: std::env::var("USER")
            .or_else(|_| std::env::var("LOGNAME"))
            .unwrap_or_else(|_| "unknown".to_string()),
        generated_at: Local::now(),
    };

    let container = ServiceContainer::new();
    let pipeline = match container.create_pipeline() {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("failed to initialize: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match pipeline.run(&context, &opt.output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("report generation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
