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

//! Binds a collected inventory into the layout document: one host section,
//! fixed panel order, per-table styling rules, and the footer line.

use crate::domain::entities::{
    Collected, DiskVolume, FirmwareSummary, HostInventory, HostSummary, LocalAccount,
    MemorySummary, NetworkAdapter, ProcessorSummary, TIMESTAMP_FORMAT,
};
use crate::domain::styling::{disk_rules, memory_rules, USED_PERCENT};
use crate::report::layout::{columns, Panel, ReportDocument, Section, TableBlock, TableRow};
use chrono::{DateTime, Local};

/// Display context passed in explicitly so the assembler never reads
/// ambient process state
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// Host the report describes
    pub host_name: String,
    /// User invoking the run
    pub user_name: String,
    /// Generation timestamp
    pub generated_at: DateTime<Local>,
}

/// Assemble the full layout document from the collected inventory
pub fn build_document(inventory: &HostInventory, context: &ReportContext) -> ReportDocument {
    let section = Section {
        heading: context.host_name.clone(),
        panels: vec![
            Panel {
                heading: "Overview".to_string(),
                tables: vec![
                    computer_table(&inventory.host),
                    operating_system_table(&inventory.host),
                    processor_table(&inventory.processor),
                    firmware_table(&inventory.firmware),
                ],
            },
            Panel {
                heading: "Resources".to_string(),
                tables: vec![
                    memory_table(&inventory.memory),
                    disks_table(&inventory.disks),
                ],
            },
            Panel {
                heading: "Connectivity".to_string(),
                tables: vec![network_table(&inventory.network_adapters)],
            },
            Panel {
                heading: "Accounts".to_string(),
                tables: vec![accounts_table(&inventory.local_accounts)],
            },
        ],
    };

    ReportDocument {
        title: format!("Host Health Report: {}", context.host_name),
        sections: vec![section],
        footer: format!(
            "Generated {} | Host: {} | User: {}",
            context.generated_at.format(TIMESTAMP_FORMAT),
            context.host_name,
            context.user_name
        ),
    }
}

const FIELD_VALUE: &[&str] = &["Field", "Value"];

fn computer_table(host: &Collected<HostSummary>) -> TableBlock {
    let rows = host
        .ready()
        .map(|host| {
            vec![
                kv("Device type", &host.device_type),
                kv("Host name", &host.host_name),
                kv("Manufacturer", &host.manufacturer),
                kv("Model", &host.model),
                // Exactly one of domain/workgroup applies; the row label
                // says which.
                kv(host.membership.kind_label(), host.membership.name()),
            ]
        })
        .unwrap_or_default();
    TableBlock::plain("Computer", columns(FIELD_VALUE), rows)
}

fn operating_system_table(host: &Collected<HostSummary>) -> TableBlock {
    let rows = host
        .ready()
        .map(|host| {
            vec![
                kv("Caption", &host.os_caption),
                kv("Version", &host.os_version),
                kv("Architecture", &host.os_architecture),
                kv("Install date", &host.install_date_text()),
                kv("Last boot", &host.last_boot_text()),
                kv("Current user", &host.current_user),
            ]
        })
        .unwrap_or_default();
    TableBlock::plain("Operating System", columns(FIELD_VALUE), rows)
}

fn processor_table(processor: &Collected<ProcessorSummary>) -> TableBlock {
    let rows = processor
        .ready()
        .map(|cpu| {
            vec![
                kv("Name", &cpu.name),
                kv("Cores", &cpu.cores.to_string()),
                kv("Logical processors", &cpu.logical_processors.to_string()),
                kv("Max clock speed", &cpu.max_clock),
            ]
        })
        .unwrap_or_default();
    TableBlock::plain("Processor", columns(FIELD_VALUE), rows)
}

fn firmware_table(firmware: &Collected<FirmwareSummary>) -> TableBlock {
    let rows = firmware
        .ready()
        .map(|fw| {
            vec![
                kv("Manufacturer", &fw.manufacturer),
                kv("Version", &fw.version),
                kv("Release date", &fw.release_date),
                kv("Serial number", &fw.serial_number),
            ]
        })
        .unwrap_or_default();
    TableBlock::plain("Firmware", columns(FIELD_VALUE), rows)
}

fn memory_table(memory: &Collected<MemorySummary>) -> TableBlock {
    let rows = memory
        .ready()
        .map(|mem| {
            vec![TableRow::with_metric(
                vec![
                    format!("{:.2}", mem.total_gb),
                    format!("{:.2}", mem.free_gb),
                    format!("{:.2}", mem.used_gb),
                    format!("{:.2}", mem.used_percent),
                ],
                USED_PERCENT,
                mem.used_percent,
            )]
        })
        .unwrap_or_default();
    TableBlock {
        heading: "Memory".to_string(),
        columns: columns(&["Total (GB)", "Free (GB)", "Used (GB)", "Used %"]),
        rows,
        style_rules: memory_rules(),
    }
}

fn disks_table(disks: &Collected<Vec<DiskVolume>>) -> TableBlock {
    let rows = disks
        .ready()
        .map(|volumes| {
            volumes
                .iter()
                .map(|volume| {
                    TableRow::with_metric(
                        vec![
                            volume.device_id.clone(),
                            volume.filesystem.clone(),
                            format!("{:.2}", volume.capacity_gb),
                            format!("{:.2}", volume.free_gb),
                            format!("{:.2}", volume.used_percent),
                        ],
                        USED_PERCENT,
                        volume.used_percent,
                    )
                })
                .collect()
        })
        .unwrap_or_default();
    TableBlock {
        heading: "Disks".to_string(),
        columns: columns(&[
            "Device",
            "Filesystem",
            "Capacity (GB)",
            "Free (GB)",
            "Used %",
        ]),
        rows,
        style_rules: disk_rules(),
    }
}

fn network_table(adapters: &Collected<Vec<NetworkAdapter>>) -> TableBlock {
    let rows = adapters
        .ready()
        .map(|adapters| {
            adapters
                .iter()
                .map(|adapter| {
                    TableRow::plain(vec![
                        adapter.description.clone(),
                        adapter.ip_list(),
                        adapter.mask_list(),
                        adapter.gateway_text(),
                        adapter.dns_list(),
                        yes_no(adapter.dhcp_enabled),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();
    TableBlock::plain(
        "Network Adapters",
        columns(&[
            "Adapter",
            "IP addresses",
            "Subnet masks",
            "Default gateway",
            "DNS servers",
            "DHCP",
        ]),
        rows,
    )
}

fn accounts_table(accounts: &Collected<Vec<LocalAccount>>) -> TableBlock {
    let rows = accounts
        .ready()
        .map(|accounts| {
            accounts
                .iter()
                .map(|account| {
                    TableRow::plain(vec![
                        account.username.clone(),
                        yes_no(account.enabled),
                        account.last_logon_text(),
                        yes_no(account.password_required),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();
    TableBlock::plain(
        "Local Accounts",
        columns(&["Username", "Enabled", "Last logon", "Password required"]),
        rows,
    )
}

fn kv(field: &str, value: &str) -> TableRow {
    TableRow::plain(vec![field.to_string(), value.to_string()])
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}
