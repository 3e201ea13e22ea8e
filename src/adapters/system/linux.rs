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

//! Linux system probe using sysinfo, the DMI sysfs tree, and standard
//! system commands.

use crate::domain::entities::{
    DiskReading, FirmwareSummary, HostSummary, LocalAccount, Membership, MemoryReading,
    NetworkAdapter, ProcessorReading,
};
use crate::domain::errors::ProbeError;
use crate::domain::parsers::{
    accounts_from, adapters_from, chassis_type_name, clean_dmi_value, parse_default_routes,
    parse_ip_addr_json, parse_lastlog, parse_passwd, parse_resolv_conf, parse_shadow,
};
use crate::ports::{CommandRunner, SystemProbe};
use chrono::{DateTime, Local, TimeZone};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};

const DMI_DIR: &str = "/sys/class/dmi/id";

/// Linux system probe
pub struct LinuxSystemProbe {
    runner: Arc<dyn CommandRunner>,
}

impl LinuxSystemProbe {
    /// Create a new Linux probe over the given command runner
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Read and normalize one DMI attribute
    fn read_dmi(&self, name: &str) -> Option<String> {
        fs::read_to_string(Path::new(DMI_DIR).join(name))
            .ok()
            .map(|raw| clean_dmi_value(&raw))
    }

    fn dmi_or_unknown(&self, name: &str) -> String {
        self.read_dmi(name).unwrap_or_else(|| "Unknown".to_string())
    }

    /// Determine domain membership from the host's DNS domain name
    fn membership(&self) -> Membership {
        let domain = self
            .runner
            .run("dnsdomainname", &[])
            .ok()
            .filter(|out| out.success)
            .map(|out| out.stdout.trim().to_string());
        membership_from_domain(domain.as_deref())
    }
}

impl SystemProbe for LinuxSystemProbe {
    fn host_summary(&self) -> Result<HostSummary, ProbeError> {
        let host_name = System::host_name()
            .ok_or_else(|| ProbeError::parse("hostname", "host name unavailable"))?;

        let device_type = self
            .read_dmi("chassis_type")
            .map(|code| chassis_type_name(&code).to_string())
            .unwrap_or_else(|| "Other".to_string());

        Ok(HostSummary {
            device_type,
            host_name,
            manufacturer: self.dmi_or_unknown("sys_vendor"),
            model: self.dmi_or_unknown("product_name"),
            membership: self.membership(),
            os_caption: System::long_os_version()
                .or_else(System::name)
                .unwrap_or_else(|| "Linux".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            os_architecture: System::cpu_arch().unwrap_or_else(|| "Unknown".to_string()),
            install_date: install_date(),
            last_boot: boot_time(),
            current_user: current_user(),
        })
    }

    fn processor(&self) -> Result<ProcessorReading, ProbeError> {
        let sys = System::new_with_specifics(
            RefreshKind::new().with_cpu(CpuRefreshKind::everything()),
        );
        let cpus = sys.cpus();
        let first = cpus
            .first()
            .ok_or_else(|| ProbeError::parse("sysinfo", "no CPUs reported"))?;

        Ok(ProcessorReading {
            name: first.brand().trim().to_string(),
            cores: sys.physical_core_count().unwrap_or(cpus.len()) as u32,
            logical_processors: cpus.len() as u32,
            max_clock_mhz: cpus.iter().map(|cpu| cpu.frequency()).max().unwrap_or(0),
        })
    }

    fn memory(&self) -> Result<MemoryReading, ProbeError> {
        let sys = System::new_with_specifics(
            RefreshKind::new().with_memory(MemoryRefreshKind::everything()),
        );
        if sys.total_memory() == 0 {
            return Err(ProbeError::parse("sysinfo", "total memory reported as 0"));
        }
        Ok(MemoryReading {
            total_bytes: sys.total_memory(),
            available_bytes: sys.available_memory(),
        })
    }

    fn firmware(&self) -> Result<FirmwareSummary, ProbeError> {
        if !Path::new(DMI_DIR).exists() {
            return Err(ProbeError::Io {
                path: DMI_DIR.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "DMI sysfs tree not present",
                ),
            });
        }
        // Individual attributes may be unreadable without privileges;
        // they degrade to "Unknown" rather than failing the category.
        Ok(FirmwareSummary {
            manufacturer: self.dmi_or_unknown("bios_vendor"),
            version: self.dmi_or_unknown("bios_version"),
            release_date: self.dmi_or_unknown("bios_date"),
            serial_number: self.dmi_or_unknown("product_serial"),
        })
    }

    fn disk_volumes(&self) -> Result<Vec<DiskReading>, ProbeError> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disks
            .list()
            .iter()
            .filter(|disk| {
                is_fixed_volume(
                    &disk.file_system().to_string_lossy(),
                    disk.is_removable(),
                )
            })
            .map(|disk| DiskReading {
                device_id: disk.mount_point().to_string_lossy().to_string(),
                filesystem: disk.file_system().to_string_lossy().to_string(),
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
            .collect())
    }

    fn network_adapters(&self) -> Result<Vec<NetworkAdapter>, ProbeError> {
        let addr_json = self
            .runner
            .run("ip", &["-j", "addr", "show"])?
            .require_success("ip -j addr show")?;
        let links = parse_ip_addr_json(&addr_json)
            .map_err(|reason| ProbeError::parse("ip -j addr show", reason))?;

        // No default route is a valid configuration, not a failure
        let routes = match self.runner.run("ip", &["route", "show", "default"]) {
            Ok(out) if out.success => parse_default_routes(&out.stdout),
            _ => HashMap::new(),
        };

        let dns_servers = fs::read_to_string("/etc/resolv.conf")
            .map(|text| parse_resolv_conf(&text))
            .unwrap_or_default();

        Ok(adapters_from(links, &routes, &dns_servers))
    }

    fn local_accounts(&self) -> Result<Vec<LocalAccount>, ProbeError> {
        let passwd_text = fs::read_to_string("/etc/passwd").map_err(|source| ProbeError::Io {
            path: "/etc/passwd".to_string(),
            source,
        })?;

        // Shadow needs privileges; accounts fall back to safe defaults
        let shadow = fs::read_to_string("/etc/shadow")
            .map(|text| parse_shadow(&text))
            .unwrap_or_default();

        let lastlog = match self.runner.run("lastlog", &[]) {
            Ok(out) if out.success => parse_lastlog(&out.stdout),
            _ => HashMap::new(),
        };

        Ok(accounts_from(parse_passwd(&passwd_text), &shadow, &lastlog))
    }
}

/// Filesystems that are not fixed local volumes: pseudo, network, and
/// optical media
const EXCLUDED_FILESYSTEMS: &[&str] = &[
    "tmpfs", "devtmpfs", "ramfs", "overlay", "squashfs", "proc", "sysfs", "autofs", "nfs", "nfs4",
    "cifs", "smbfs", "9p", "iso9660", "udf", "vfat-removable",
];

fn is_fixed_volume(filesystem: &str, removable: bool) -> bool {
    !removable && !EXCLUDED_FILESYSTEMS.contains(&filesystem)
}

fn membership_from_domain(domain: Option<&str>) -> Membership {
    match domain {
        Some(name) if !name.is_empty() && name != "(none)" => {
            Membership::Domain(name.to_string())
        }
        _ => Membership::Workgroup("WORKGROUP".to_string()),
    }
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

fn boot_time() -> Option<DateTime<Local>> {
    Local.timestamp_opt(System::boot_time() as i64, 0).single()
}

/// The machine-id file is written once during provisioning, which makes
/// its timestamp the closest Linux analog of an OS install date.
fn install_date() -> Option<DateTime<Local>> {
    let metadata = fs::metadata("/etc/machine-id").ok()?;
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .ok()
        .map(DateTime::<Local>::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_volume_filter() {
        assert!(is_fixed_volume("ext4", false));
        assert!(is_fixed_volume("xfs", false));
        assert!(is_fixed_volume("btrfs", false));
        // Removable media are excluded regardless of filesystem
        assert!(!is_fixed_volume("ext4", true));
        // Network and optical filesystems are excluded
        assert!(!is_fixed_volume("nfs4", false));
        assert!(!is_fixed_volume("cifs", false));
        assert!(!is_fixed_volume("iso9660", false));
        // Pseudo filesystems are excluded
        assert!(!is_fixed_volume("tmpfs", false));
        assert!(!is_fixed_volume("overlay", false));
    }

    #[test]
    fn test_membership_from_domain() {
        assert_eq!(
            membership_from_domain(Some("corp.example.com")),
            Membership::Domain("corp.example.com".to_string())
        );
        assert_eq!(
            membership_from_domain(Some("")),
            Membership::Workgroup("WORKGROUP".to_string())
        );
        assert_eq!(
            membership_from_domain(Some("(none)")),
            Membership::Workgroup("WORKGROUP".to_string())
        );
        assert_eq!(
            membership_from_domain(None),
            Membership::Workgroup("WORKGROUP".to_string())
        );
    }
}
