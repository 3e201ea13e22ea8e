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

//! Record shapes for the seven collector categories, plus the raw readings
//! the platform probe hands to the collection service.

use chrono::{DateTime, Local};
use serde::Serialize;

/// Timestamp display format used throughout the report
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of one collector run: either a fully populated value or an
/// explicit marker that the category could not be collected.
///
/// This keeps "probe failed" distinguishable from "succeeded with no data"
/// (an empty `Vec` inside `Ready` is the latter).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Collected<T> {
    /// The category was collected successfully
    Ready(T),
    /// The query failed; the report shows an empty section
    Unavailable,
}

impl<T> Collected<T> {
    /// Borrow the collected value, if any
    pub fn ready(&self) -> Option<&T> {
        match self {
            Collected::Ready(value) => Some(value),
            Collected::Unavailable => None,
        }
    }

    /// True when the category could not be collected
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Collected::Unavailable)
    }

    /// Map the collected value, preserving `Unavailable`
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Collected<U> {
        match self {
            Collected::Ready(value) => Collected::Ready(f(value)),
            Collected::Unavailable => Collected::Unavailable,
        }
    }
}

impl<T> Default for Collected<T> {
    fn default() -> Self {
        Collected::Unavailable
    }
}

/// Domain or workgroup membership of the host.
///
/// A host belongs to exactly one of the two, so the report shows a single
/// row labeled with whichever applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Membership {
    /// Host is joined to a directory domain
    Domain(String),
    /// Host is a standalone workgroup member
    Workgroup(String),
}

impl Membership {
    /// Row label for the report ("Domain" or "Workgroup")
    pub fn kind_label(&self) -> &'static str {
        match self {
            Membership::Domain(_) => "Domain",
            Membership::Workgroup(_) => "Workgroup",
        }
    }

    /// The domain or workgroup name
    pub fn name(&self) -> &str {
        match self {
            Membership::Domain(name) | Membership::Workgroup(name) => name,
        }
    }
}

/// Host identity and operating system summary
#[derive(Debug, Clone, Serialize)]
pub struct HostSummary {
    /// Chassis classification (e.g. "Desktop", "Notebook", "Rack Mount Chassis")
    pub device_type: String,
    /// System hostname
    pub host_name: String,
    /// Hardware manufacturer
    pub manufacturer: String,
    /// Hardware model / product name
    pub model: String,
    /// Domain or workgroup membership
    pub membership: Membership,
    /// OS caption (distribution / product name)
    pub os_caption: String,
    /// OS version
    pub os_version: String,
    /// CPU architecture the OS runs on
    pub os_architecture: String,
    /// OS install date, when determinable
    pub install_date: Option<DateTime<Local>>,
    /// Last boot time
    pub last_boot: Option<DateTime<Local>>,
    /// User invoking the report run
    pub current_user: String,
}

impl HostSummary {
    /// Install date as display text
    pub fn install_date_text(&self) -> String {
        format_timestamp(self.install_date)
    }

    /// Last boot as display text
    pub fn last_boot_text(&self) -> String {
        format_timestamp(self.last_boot)
    }
}

/// Raw processor reading from the probe
#[derive(Debug, Clone, Serialize)]
pub struct ProcessorReading {
    /// Processor brand string
    pub name: String,
    /// Physical core count
    pub cores: u32,
    /// Logical processor count
    pub logical_processors: u32,
    /// Maximum clock speed in MHz
    pub max_clock_mhz: u64,
}

/// Processor summary as rendered in the report
#[derive(Debug, Clone, Serialize)]
pub struct ProcessorSummary {
    /// Processor brand string
    pub name: String,
    /// Physical core count
    pub cores: u32,
    /// Logical processor count
    pub logical_processors: u32,
    /// Maximum clock speed, e.g. "3600 MHz"
    pub max_clock: String,
}

/// Raw memory reading from the probe, in bytes
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MemoryReading {
    /// Total installed RAM
    pub total_bytes: u64,
    /// RAM currently available to applications
    pub available_bytes: u64,
}

/// Memory summary in GB with derived utilization
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MemorySummary {
    /// Total RAM in GB
    pub total_gb: f64,
    /// Free RAM in GB
    pub free_gb: f64,
    /// Used RAM in GB
    pub used_gb: f64,
    /// Utilization percentage in [0, 100]
    pub used_percent: f64,
}

/// BIOS / firmware summary
#[derive(Debug, Clone, Serialize)]
pub struct FirmwareSummary {
    /// Firmware vendor
    pub manufacturer: String,
    /// Firmware version
    pub version: String,
    /// Release date as reported by the firmware
    pub release_date: String,
    /// Product serial number
    pub serial_number: String,
}

/// Raw fixed-volume reading from the probe, in bytes
#[derive(Debug, Clone, Serialize)]
pub struct DiskReading {
    /// Volume identifier (mount point)
    pub device_id: String,
    /// Filesystem type
    pub filesystem: String,
    /// Volume capacity
    pub total_bytes: u64,
    /// Free space
    pub available_bytes: u64,
}

/// Fixed local volume as rendered in the report
#[derive(Debug, Clone, Serialize)]
pub struct DiskVolume {
    /// Volume identifier (mount point)
    pub device_id: String,
    /// Filesystem type
    pub filesystem: String,
    /// Capacity in GB
    pub capacity_gb: f64,
    /// Free space in GB
    pub free_gb: f64,
    /// Utilization percentage in [0, 100]
    pub used_percent: f64,
}

/// Network adapter with an active IP configuration
#[derive(Debug, Clone, Serialize)]
pub struct NetworkAdapter {
    /// Adapter description (interface name)
    pub description: String,
    /// Assigned IP addresses
    pub ip_addresses: Vec<String>,
    /// Subnet masks (dotted quad for IPv4, prefix length for IPv6)
    pub subnet_masks: Vec<String>,
    /// Default gateway, if one is routed through this adapter
    pub default_gateway: Option<String>,
    /// Configured DNS servers
    pub dns_servers: Vec<String>,
    /// Whether at least one address was assigned dynamically
    pub dhcp_enabled: bool,
}

impl NetworkAdapter {
    /// IP addresses as one comma-joined cell
    pub fn ip_list(&self) -> String {
        self.ip_addresses.join(", ")
    }

    /// Subnet masks as one comma-joined cell
    pub fn mask_list(&self) -> String {
        self.subnet_masks.join(", ")
    }

    /// DNS servers as one comma-joined cell
    pub fn dns_list(&self) -> String {
        self.dns_servers.join(", ")
    }

    /// Default gateway, or the literal "none" when absent
    pub fn gateway_text(&self) -> String {
        self.default_gateway
            .clone()
            .unwrap_or_else(|| "none".to_string())
    }
}

/// Local user account
#[derive(Debug, Clone, Serialize)]
pub struct LocalAccount {
    /// Account name
    pub username: String,
    /// Whether the account is enabled (not locked)
    pub enabled: bool,
    /// Most recent logon, if the account ever logged in
    pub last_logon: Option<DateTime<Local>>,
    /// Whether a password is set for the account
    pub password_required: bool,
}

impl LocalAccount {
    /// Last logon as display text, or the literal "never"
    pub fn last_logon_text(&self) -> String {
        match self.last_logon {
            Some(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
            None => "never".to_string(),
        }
    }
}

/// Everything one report run collects, one slot per category.
///
/// Slots are filled in the fixed collection order: Computer, Processor,
/// Memory, BIOS, Disk, Network, Users.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostInventory {
    /// Host identity and OS summary
    pub host: Collected<HostSummary>,
    /// Processor summary
    pub processor: Collected<ProcessorSummary>,
    /// Memory summary
    pub memory: Collected<MemorySummary>,
    /// Firmware summary
    pub firmware: Collected<FirmwareSummary>,
    /// Fixed local volumes
    pub disks: Collected<Vec<DiskVolume>>,
    /// Active network adapters
    pub network_adapters: Collected<Vec<NetworkAdapter>>,
    /// Local user accounts
    pub local_accounts: Collected<Vec<LocalAccount>>,
}

fn format_timestamp(ts: Option<DateTime<Local>>) -> String {
    match ts {
        Some(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
        None => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collected_default_is_unavailable() {
        let collected: Collected<Vec<DiskVolume>> = Collected::default();
        assert!(collected.is_unavailable());
        assert!(collected.ready().is_none());
    }

    #[test]
    fn test_membership_labels() {
        let domain = Membership::Domain("corp.example.com".to_string());
        assert_eq!(domain.kind_label(), "Domain");
        assert_eq!(domain.name(), "corp.example.com");

        let workgroup = Membership::Workgroup("WORKGROUP".to_string());
        assert_eq!(workgroup.kind_label(), "Workgroup");
        assert_eq!(workgroup.name(), "WORKGROUP");
    }

    #[test]
    fn test_gateway_sentinel() {
        let mut adapter = NetworkAdapter {
            description: "eth0".to_string(),
            ip_addresses: vec!["10.0.0.2".to_string()],
            subnet_masks: vec!["255.255.255.0".to_string()],
            default_gateway: None,
            dns_servers: vec![],
            dhcp_enabled: false,
        };
        assert_eq!(adapter.gateway_text(), "none");

        adapter.default_gateway = Some("10.0.0.1".to_string());
        assert_eq!(adapter.gateway_text(), "10.0.0.1");
    }

    #[test]
    fn test_last_logon_sentinel() {
        let account = LocalAccount {
            username: "svc-backup".to_string(),
            enabled: true,
            last_logon: None,
            password_required: true,
        };
        assert_eq!(account.last_logon_text(), "never");
    }

    #[test]
    fn test_timestamped_records_serialize() {
        use chrono::TimeZone;

        let host = HostSummary {
            device_type: "Desktop".to_string(),
            host_name: "testbox".to_string(),
            manufacturer: "Example Computer Co".to_string(),
            model: "Workstation 9000".to_string(),
            membership: Membership::Workgroup("WORKGROUP".to_string()),
            os_caption: "Example Linux 24.04".to_string(),
            os_version: "24.04".to_string(),
            os_architecture: "x86_64".to_string(),
            install_date: Local.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).single(),
            last_boot: None,
            current_user: "alice".to_string(),
        };
        let json = serde_json::to_value(&host).unwrap();
        assert_eq!(json["host_name"], "testbox");
        assert!(json["install_date"].is_string());
        assert!(json["last_boot"].is_null());

        let account = LocalAccount {
            username: "root".to_string(),
            enabled: true,
            last_logon: Local.with_ymd_and_hms(2026, 8, 20, 8, 0, 0).single(),
            password_required: true,
        };
        let json = serde_json::to_value(&account).unwrap();
        assert!(json["last_logon"].is_string());
    }

    #[test]
    fn test_adapter_list_cells() {
        let adapter = NetworkAdapter {
            description: "eth0".to_string(),
            ip_addresses: vec!["10.0.0.2".to_string(), "fe80::1".to_string()],
            subnet_masks: vec!["255.255.255.0".to_string(), "64".to_string()],
            default_gateway: Some("10.0.0.1".to_string()),
            dns_servers: vec!["10.0.0.53".to_string(), "1.1.1.1".to_string()],
            dhcp_enabled: true,
        };
        assert_eq!(adapter.ip_list(), "10.0.0.2, fe80::1");
        assert_eq!(adapter.mask_list(), "255.255.255.0, 64");
        assert_eq!(adapter.dns_list(), "10.0.0.53, 1.1.1.1");
    }
}
