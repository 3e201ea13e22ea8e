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

//! Domain service that runs the seven collectors against the system probe.
//!
//! Every collector follows the same degrade-don't-abort policy: a probe
//! failure is logged with its category and cause, the category becomes
//! `Collected::Unavailable`, and the run continues so one missing subsystem
//! never blocks the rest of the report.

use crate::domain::entities::{
    Collected, DiskReading, DiskVolume, HostInventory, HostSummary, MemoryReading, MemorySummary,
    NetworkAdapter, LocalAccount, FirmwareSummary, ProcessorReading, ProcessorSummary,
};
use crate::domain::errors::ProbeError;
use crate::domain::units::{bytes_to_gb, used_percent};
use crate::ports::SystemProbe;
use log::warn;
use std::sync::Arc;

/// Runs collectors against a platform probe and normalizes the results
pub struct InventoryCollector {
    probe: Arc<dyn SystemProbe>,
}

impl InventoryCollector {
    /// Create a collector over the given probe
    pub fn new(probe: Arc<dyn SystemProbe>) -> Self {
        Self { probe }
    }

    /// Collect every category in the fixed order: Computer, Processor,
    /// Memory, BIOS, Disk, Network, Users.
    pub fn collect_all(&self) -> HostInventory {
        HostInventory {
            host: self.collect_host(),
            processor: self.collect_processor(),
            memory: self.collect_memory(),
            firmware: self.collect_firmware(),
            disks: self.collect_disks(),
            network_adapters: self.collect_network_adapters(),
            local_accounts: self.collect_local_accounts(),
        }
    }

    /// Host identity and operating system summary
    pub fn collect_host(&self) -> Collected<HostSummary> {
        guard("computer system", self.probe.host_summary())
    }

    /// Processor summary with the clock rendered as "N MHz"
    pub fn collect_processor(&self) -> Collected<ProcessorSummary> {
        guard("processor", self.probe.processor()).map(summarize_processor)
    }

    /// Memory summary in GB with derived used/percent fields
    pub fn collect_memory(&self) -> Collected<MemorySummary> {
        guard("memory", self.probe.memory()).map(summarize_memory)
    }

    /// BIOS / firmware summary
    pub fn collect_firmware(&self) -> Collected<FirmwareSummary> {
        guard("firmware", self.probe.firmware())
    }

    /// Fixed local volumes with derived utilization
    pub fn collect_disks(&self) -> Collected<Vec<DiskVolume>> {
        guard("logical disk", self.probe.disk_volumes())
            .map(|readings| readings.into_iter().map(summarize_disk).collect())
    }

    /// Network adapters with an active IP configuration
    pub fn collect_network_adapters(&self) -> Collected<Vec<NetworkAdapter>> {
        guard("network adapter", self.probe.network_adapters())
    }

    /// Local user accounts
    pub fn collect_local_accounts(&self) -> Collected<Vec<LocalAccount>> {
        guard("local accounts", self.probe.local_accounts())
    }
}

/// Apply the degrade policy to one probe result
fn guard<T>(category: &str, result: Result<T, ProbeError>) -> Collected<T> {
    match result {
        Ok(value) => Collected::Ready(value),
        Err(e) => {
            warn!("{} collection failed: {}", category, e);
            Collected::Unavailable
        }
    }
}

fn summarize_processor(reading: ProcessorReading) -> ProcessorSummary {
    ProcessorSummary {
        name: reading.name,
        cores: reading.cores,
        logical_processors: reading.logical_processors,
        max_clock: format!("{} MHz", reading.max_clock_mhz),
    }
}

fn summarize_memory(reading: MemoryReading) -> MemorySummary {
    let used_bytes = reading.total_bytes.saturating_sub(reading.available_bytes);
    MemorySummary {
        total_gb: bytes_to_gb(reading.total_bytes),
        free_gb: bytes_to_gb(reading.available_bytes),
        used_gb: bytes_to_gb(used_bytes),
        used_percent: used_percent(used_bytes, reading.total_bytes),
    }
}

fn summarize_disk(reading: DiskReading) -> DiskVolume {
    let used_bytes = reading.total_bytes.saturating_sub(reading.available_bytes);
    DiskVolume {
        device_id: reading.device_id,
        filesystem: reading.filesystem,
        capacity_gb: bytes_to_gb(reading.total_bytes),
        free_gb: bytes_to_gb(reading.available_bytes),
        used_percent: used_percent(used_bytes, reading.total_bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Membership;

    const GIB: u64 = 1 << 30;

    /// Probe whose categories can individually be made to fail
    struct ScriptedProbe {
        fail_disks: bool,
        fail_all: bool,
    }

    impl ScriptedProbe {
        fn healthy() -> Self {
            Self {
                fail_disks: false,
                fail_all: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail_disks: true,
                fail_all: true,
            }
        }

        fn err(&self) -> ProbeError {
            ProbeError::CommandNotFound("probe".to_string())
        }
    }

    impl SystemProbe for ScriptedProbe {
        fn host_summary(&self) -> Result<HostSummary, ProbeError> {
            if self.fail_all {
                return Err(self.err());
            }
            Ok(HostSummary {
                device_type: "Desktop".to_string(),
                host_name: "testbox".to_string(),
                manufacturer: "Acme".to_string(),
                model: "Rocket 9".to_string(),
                membership: Membership::Workgroup("WORKGROUP".to_string()),
                os_caption: "Ubuntu 24.04 LTS".to_string(),
                os_version: "24.04".to_string(),
                os_architecture: "x86_64".to_string(),
                install_date: None,
                last_boot: None,
                current_user: "alice".to_string(),
            })
        }

        fn processor(&self) -> Result<ProcessorReading, ProbeError> {
            if self.fail_all {
                return Err(self.err());
            }
            Ok(ProcessorReading {
                name: "Acme Zip 5900".to_string(),
                cores: 8,
                logical_processors: 16,
                max_clock_mhz: 3600,
            })
        }

        fn memory(&self) -> Result<MemoryReading, ProbeError> {
            if self.fail_all {
                return Err(self.err());
            }
            Ok(MemoryReading {
                total_bytes: 16 * GIB,
                available_bytes: (45 * GIB) / 10,
            })
        }

        fn firmware(&self) -> Result<FirmwareSummary, ProbeError> {
            if self.fail_all {
                return Err(self.err());
            }
            Ok(FirmwareSummary {
                manufacturer: "AcmeBIOS".to_string(),
                version: "1.2.3".to_string(),
                release_date: "04/01/2024".to_string(),
                serial_number: "SN-0001".to_string(),
            })
        }

        fn disk_volumes(&self) -> Result<Vec<DiskReading>, ProbeError> {
            if self.fail_disks || self.fail_all {
                return Err(self.err());
            }
            Ok(vec![DiskReading {
                device_id: "/".to_string(),
                filesystem: "ext4".to_string(),
                total_bytes: 500 * GIB,
                available_bytes: 50 * GIB,
            }])
        }

        fn network_adapters(&self) -> Result<Vec<NetworkAdapter>, ProbeError> {
            if self.fail_all {
                return Err(self.err());
            }
            Ok(vec![])
        }

        fn local_accounts(&self) -> Result<Vec<LocalAccount>, ProbeError> {
            if self.fail_all {
                return Err(self.err());
            }
            Ok(vec![])
        }
    }

    #[test]
    fn test_memory_summary_math() {
        let collector = InventoryCollector::new(Arc::new(ScriptedProbe::healthy()));
        let memory = collector.collect_memory();
        let summary = memory.ready().unwrap();
        assert_eq!(summary.total_gb, 16.0);
        assert_eq!(summary.free_gb, 4.5);
        assert_eq!(summary.used_gb, 11.5);
        assert_eq!(summary.used_percent, 71.88);
    }

    #[test]
    fn test_disk_summary_math() {
        let collector = InventoryCollector::new(Arc::new(ScriptedProbe::healthy()));
        let disks = collector.collect_disks();
        let volumes = disks.ready().unwrap();
        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].capacity_gb, 500.0);
        assert_eq!(volumes[0].free_gb, 50.0);
        assert_eq!(volumes[0].used_percent, 90.0);
    }

    #[test]
    fn test_processor_clock_format() {
        let collector = InventoryCollector::new(Arc::new(ScriptedProbe::healthy()));
        let processor = collector.collect_processor();
        assert_eq!(processor.ready().unwrap().max_clock, "3600 MHz");
    }

    #[test]
    fn test_single_category_failure_degrades_only_that_category() {
        let probe = ScriptedProbe {
            fail_disks: true,
            fail_all: false,
        };
        let inventory = InventoryCollector::new(Arc::new(probe)).collect_all();
        assert!(inventory.disks.is_unavailable());
        assert!(inventory.host.ready().is_some());
        assert!(inventory.memory.ready().is_some());
        assert!(inventory.network_adapters.ready().is_some());
    }

    #[test]
    fn test_total_probe_failure_never_panics() {
        let inventory = InventoryCollector::new(Arc::new(ScriptedProbe::failing())).collect_all();
        assert!(inventory.host.is_unavailable());
        assert!(inventory.processor.is_unavailable());
        assert!(inventory.memory.is_unavailable());
        assert!(inventory.firmware.is_unavailable());
        assert!(inventory.disks.is_unavailable());
        assert!(inventory.network_adapters.is_unavailable());
        assert!(inventory.local_accounts.is_unavailable());
    }

    #[test]
    fn test_empty_sequences_are_ready_not_unavailable() {
        let inventory = InventoryCollector::new(Arc::new(ScriptedProbe::healthy())).collect_all();
        assert_eq!(inventory.local_accounts.ready().map(Vec::len), Some(0));
        assert_eq!(inventory.network_adapters.ready().map(Vec::len), Some(0));
    }
}
