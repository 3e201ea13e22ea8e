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

use crate::domain::entities::{
    DiskReading, FirmwareSummary, HostSummary, LocalAccount, MemoryReading, NetworkAdapter,
    ProcessorReading,
};
use crate::domain::errors::ProbeError;

/// Secondary port - OS information source
///
/// One method per collector category. Each query may fail independently;
/// the collection service decides what a failure means for the report.
/// Different adapters can implement this per platform or for tests.
pub trait SystemProbe: Send + Sync {
    /// Query host identity and operating system details
    ///
    /// # Returns
    /// * `Ok(HostSummary)` - Host identity record
    /// * `Err(ProbeError)` - Error querying the host category
    fn host_summary(&self) -> Result<HostSummary, ProbeError>;

    /// Query processor details
    ///
    /// # Returns
    /// * `Ok(ProcessorReading)` - Raw processor reading
    /// * `Err(ProbeError)` - Error querying the processor category
    fn processor(&self) -> Result<ProcessorReading, ProbeError>;

    /// Query memory capacity and availability in bytes
    ///
    /// # Returns
    /// * `Ok(MemoryReading)` - Raw memory reading
    /// * `Err(ProbeError)` - Error querying the memory category
    fn memory(&self) -> Result<MemoryReading, ProbeError>;

    /// Query BIOS / firmware details
    ///
    /// # Returns
    /// * `Ok(FirmwareSummary)` - Firmware record
    /// * `Err(ProbeError)` - Error querying the firmware category
    fn firmware(&self) -> Result<FirmwareSummary, ProbeError>;

    /// Enumerate fixed local volumes (removable, network, and optical
    /// media excluded)
    ///
    /// # Returns
    /// * `Ok(Vec<DiskReading>)` - Raw volume readings
    /// * `Err(ProbeError)` - Error querying the disk category
    fn disk_volumes(&self) -> Result<Vec<DiskReading>, ProbeError>;

    /// Enumerate network adapters with an active IP configuration
    ///
    /// # Returns
    /// * `Ok(Vec<NetworkAdapter>)` - Adapter records
    /// * `Err(ProbeError)` - Error querying the network category
    fn network_adapters(&self) -> Result<Vec<NetworkAdapter>, ProbeError>;

    /// Enumerate local user accounts
    ///
    /// # Returns
    /// * `Ok(Vec<LocalAccount>)` - Account records
    /// * `Err(ProbeError)` - Error querying the accounts category
    fn local_accounts(&self) -> Result<Vec<LocalAccount>, ProbeError>;
}
