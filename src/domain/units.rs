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

//! Unit conversion helpers shared by the collectors

const BYTES_PER_GIB: f64 = (1u64 << 30) as f64;

/// Convert a byte count to gibibytes, rounded to two decimals
pub fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_GIB)
}

/// Round to two decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Utilization percentage of `used` out of `total`, rounded to two decimals.
///
/// A zero total yields 0.0 rather than NaN so empty or unreadable capacities
/// never produce an out-of-range percentage.
pub fn used_percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(used as f64 / total as f64 * 100.0)
}
