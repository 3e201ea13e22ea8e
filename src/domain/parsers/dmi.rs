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

//! Helpers for values read from `/sys/class/dmi/id`

/// Placeholder strings some vendors ship instead of real values
const VENDOR_PLACEHOLDERS: &[&str] = &[
    "To Be Filled By O.E.M.",
    "To be filled by O.E.M.",
    "Default string",
    "System Product Name",
    "Not Specified",
];

/// Normalize a raw DMI value: trim, and collapse empty or vendor
/// placeholder strings to "Unknown".
pub fn clean_dmi_value(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || VENDOR_PLACEHOLDERS.contains(&trimmed) {
        "Unknown".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Map an SMBIOS chassis type code to a human-readable device type
pub fn chassis_type_name(code: &str) -> &'static str {
    match code.trim().parse::<u8>() {
        Ok(3) => "Desktop",
        Ok(4) => "Low Profile Desktop",
        Ok(5) => "Pizza Box",
        Ok(6) => "Mini Tower",
        Ok(7) => "Tower",
        Ok(8) => "Portable",
        Ok(9) => "Laptop",
        Ok(10) => "Notebook",
        Ok(11) => "Hand Held",
        Ok(13) => "All in One",
        Ok(14) => "Sub Notebook",
        Ok(17) => "Main Server Chassis",
        Ok(23) => "Rack Mount Chassis",
        Ok(30) => "Tablet",
        Ok(31) => "Convertible",
        Ok(32) => "Detachable",
        _ => "Other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_dmi_value() {
        assert_eq!(clean_dmi_value("  Dell Inc.\n"), "Dell Inc.");
        assert_eq!(clean_dmi_value(""), "Unknown");
        assert_eq!(clean_dmi_value("To Be Filled By O.E.M."), "Unknown");
        assert_eq!(clean_dmi_value("Default string"), "Unknown");
    }

    #[test]
    fn test_chassis_type_name() {
        assert_eq!(chassis_type_name("3"), "Desktop");
        assert_eq!(chassis_type_name("10\n"), "Notebook");
        assert_eq!(chassis_type_name("23"), "Rack Mount Chassis");
        assert_eq!(chassis_type_name("255"), "Other");
        assert_eq!(chassis_type_name("garbage"), "Other");
    }
}
