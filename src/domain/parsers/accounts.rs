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

//! Local account parsing: passwd, shadow, and lastlog output.

use crate::domain::entities::LocalAccount;
use chrono::{DateTime, Local};
use std::collections::HashMap;

/// Regular-account UID range start on common Linux distributions
const FIRST_REGULAR_UID: u32 = 1000;
/// The nobody account sits at the top of the range
const NOBODY_UID: u32 = 65534;

/// One passwd entry worth keeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswdEntry {
    /// Account name
    pub name: String,
    /// Numeric user id
    pub uid: u32,
    /// Login shell
    pub shell: String,
}

/// Password state read from the shadow file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowStatus {
    /// Account is locked ('!' prefix on the password hash)
    pub locked: bool,
    /// A password is set (non-empty hash field)
    pub password_required: bool,
}

/// Parse passwd content into entries. Malformed lines are skipped.
pub fn parse_passwd(text: &str) -> Vec<PasswdEntry> {
    text.lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(':').collect();
            if fields.len() < 7 {
                return None;
            }
            let uid = fields[2].parse().ok()?;
            Some(PasswdEntry {
                name: fields[0].to_string(),
                uid,
                shell: fields[6].to_string(),
            })
        })
        .collect()
}

/// Parse shadow content into a name -> status map
pub fn parse_shadow(text: &str) -> HashMap<String, ShadowStatus> {
    text.lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(':').collect();
            if fields.len() < 2 {
                return None;
            }
            let hash = fields[1];
            Some((
                fields[0].to_string(),
                ShadowStatus {
                    locked: hash.starts_with('!'),
                    password_required: !hash.is_empty(),
                },
            ))
        })
        .collect()
}

/// Parse `lastlog` output into a name -> last-logon map.
///
/// Accounts that never logged in appear with the `**Never logged in**`
/// marker and map to `None`.
pub fn parse_lastlog(text: &str) -> HashMap<String, Option<DateTime<Local>>> {
    let mut logons = HashMap::new();
    for line in text.lines().skip(1) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(name) = tokens.first() else {
            continue;
        };
        if line.contains("**Never logged in**") {
            logons.insert(name.to_string(), None);
            continue;
        }
        // The timestamp is the trailing "Day Mon DD HH:MM:SS +ZZZZ YYYY"
        if tokens.len() < 7 {
            continue;
        }
        let stamp = tokens[tokens.len() - 6..].join(" ");
        if let Ok(parsed) = DateTime::parse_from_str(&stamp, "%a %b %e %H:%M:%S %z %Y") {
            logons.insert(name.to_string(), Some(parsed.with_timezone(&Local)));
        }
    }
    logons
}

/// True for shells a human can actually log in with
pub fn is_interactive_shell(shell: &str) -> bool {
    let shell = shell.trim();
    !shell.is_empty()
        && !shell.ends_with("nologin")
        && !shell.ends_with("/false")
        && !shell.ends_with("/sync")
}

/// Build account records from the parsed sources.
///
/// Keeps root and regular accounts (UID 1000 up to, excluding, nobody)
/// with interactive shells. Shadow data may be unreadable without
/// privileges; accounts then default to enabled with a password required.
pub fn accounts_from(
    passwd: Vec<PasswdEntry>,
    shadow: &HashMap<String, ShadowStatus>,
    lastlog: &HashMap<String, Option<DateTime<Local>>>,
) -> Vec<LocalAccount> {
    passwd
        .into_iter()
        .filter(|entry| entry.uid == 0 || (FIRST_REGULAR_UID..NOBODY_UID).contains(&entry.uid))
        .filter(|entry| is_interactive_shell(&entry.shell))
        .map(|entry| {
            let status = shadow.get(&entry.name).copied().unwrap_or(ShadowStatus {
                locked: false,
                password_required: true,
            });
            let last_logon = lastlog.get(&entry.name).copied().flatten();
            LocalAccount {
                username: entry.name,
                enabled: !status.locked,
                last_logon,
                password_required: status.password_required,
            }
        })
        .collect()
}
