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

//! Network configuration parsing: `ip -j addr` JSON, default routes, and
//! resolv.conf.

use crate::domain::entities::NetworkAdapter;
use serde::Deserialize;
use std::collections::HashMap;

/// One interface as emitted by `ip -j addr show`
#[derive(Debug, Deserialize)]
pub struct IpLink {
    /// Interface name
    pub ifname: String,
    /// Interface flags (LOOPBACK, UP, ...)
    #[serde(default)]
    pub flags: Vec<String>,
    /// Addresses assigned to the interface
    #[serde(default)]
    pub addr_info: Vec<IpAddrInfo>,
}

/// One address entry inside an `ip -j addr show` interface
#[derive(Debug, Deserialize)]
pub struct IpAddrInfo {
    /// Address family: "inet" or "inet6"
    pub family: String,
    /// The address itself
    pub local: String,
    /// Prefix length
    pub prefixlen: u8,
    /// Address scope: "global", "link", "host"
    #[serde(default)]
    pub scope: String,
    /// Present and true for addresses assigned by DHCP/SLAAC
    #[serde(default)]
    pub dynamic: bool,
}

impl IpLink {
    fn is_loopback(&self) -> bool {
        self.flags.iter().any(|flag| flag == "LOOPBACK")
    }

    fn global_addresses(&self) -> impl Iterator<Item = &IpAddrInfo> {
        self.addr_info.iter().filter(|addr| addr.scope == "global")
    }
}

/// Parse the JSON output of `ip -j addr show`
pub fn parse_ip_addr_json(json: &str) -> Result<Vec<IpLink>, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid ip address JSON: {}", e))
}

/// Parse `ip route show default` output into an interface -> gateway map.
///
/// Lines look like `default via 10.0.0.1 dev eth0 proto dhcp metric 100`.
/// The first default route per interface wins.
pub fn parse_default_routes(output: &str) -> HashMap<String, String> {
    let mut routes = HashMap::new();
    for line in output.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() != Some(&"default") {
            continue;
        }
        let via = tokens
            .iter()
            .position(|t| *t == "via")
            .and_then(|i| tokens.get(i + 1));
        let dev = tokens
            .iter()
            .position(|t| *t == "dev")
            .and_then(|i| tokens.get(i + 1));
        if let (Some(via), Some(dev)) = (via, dev) {
            routes
                .entry(dev.to_string())
                .or_insert_with(|| via.to_string());
        }
    }
    routes
}

/// Extract nameserver addresses from resolv.conf content
pub fn parse_resolv_conf(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("nameserver") => tokens.next().map(str::to_string),
                _ => None,
            }
        })
        .collect()
}

/// Convert an IPv4 prefix length to a dotted-quad subnet mask
pub fn prefix_to_mask(prefixlen: u8) -> String {
    let prefixlen = prefixlen.min(32);
    let mask: u32 = if prefixlen == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefixlen))
    };
    format!(
        "{}.{}.{}.{}",
        mask >> 24,
        (mask >> 16) & 0xff,
        (mask >> 8) & 0xff,
        mask & 0xff
    )
}

/// Build adapter records from parsed interfaces, routes, and DNS servers.
///
/// Only interfaces with an active global IP configuration are kept;
/// loopback is always excluded. The resolver configuration is host-wide, so
/// every adapter reports the same DNS server list.
pub fn adapters_from(
    links: Vec<IpLink>,
    default_routes: &HashMap<String, String>,
    dns_servers: &[String],
) -> Vec<NetworkAdapter> {
    links
        .into_iter()
        .filter(|link| !link.is_loopback())
        .filter_map(|link| {
            let mut ip_addresses = Vec::new();
            let mut subnet_masks = Vec::new();
            let mut dhcp_enabled = false;

            for addr in link.global_addresses() {
                ip_addresses.push(addr.local.clone());
                if addr.family == "inet" {
                    subnet_masks.push(prefix_to_mask(addr.prefixlen));
                } else {
                    subnet_masks.push(addr.prefixlen.to_string());
                }
                dhcp_enabled |= addr.dynamic;
            }

            if ip_addresses.is_empty() {
                return None;
            }

            Some(NetworkAdapter {
                default_gateway: default_routes.get(&link.ifname).cloned(),
                description: link.ifname,
                ip_addresses,
                subnet_masks,
                dns_servers: dns_servers.to_vec(),
                dhcp_enabled,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const IP_ADDR_JSON: &str = r#"[
        {"ifindex":1,"ifname":"lo","flags":["LOOPBACK","UP","LOWER_UP"],
         "addr_info":[{"family":"inet","local":"127.0.0.1","prefixlen":8,"scope":"host"}]},
        {"ifindex":2,"ifname":"eth0","flags":["BROADCAST","MULTICAST","UP","LOWER_UP"],
         "addr_info":[
            {"family":"inet","local":"10.0.0.2","prefixlen":24,"scope":"global","dynamic":true},
            {"family":"inet6","local":"fd00::2","prefixlen":64,"scope":"global"},
            {"family":"inet6","local":"fe80::1","prefixlen":64,"scope":"link"}]},
        {"ifindex":3,"ifname":"eth1","flags":["BROADCAST","MULTICAST"],
         "addr_info":[]}
    ]"#;

    #[test]
    fn test_parse_ip_addr_json() {
        let links = parse_ip_addr_json(IP_ADDR_JSON).unwrap();
        assert_eq!(links.len(), 3);
        assert_eq!(links[1].ifname, "eth0");
        assert_eq!(links[1].addr_info.len(), 3);
        assert!(links[1].addr_info[0].dynamic);
    }

    #[test]
    fn test_parse_ip_addr_json_rejects_garbage() {
        assert!(parse_ip_addr_json("not json").is_err());
    }

    #[test]
    fn test_parse_default_routes() {
        let output = "default via 10.0.0.1 dev eth0 proto dhcp metric 100\n\
                      default via 10.0.0.254 dev eth0 proto static metric 200\n\
                      default via 192.168.9.1 dev wlan0\n";
        let routes = parse_default_routes(output);
        assert_eq!(routes.get("eth0").map(String::as_str), Some("10.0.0.1"));
        assert_eq!(routes.get("wlan0").map(String::as_str), Some("192.168.9.1"));
        assert_eq!(routes.len(), 2);
    }

    #[test]
    fn test_parse_resolv_conf() {
        let text = "# Generated by NetworkManager\n\
                    search corp.example.com\n\
                    nameserver 10.0.0.53\n\
                    nameserver 1.1.1.1\n";
        assert_eq!(parse_resolv_conf(text), vec!["10.0.0.53", "1.1.1.1"]);
    }

    #[test]
    fn test_prefix_to_mask() {
        assert_eq!(prefix_to_mask(24), "255.255.255.0");
        assert_eq!(prefix_to_mask(16), "255.255.0.0");
        assert_eq!(prefix_to_mask(8), "255.0.0.0");
        assert_eq!(prefix_to_mask(32), "255.255.255.255");
        assert_eq!(prefix_to_mask(0), "0.0.0.0");
        assert_eq!(prefix_to_mask(22), "255.255.252.0");
    }

    #[test]
    fn test_adapters_filter_and_mapping() {
        let links = parse_ip_addr_json(IP_ADDR_JSON).unwrap();
        let mut routes = HashMap::new();
        routes.insert("eth0".to_string(), "10.0.0.1".to_string());
        let dns = vec!["10.0.0.53".to_string()];

        let adapters = adapters_from(links, &routes, &dns);

        // lo is loopback, eth1 has no active configuration
        assert_eq!(adapters.len(), 1);
        let eth0 = &adapters[0];
        assert_eq!(eth0.description, "eth0");
        assert_eq!(eth0.ip_addresses, vec!["10.0.0.2", "fd00::2"]);
        assert_eq!(eth0.subnet_masks, vec!["255.255.255.0", "64"]);
        assert_eq!(eth0.default_gateway.as_deref(), Some("10.0.0.1"));
        assert_eq!(eth0.dns_servers, vec!["10.0.0.53"]);
        assert!(eth0.dhcp_enabled);
    }

    #[test]
    fn test_adapter_without_default_route_has_no_gateway() {
        let links = parse_ip_addr_json(IP_ADDR_JSON).unwrap();
        let adapters = adapters_from(links, &HashMap::new(), &[]);
        assert_eq!(adapters[0].default_gateway, None);
        assert_eq!(adapters[0].gateway_text(), "none");
    }
}
