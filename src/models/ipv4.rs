//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] struct for representing the network ranges used by
//! CIDR bans, along with the size calculations shown on the ban form.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use gbans_console::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn network_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let bits = u32::from(addr) as u64;
        let new_bits = (bits >> right_len) << right_len;

        Ok(Ipv4Addr::from(new_bits as u32))
    }
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let mask = get_cidr_mask(len)?;
        let addr_bits = u32::from(addr);
        let network_bits = addr_bits & mask;
        let broadcast_bits = network_bits | (!mask);
        Ok(Ipv4Addr::from(broadcast_bits))
    }
}

/// IPv4 network range in CIDR notation.
///
/// A bare address with no `/len` suffix is treated as a single host
/// (`/32`), matching the backend's semantics for single-host bans.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.addr, self.mask);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {}: {}", s, e)))
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// A bare address ("203.0.113.5") parses as an implicit /32.
    pub fn new(addr_cidr: &str) -> Result<Ipv4, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        let (addr_part, mask) = match parts.as_slice() {
            [addr] => (*addr, MAX_LENGTH),
            [addr, mask] => {
                let mask: u8 = mask.parse().map_err(|_| format!("Invalid mask {}", mask))?;
                (*addr, mask)
            }
            _ => return Err("Invalid address/mask".into()),
        };
        let addr =
            Ipv4Addr::from_str(addr_part).map_err(|_| format!("Invalid address {}", addr_part))?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ok(Ipv4 { addr, mask })
    }

    /// Get the lowest (network) address in the range.
    pub fn lo(&self) -> Ipv4Addr {
        // mask is validated on construction so this cannot fail
        network_addr(self.addr, self.mask)
            .unwrap_or_else(|e| panic!("Error calculating network address for {}: {}", self, e))
    }

    /// Get the highest (broadcast) address in the range.
    pub fn hi(&self) -> Ipv4Addr {
        broadcast_addr(self.addr, self.mask)
            .unwrap_or_else(|e| panic!("Error calculating broadcast address for {}: {}", self, e))
    }

    /// Number of addresses spanned by the range (`hi - lo + 1`).
    ///
    /// Shown next to the network field on the ban form so a moderator can
    /// see the blast radius of a CIDR ban before submitting it.
    pub fn host_count(&self) -> u64 {
        let lo = u32::from(self.lo()) as u64;
        let hi = u32::from(self.hi()) as u64;
        hi - lo + 1
    }
}

/// Compute the address count for a network string typed into the ban form.
///
/// Returns `None` on malformed input so the caller keeps its previous
/// displayed value rather than showing a bogus count.
pub fn compute_host_count(input: &str) -> Option<u64> {
    match Ipv4::new(input) {
        Ok(net) => Some(net.host_count()),
        Err(e) => {
            log::debug!("Ignoring unparseable network input '{}': {}", input, e);
            None
        }
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_network_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(network_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(network_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(network_addr(ip, 8).unwrap(), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(
            network_addr(ip, 32).unwrap(),
            Ipv4Addr::new(192, 168, 1, 42)
        );
        assert!(network_addr(ip, 33).is_err());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            broadcast_addr(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 1, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 16).unwrap(),
            Ipv4Addr::new(192, 168, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 8).unwrap(),
            Ipv4Addr::new(192, 255, 255, 255)
        );
        assert_eq!(
            broadcast_addr(ip, 32).unwrap(),
            Ipv4Addr::new(192, 168, 1, 0)
        );
    }

    #[test]
    fn test_new_bare_address_is_slash_32() {
        let net = Ipv4::new("203.0.113.5").unwrap();
        assert_eq!(net.mask, 32);
        assert_eq!(net.host_count(), 1);
    }

    #[test]
    fn test_host_count() {
        assert_eq!(Ipv4::new("10.0.0.0/24").unwrap().host_count(), 256);
        assert_eq!(Ipv4::new("192.168.1.0/30").unwrap().host_count(), 4);
        assert_eq!(Ipv4::new("192.168.1.1/32").unwrap().host_count(), 1);
        assert_eq!(Ipv4::new("0.0.0.0/0").unwrap().host_count(), 1u64 << 32);
    }

    #[test]
    fn test_host_count_counts_whole_range_not_aligned_start() {
        // 10.0.0.77/24 still spans 10.0.0.0 - 10.0.0.255
        let net = Ipv4::new("10.0.0.77/24").unwrap();
        assert_eq!(net.lo(), Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(net.hi(), Ipv4Addr::new(10, 0, 0, 255));
        assert_eq!(net.host_count(), 256);
    }

    #[test]
    fn test_compute_host_count_invalid_input() {
        assert_eq!(compute_host_count("not-an-ip"), None);
        assert_eq!(compute_host_count(""), None);
        assert_eq!(compute_host_count("10.0.0.0/33"), None);
        assert_eq!(compute_host_count("10.0.0.256/24"), None);
        assert_eq!(compute_host_count("192.168.1.0/30"), Some(4));
        assert_eq!(compute_host_count("203.0.113.5"), Some(1));
    }

    #[test]
    fn test_ip4_cmp() {
        let ip1 = Ipv4::new("10.0.0.1/24").unwrap();
        let ip2 = Ipv4::new("10.0.0.2/24").unwrap();
        let ip3 = Ipv4::new("10.0.0.1/24").unwrap();

        assert!(ip1 < ip2);
        assert!(ip1 == ip3);
        assert!(ip2 > ip1);
        assert!(ip2 >= ip3);
    }

    #[test]
    fn test_serde_round_trip() {
        let net = Ipv4::new("172.16.0.0/12").unwrap();
        let json = serde_json::to_string(&net).unwrap();
        assert_eq!(json, "\"172.16.0.0/12\"");
        let back: Ipv4 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, net);
    }
}
