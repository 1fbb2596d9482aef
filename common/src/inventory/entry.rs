//! The canonical inventory record and its value types.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

/// Allocation state of one address. Stored as text but never free-form:
/// the store schema constrains the column to exactly these three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStatus {
    Available,
    Allocated,
    Reserved,
}

impl AllocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStatus::Available => "available",
            AllocationStatus::Allocated => "allocated",
            AllocationStatus::Reserved => "reserved",
        }
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown allocation status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for AllocationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(AllocationStatus::Available),
            "allocated" => Ok(AllocationStatus::Allocated),
            "reserved" => Ok(AllocationStatus::Reserved),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCidrError {
    #[error("invalid CIDR block: {0}")]
    Malformed(String),
    #[error("prefix length out of range: {0}")]
    Prefix(String),
}

/// A contiguous IPv4 block, `network/prefix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cidr {
    network: Ipv4Addr,
    prefix: u8,
}

impl Cidr {
    /// Block containing `addr` at the given prefix length; the host bits
    /// are masked off so `network` is always the true network address.
    pub fn of(addr: Ipv4Addr, prefix: u8) -> Self {
        let prefix = prefix.min(32);
        let mask: u32 = if prefix == 0 {
            0
        } else {
            u32::MAX << (32 - prefix)
        };
        Self {
            network: Ipv4Addr::from(u32::from(addr) & mask),
            prefix,
        }
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        Self::of(addr, self.prefix).network == self.network
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl FromStr for Cidr {
    type Err = ParseCidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((addr_str, prefix_str)) = s.split_once('/') else {
            return Err(ParseCidrError::Malformed(s.to_string()));
        };
        let addr = addr_str
            .parse::<Ipv4Addr>()
            .map_err(|_| ParseCidrError::Malformed(s.to_string()))?;
        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|_| ParseCidrError::Prefix(prefix_str.to_string()))?;
        if prefix > 32 {
            return Err(ParseCidrError::Prefix(prefix_str.to_string()));
        }
        Ok(Self::of(addr, prefix))
    }
}

/// The normalized record destined for storage, assembled fresh for every
/// raw record that survives validation and never mutated afterwards.
///
/// `address` is the only identity key; re-assembling an entry for the
/// same address replaces the stored record's mutable fields via upsert.
/// Timestamps are store-managed and deliberately absent here.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryEntry {
    pub address: Ipv4Addr,
    pub subnet: Cidr,
    pub status: AllocationStatus,
    /// VRF/VPN tag, heuristically derived; falls back to a policy token,
    /// never empty.
    pub segment: String,
    pub hostname: String,
    pub description: String,
    // Carried through unchanged for audit purposes.
    pub service_domain: Option<String>,
    pub interface_name: Option<String>,
    pub interface_desc: Option<String>,
    pub interface_type: Option<String>,
    pub vendor: Option<String>,
    pub device_model: Option<String>,
    pub admin_status: Option<String>,
    pub oper_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips() {
        for status in [
            AllocationStatus::Available,
            AllocationStatus::Allocated,
            AllocationStatus::Reserved,
        ] {
            assert_eq!(status.as_str().parse(), Ok(status));
        }
        assert!("used".parse::<AllocationStatus>().is_err());
        assert!("Allocated".parse::<AllocationStatus>().is_err());
    }

    #[test]
    fn cidr_of_masks_host_bits() {
        let addr = Ipv4Addr::new(10, 13, 4, 7);
        assert_eq!(Cidr::of(addr, 24).to_string(), "10.13.4.0/24");
        assert_eq!(Cidr::of(addr, 16).to_string(), "10.13.0.0/16");
        assert_eq!(Cidr::of(addr, 32).to_string(), "10.13.4.7/32");
        assert_eq!(Cidr::of(addr, 0).to_string(), "0.0.0.0/0");
    }

    #[test]
    fn cidr_contains_its_addresses() {
        let block = Cidr::of(Ipv4Addr::new(172, 20, 9, 1), 20);
        assert_eq!(block.to_string(), "172.20.0.0/20");
        assert!(block.contains(Ipv4Addr::new(172, 20, 15, 254)));
        assert!(!block.contains(Ipv4Addr::new(172, 20, 16, 1)));
    }

    #[test]
    fn cidr_parses_and_rejects() {
        assert_eq!(
            "192.168.1.0/24".parse::<Cidr>(),
            Ok(Cidr::of(Ipv4Addr::new(192, 168, 1, 0), 24))
        );
        assert!("192.168.1.0".parse::<Cidr>().is_err());
        assert!("192.168.1.0/33".parse::<Cidr>().is_err());
        assert!("not-a-net/24".parse::<Cidr>().is_err());
    }
}
