//! Strict IPv4 validation and classification.

use std::net::Ipv4Addr;

/// Outcome of validating a candidate address field.
///
/// `Loopback` and `Invalid` both end up skipping the record, but they are
/// kept apart so the run report can tell them apart in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressClass {
    /// The field was absent after normalization.
    Missing,
    /// Not a dotted-quad IPv4 address (wrong arity, out-of-range octet,
    /// IPv6, hostname, ...).
    Invalid,
    /// Any address in 127.0.0.0/8. Never inventoried.
    Loopback(Ipv4Addr),
    Routable(Ipv4Addr),
}

/// `Ipv4Addr::from_str` is already strict dotted-quad: exactly four
/// octets, each 0-255, no leading zeros and nothing else accepted.
pub fn classify(candidate: Option<&str>) -> AddressClass {
    let Some(text) = candidate else {
        return AddressClass::Missing;
    };
    let Ok(addr) = text.parse::<Ipv4Addr>() else {
        return AddressClass::Invalid;
    };
    if addr.is_loopback() {
        AddressClass::Loopback(addr)
    } else {
        AddressClass::Routable(addr)
    }
}
