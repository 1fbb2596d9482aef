//! Deterministic subnet inference for routable addresses.
//!
//! The export carries no prefix information, so the block is inferred
//! from the address class alone. Inference is total: every routable
//! address gets a block, there is no "cannot infer" outcome.

use std::net::Ipv4Addr;

use ipamr_common::config::InferencePolicy;
use ipamr_common::inventory::entry::Cidr;

/// First match wins, checked in the order `10.` / `192.168.` / `172.` /
/// everything else.
pub fn infer(addr: Ipv4Addr, policy: InferencePolicy) -> Cidr {
    Cidr::of(addr, prefix_for(addr, policy))
}

fn prefix_for(addr: Ipv4Addr, policy: InferencePolicy) -> u8 {
    let octets = addr.octets();
    match policy {
        InferencePolicy::Basic => 24,
        InferencePolicy::Enhanced => {
            if octets[0] == 10 {
                16
            } else if octets[0] == 192 && octets[1] == 168 {
                24
            } else if octets[0] == 172 {
                20
            } else {
                24
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
