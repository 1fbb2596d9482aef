//! Human-readable annotation and host-name synthesis.

use std::net::Ipv4Addr;

/// The optional descriptive facets of one record, in composition order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Facets<'a> {
    pub interface_name: Option<&'a str>,
    pub interface_desc: Option<&'a str>,
    pub vendor: Option<&'a str>,
    pub device_model: Option<&'a str>,
    pub interface_type: Option<&'a str>,
    pub service_domain: Option<&'a str>,
}

const SEPARATOR: &str = " | ";
const FALLBACK_LABEL: &str = "Imported from CSV";

/// Concatenate whichever facets are present, each behind its label, in a
/// fixed order. The interface description is dropped when it merely
/// repeats the interface name.
pub fn compose(facets: &Facets<'_>, host_name: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(name) = facets.interface_name {
        parts.push(format!("Interface: {name}"));
    }
    if let Some(desc) = facets.interface_desc {
        if facets.interface_name != Some(desc) {
            parts.push(format!("Desc: {desc}"));
        }
    }
    if let Some(vendor) = facets.vendor {
        parts.push(format!("Vendor: {vendor}"));
    }
    if let Some(model) = facets.device_model {
        parts.push(format!("Model: {model}"));
    }
    if let Some(kind) = facets.interface_type {
        parts.push(format!("Type: {kind}"));
    }
    if let Some(domain) = facets.service_domain {
        parts.push(format!("Service: {domain}"));
    }

    if parts.is_empty() {
        match host_name {
            Some(host) => format!("{FALLBACK_LABEL} - {host}"),
            None => FALLBACK_LABEL.to_string(),
        }
    } else {
        parts.join(SEPARATOR)
    }
}

/// The source host name when present, otherwise `host-a-b-c-d` from the
/// address.
pub fn hostname(host_name: Option<&str>, address: Ipv4Addr) -> String {
    match host_name {
        Some(host) => host.to_string(),
        None => format!("host-{}", address.to_string().replace('.', "-")),
    }
}
