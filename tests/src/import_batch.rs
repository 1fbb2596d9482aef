use std::net::Ipv4Addr;

use ipamr_common::config::{InferencePolicy, RunConfig};
use ipamr_common::inventory::entry::AllocationStatus;
use ipamr_io::sqlite::SqliteStore;

use crate::fixtures::{run_import, run_import_with, write_export};

fn addr(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

#[test]
fn production_interface_becomes_an_allocated_entry() {
    let export = write_export(&[
        "192.168.1.10,edge-r1,Gi0/1,uplink to agg-sw-2,ethernetCsmacd,PROD-CORE,Cisco,C9300,Up,Up",
    ]);
    let mut store = SqliteStore::open_in_memory().unwrap();

    let report = run_import(export.path(), &mut store).unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.inserted, 1);
    assert_eq!(report.skipped(), 0);

    let entry = store.fetch(addr("192.168.1.10")).unwrap().unwrap();
    assert_eq!(entry.subnet.to_string(), "192.168.1.0/24");
    assert_eq!(entry.status, AllocationStatus::Allocated);
    assert_eq!(entry.segment.as_deref(), Some("production"));
    assert_eq!(entry.hostname.as_deref(), Some("edge-r1"));
    assert_eq!(
        entry.description.as_deref(),
        Some(
            "Interface: Gi0/1 | Desc: uplink to agg-sw-2 | Vendor: Cisco | \
             Model: C9300 | Type: ethernetCsmacd | Service: PROD-CORE"
        )
    );
}

#[test]
fn loopback_and_invalid_rows_never_reach_the_store() {
    let export = write_export(&[
        "127.0.0.1,lo-host,lo0,,,,,,Up,Up",
        "not-an-ip,broken,,,,,,,,",
        "-,empty,,,,,,,,",
        "10.0.0.7,edge-r2,,,,,,,Up,Down",
    ]);
    let mut store = SqliteStore::open_in_memory().unwrap();

    let report = run_import(export.path(), &mut store).unwrap();

    assert_eq!(report.processed, 4);
    assert_eq!(report.written(), 1);
    assert_eq!(report.loopback, 1);
    assert_eq!(report.invalid_address, 1);
    assert_eq!(report.missing_address, 1);
    assert_eq!(store.count().unwrap(), 1);
    assert!(store.fetch(addr("127.0.0.1")).unwrap().is_none());

    let entry = store.fetch(addr("10.0.0.7")).unwrap().unwrap();
    assert_eq!(entry.status, AllocationStatus::Reserved);
}

#[test]
fn rerun_with_changed_domain_updates_in_place() {
    let first = write_export(&["192.168.1.10,edge-r1,Gi0/1,,,PROD-CORE,,,Up,Up"]);
    let second = write_export(&["192.168.1.10,edge-r1,Gi0/1,,,DEV-EDGE,,,Up,Up"]);
    let mut store = SqliteStore::open_in_memory().unwrap();

    run_import(first.path(), &mut store).unwrap();
    let before = store.fetch(addr("192.168.1.10")).unwrap().unwrap();

    let report = run_import(second.path(), &mut store).unwrap();

    assert_eq!(report.updated, 1);
    assert_eq!(report.inserted, 0);
    assert_eq!(store.count().unwrap(), 1);

    let after = store.fetch(addr("192.168.1.10")).unwrap().unwrap();
    assert_eq!(after.segment.as_deref(), Some("development"));
    assert_eq!(after.created_at, before.created_at);
}

#[test]
fn replaying_the_same_batch_converges() {
    let export = write_export(&[
        "10.1.2.3,core-sw-1,Te1/1,core uplink,,CORE,Cisco,N9K,Up,Up",
        "10.1.2.4,core-sw-2,Te1/2,,,MGMT,,,Up,Down",
        "203.0.113.9,,,,,,,,Down,Down",
    ]);
    let mut store = SqliteStore::open_in_memory().unwrap();

    let first = run_import(export.path(), &mut store).unwrap();
    assert_eq!(first.inserted, 3);

    let snapshot: Vec<_> = ["10.1.2.3", "10.1.2.4", "203.0.113.9"]
        .iter()
        .map(|a| store.fetch(addr(a)).unwrap().unwrap())
        .collect();

    let second = run_import(export.path(), &mut store).unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.updated, 3);
    assert_eq!(store.count().unwrap(), 3);

    for earlier in snapshot {
        let later = store.fetch(earlier.address).unwrap().unwrap();
        assert_eq!(later.subnet, earlier.subnet);
        assert_eq!(later.status, earlier.status);
        assert_eq!(later.segment, earlier.segment);
        assert_eq!(later.hostname, earlier.hostname);
        assert_eq!(later.description, earlier.description);
        assert_eq!(later.created_at, earlier.created_at);
    }
}

#[test]
fn policy_is_applied_per_run_not_per_record() {
    let export = write_export(&[
        "10.13.4.7,,,,,,,,Up,Up",
        "172.20.9.1,,,,,,,,Up,Up",
    ]);
    let mut store = SqliteStore::open_in_memory().unwrap();
    let cfg = RunConfig {
        policy: InferencePolicy::Enhanced,
        ..RunConfig::default()
    };

    run_import_with(export.path(), &mut store, &cfg).unwrap();

    let ten = store.fetch(addr("10.13.4.7")).unwrap().unwrap();
    let seventy_two = store.fetch(addr("172.20.9.1")).unwrap().unwrap();
    assert_eq!(ten.subnet.to_string(), "10.13.0.0/16");
    assert_eq!(seventy_two.subnet.to_string(), "172.20.0.0/20");
}

#[test]
fn limit_stops_the_batch_early() {
    let lines: Vec<String> = (1..=9).map(|i| format!("10.9.0.{i},,,,,,,,,")).collect();
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let export = write_export(&line_refs);
    let mut store = SqliteStore::open_in_memory().unwrap();
    let cfg = RunConfig {
        limit: Some(5),
        ..RunConfig::default()
    };

    let report = run_import_with(export.path(), &mut store, &cfg).unwrap();

    assert_eq!(report.processed, 5);
    assert_eq!(store.count().unwrap(), 5);
}

#[test]
fn sparse_rows_get_synthesized_hostname_and_fallback_description() {
    let export = write_export(&["198.51.100.4,,,,,,,,,"]);
    let mut store = SqliteStore::open_in_memory().unwrap();

    run_import(export.path(), &mut store).unwrap();

    let entry = store.fetch(addr("198.51.100.4")).unwrap().unwrap();
    assert_eq!(entry.hostname.as_deref(), Some("host-198-51-100-4"));
    assert_eq!(entry.description.as_deref(), Some("Imported from CSV"));
    assert_eq!(entry.segment.as_deref(), Some("default"));
    assert_eq!(entry.status, AllocationStatus::Available);
}
