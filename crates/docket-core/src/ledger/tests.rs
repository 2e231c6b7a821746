use crate::ledger::{Ledger, MemLedger};

fn seeded() -> MemLedger {
    let mut ledger = MemLedger::new();
    for i in 0..5u32 {
        ledger
            .put_state(&format!("scan/{i}"), format!("v{i}").into_bytes())
            .unwrap();
    }
    ledger.put_state("other/0", b"x".to_vec()).unwrap();
    ledger
}

#[test]
fn get_put_delete_round_trip() {
    let mut ledger = MemLedger::new();
    assert_eq!(ledger.get_state("k").unwrap(), None);

    ledger.put_state("k", b"v1".to_vec()).unwrap();
    assert_eq!(ledger.get_state("k").unwrap(), Some(b"v1".to_vec()));

    // Re-put silently replaces.
    ledger.put_state("k", b"v2".to_vec()).unwrap();
    assert_eq!(ledger.get_state("k").unwrap(), Some(b"v2".to_vec()));

    ledger.delete_state("k").unwrap();
    assert_eq!(ledger.get_state("k").unwrap(), None);

    // Deleting an absent key is not an error.
    ledger.delete_state("k").unwrap();
}

#[test]
fn scan_is_bounded_by_prefix_and_limit() {
    let ledger = seeded();

    let page = ledger.scan_prefix("scan/", 10, "").unwrap();
    assert_eq!(page.fetched, 5);
    let keys: Vec<&str> = page.entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, ["scan/0", "scan/1", "scan/2", "scan/3", "scan/4"]);

    let page = ledger.scan_prefix("scan/", 2, "").unwrap();
    assert_eq!(page.fetched, 2);
    assert_eq!(page.entries.len(), 2);
}

#[test]
fn scan_resumes_inclusively_from_token() {
    let ledger = seeded();

    let first = ledger.scan_prefix("scan/", 3, "").unwrap();
    let resume = first.entries.last().unwrap().key.clone();

    let second = ledger.scan_prefix("scan/", 3, &resume).unwrap();
    assert_eq!(second.entries[0].key, resume);
    assert_eq!(second.entries.last().unwrap().key, "scan/4");
}

#[test]
fn scan_rejects_foreign_resume_token() {
    let ledger = seeded();
    assert!(ledger.scan_prefix("scan/", 3, "other/0").is_err());
}

#[test]
fn events_are_recorded_in_order() {
    let mut ledger = MemLedger::with_caller("worker-7");
    ledger.emit_event("a", b"{}".to_vec()).unwrap();
    ledger.emit_event("b", b"{}".to_vec()).unwrap();

    let names: Vec<&str> = ledger.events().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(ledger.caller_identity(), "worker-7");
}
