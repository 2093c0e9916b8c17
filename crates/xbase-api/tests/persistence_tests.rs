//! Snapshot persistence across sessions
//!
//! Every test works in its own temporary directory.

use std::fs;
use tempfile::tempdir;
use xbase::{Config, Session, SnapshotFormat};

fn populate(s: &mut Session) {
    for line in [
        "USE CUSTOMERS",
        "ADD FIELD ID C 4",
        "ADD FIELD NAME C 10",
        "ADD RECORD 1001 ALICE",
        "ADD RECORD 1002 \"BOB JR\"",
        "USE ORDERS",
        "ADD FIELD ID C 4",
        "ADD FIELD TOTAL N 8 2",
        "ADD RECORD 1002 12.50",
        "SET RELATION TO ID INTO CUSTOMERS",
        "LIST NEXT 1",
    ] {
        s.execute(line);
    }
}

#[test]
fn test_quit_then_reopen() {
    let dir = tempdir().unwrap();
    let config = Config::new().with_snapshot_path(dir.path().join("database_state.json"));

    let mut first = Session::open(&config).unwrap();
    populate(&mut first);
    let reply = first.execute("QUIT");
    assert!(reply.quit);

    let mut second = Session::open(&config).unwrap();
    assert!(second.loaded());

    let db = second.database();
    assert_eq!(db.tables().len(), 2);
    assert_eq!(db.tables()[0].name(), "CUSTOMERS");
    assert_eq!(db.table("CUSTOMERS").unwrap().records()[1][1], "BOB JR");
    assert_eq!(db.table("ORDERS").unwrap().cursor(), 1);
    assert_eq!(db.relations().len(), 1);

    // nothing is selected after loading
    assert_eq!(
        second.execute("LIST").lines,
        vec!["No table in use. Use the USE command first."]
    );

    second.execute("USE ORDERS");
    let lines = second.execute("LIST ALL").lines;
    assert_eq!(lines[0], "ID   TOTAL    CUSTOMERS.ID CUSTOMERS.NAME");
    assert_eq!(lines[2], "1002 12.50    1002 BOB JR    ");
}

#[test]
fn test_json_layout_is_readable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let mut s = Session::new(&Config::new().with_snapshot_path(&path));
    populate(&mut s);
    assert_eq!(s.execute("SAVE").lines, vec!["Database state saved."]);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["tables"][0]["name"], "CUSTOMERS");
    assert_eq!(json["tables"][0]["fields"]["NAME"]["width"], 10);
    assert_eq!(json["tables"][1]["current_record"], 1);
    assert_eq!(json["relations"][0][2], "CUSTOMERS");
}

#[test]
fn test_binary_snapshot_round_trip() {
    let dir = tempdir().unwrap();
    let config = Config::new()
        .with_snapshot_path(dir.path().join("state.bin"))
        .with_snapshot_format(SnapshotFormat::Binary);

    let mut s = Session::open(&config).unwrap();
    populate(&mut s);
    s.save().unwrap();

    let bytes = fs::read(dir.path().join("state.bin")).unwrap();
    assert_eq!(&bytes[0..4], b"XBSN");

    let reopened = Session::open(&config).unwrap();
    assert_eq!(
        reopened.database().table("CUSTOMERS").unwrap().records(),
        s.database().table("CUSTOMERS").unwrap().records()
    );
}

#[test]
fn test_no_autosave_leaves_disk_alone() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    let config = Config::new().with_snapshot_path(&path).with_autosave(false);

    let mut s = Session::open(&config).unwrap();
    populate(&mut s);
    assert_eq!(s.execute("QUIT").lines, vec!["Goodbye!"]);
    assert!(!path.exists());
}

#[test]
fn test_corrupt_snapshot_fails_to_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "{\"tables\": [").unwrap();

    assert!(Session::open(&Config::new().with_snapshot_path(&path)).is_err());
}
