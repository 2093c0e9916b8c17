//! Relation scenarios driven through the command interpreter
//!
//! Models a small order-entry setup:
//! - CUSTOMERS keyed by CUSTID
//! - ORDERS pointing at CUSTOMERS through CUSTID
//! - PRODUCTS pointing at nothing, used for dangling lookups

use xbase::{Config, Session};

fn session() -> Session {
    Session::new(&Config::new().with_autosave(false))
}

fn run_all(session: &mut Session, lines: &[&str]) {
    for line in lines {
        let reply = session.execute(line);
        assert!(!reply.quit, "{} ended the session", line);
    }
}

fn order_entry() -> Session {
    let mut s = session();
    run_all(
        &mut s,
        &[
            "USE CUSTOMERS",
            "ADD FIELD CUSTID C 4",
            "ADD FIELD NAME C 10",
            "ADD FIELD CITY C 8",
            "ADD RECORD 1001 ALICE PARIS",
            "ADD RECORD 1002 BOB \"NEW YORK\"",
            "USE ORDERS",
            "ADD FIELD ORDERID C 5",
            "ADD FIELD CUSTID C 4",
            "ADD FIELD AMOUNT N 7 2",
            "ADD RECORD 00001 1002 19.90",
            "ADD RECORD 00002 1001 5.00",
            "ADD RECORD 00003 1777 100.00",
            "SET RELATION TO CUSTID INTO CUSTOMERS",
        ],
    );
    s
}

#[test]
fn test_related_columns_follow_own_columns() {
    let mut s = order_entry();
    let lines = s.execute("LIST ALL").lines;

    assert_eq!(
        lines[0],
        "ORDERID CUSTID AMOUNT  CUSTOMERS.CUSTID CUSTOMERS.NAME CUSTOMERS.CITY"
    );
    assert_eq!(lines[2], "00001 1002 19.90   1002 BOB        NEW YORK");
    assert_eq!(lines[3], "00002 1001 5.00    1001 ALICE      PARIS   ");
    // unmatched key renders empty related values
    assert_eq!(lines[4], "00003 1777 100.00                          ");
}

#[test]
fn test_projection_with_related_field() {
    let mut s = order_entry();
    let lines = s.execute("LIST ALL FIELDS ORDERID, CUSTOMERS.NAME").lines;

    assert_eq!(
        lines[0],
        "ORDERID CUSTOMERS.NAME CUSTOMERS.CUSTID CUSTOMERS.NAME CUSTOMERS.CITY"
    );
    assert_eq!(lines[2], "00001 BOB        1002 BOB        NEW YORK");
}

#[test]
fn test_filter_on_key_with_relation() {
    let mut s = order_entry();
    let lines = s.execute("LIST ALL FIELDS ORDERID FOR CUSTID == '1001'").lines;

    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with("00002 1001 ALICE"));
}

#[test]
fn test_relation_errors_do_not_register() {
    let mut s = order_entry();
    assert_eq!(
        s.execute("SET RELATION TO CUSTID INTO NOWHERE").lines,
        vec!["Table NOWHERE does not exist."]
    );
    assert_eq!(
        s.execute("SET RELATION TO NOPE INTO CUSTOMERS").lines,
        vec!["Field NOPE does not exist in table ORDERS."]
    );
    assert_eq!(s.database().relations().len(), 1);
}

#[test]
fn test_relations_only_apply_to_their_source() {
    let mut s = order_entry();
    s.execute("USE CUSTOMERS");
    let lines = s.execute("LIST ALL").lines;
    assert_eq!(lines[0], "CUSTID NAME       CITY    ");
}

#[test]
fn test_first_declared_relation_wins() {
    let mut s = order_entry();
    run_all(
        &mut s,
        &[
            "USE CUSTOMERS",
            "ADD FIELD ORDERID C 5",
            "USE ORDERS",
            "SET RELATION TO ORDERID INTO CUSTOMERS",
        ],
    );
    assert_eq!(s.database().relations().len(), 2);

    // each relation appends the full target catalog
    let lines = s.execute("LIST ALL NEXT 1").lines;
    let related = "CUSTOMERS.CUSTID CUSTOMERS.NAME CUSTOMERS.CITY CUSTOMERS.ORDERID";
    assert_eq!(
        lines[0],
        format!("ORDERID CUSTID AMOUNT  {} {}", related, related)
    );
    // lookups still go through CUSTID; records predating ORDERID read empty
    assert_eq!(lines[2].matches("BOB").count(), 2);
}

#[test]
fn test_repeated_relation_repeats_columns() {
    let mut s = order_entry();
    assert_eq!(
        s.execute("SET RELATION TO CUSTID INTO CUSTOMERS").lines,
        vec!["Relation set: ORDERS.CUSTID -> CUSTOMERS"]
    );

    let lines = s.execute("LIST ALL FIELDS ORDERID").lines;
    assert_eq!(
        lines[0],
        "ORDERID CUSTOMERS.CUSTID CUSTOMERS.NAME CUSTOMERS.CITY \
         CUSTOMERS.CUSTID CUSTOMERS.NAME CUSTOMERS.CITY"
    );
    assert_eq!(
        lines[3],
        "00002 1001 ALICE      PARIS    1001 ALICE      PARIS   "
    );
}
