//! Orders and customers linked with SET RELATION, listed through the
//! interpreter without touching any snapshot file.

use xbase::{Config, Session};

fn main() {
    println!("=== xbase Relation Demo ===\n");

    let mut session = Session::new(&Config::new().with_autosave(false));

    let script = [
        "USE CUSTOMERS",
        "ADD FIELD CUSTID C 4",
        "ADD FIELD NAME C 12",
        "ADD FIELD CITY C 10",
        "ADD RECORD 1001 \"ALICE SMITH\" PARIS",
        "ADD RECORD 1002 \"BOB JONES\" \"NEW YORK\"",
        "USE ORDERS",
        "ADD FIELD ORDERID C 5",
        "ADD FIELD CUSTID C 4",
        "ADD FIELD AMOUNT N 8 2",
        "ADD RECORD 00001 1002 19.90",
        "ADD RECORD 00002 1001 250.00",
        "ADD RECORD 00003 1002 7.25",
        "SET RELATION TO CUSTID INTO CUSTOMERS",
        "LIST STRUCTURE",
        "SET RECORD ON",
        "LIST ALL",
        "LIST ALL FIELDS ORDERID, AMOUNT FOR AMOUNT > 10",
        "LIST ALL NEXT 1",
        "LIST NEXT 5",
    ];

    for line in script {
        println!(". {}", line);
        for out in session.execute(line).lines {
            println!("{}", out);
        }
        println!();
    }

    println!("=== Demo Complete ===");
}
