//! LIST behaviour through the interpreter: ranges, cursor, filters,
//! projections and record numbers.

use xbase::{Config, Session};

fn customers(count: usize) -> Session {
    let mut s = Session::new(&Config::new().with_autosave(false));
    s.execute("USE CUSTOMERS");
    s.execute("ADD FIELD ID C 4");
    s.execute("ADD FIELD NAME C 10");
    s.execute("ADD FIELD AGE N 3");
    for i in 0..count {
        s.execute(&format!("ADD RECORD {} NAME{} {}", 1001 + i, i, 20 + i * 10));
    }
    s
}

fn rows(s: &mut Session, line: &str) -> Vec<String> {
    // header and rule come first
    s.execute(line).lines.into_iter().skip(2).collect()
}

fn cursor(s: &Session) -> usize {
    s.database().selected().unwrap().cursor()
}

#[test]
fn test_sequential_listing_resumes_at_cursor() {
    let mut s = customers(5);

    assert_eq!(rows(&mut s, "LIST NEXT 2").len(), 2);
    assert_eq!(cursor(&s), 2);

    let next = rows(&mut s, "LIST NEXT 2");
    assert!(next[0].starts_with("1003"));
    assert_eq!(cursor(&s), 4);

    assert_eq!(rows(&mut s, "LIST REST").len(), 1);
    assert_eq!(cursor(&s), 5);

    assert!(rows(&mut s, "LIST").is_empty());
    assert_eq!(rows(&mut s, "LIST ALL").len(), 5);
}

#[test]
fn test_next_past_end_still_moves_cursor() {
    let mut s = customers(3);
    s.execute("LIST NEXT 2");
    assert_eq!(rows(&mut s, "LIST NEXT 10").len(), 1);
    assert_eq!(cursor(&s), 12);
}

#[test]
fn test_all_and_next_in_either_order() {
    let mut s = customers(5);
    s.execute("LIST ALL");
    assert_eq!(rows(&mut s, "LIST NEXT 2 ALL").len(), 2);
    assert_eq!(cursor(&s), 2);
    assert_eq!(rows(&mut s, "LIST ALL NEXT 3").len(), 3);
    assert_eq!(cursor(&s), 3);
}

#[test]
fn test_filters() {
    let mut s = customers(5);

    let found = rows(&mut s, "LIST ALL FOR ID == \"1001\"");
    assert_eq!(found, vec!["1001 NAME0      20 "]);

    assert!(rows(&mut s, "LIST ALL FOR ID == \"9999\"").is_empty());
    assert_eq!(cursor(&s), 5);

    assert_eq!(rows(&mut s, "LIST ALL FOR AGE >= 40 and AGE < 60").len(), 2);
    assert_eq!(rows(&mut s, "list all for not (age > 20)").len(), 1);
    assert_eq!(rows(&mut s, "LIST ALL FOR NAME == 'NAME3' || ID = 1001").len(), 2);
}

#[test]
fn test_faulty_filters_match_nothing() {
    let mut s = customers(3);
    for filter in [
        "NAME > 5",
        "MISSING == 1",
        "AGE / 0 > 1",
        "ID ==",
        "open('x')",
    ] {
        let lines = s.execute(&format!("LIST ALL FOR {}", filter)).lines;
        assert_eq!(lines.len(), 2, "{} should list no rows", filter);
    }
}

#[test]
fn test_fields_projection() {
    let mut s = customers(2);
    let lines = s.execute("LIST ALL FIELDS name, id").lines;
    assert_eq!(lines[0], "NAME       ID  ");
    assert_eq!(lines[2], "NAME0      1001");

    assert_eq!(
        s.execute("LIST ALL FIELDS CITY").lines,
        vec!["Field CITY does not exist in table CUSTOMERS."]
    );
}

#[test]
fn test_record_numbers() {
    let mut s = customers(3);
    s.execute("SET RECORD ON");
    let lines = s.execute("LIST ALL FOR ID == '1002'").lines;
    assert_eq!(lines[0], "Record# ID   NAME       AGE");
    assert_eq!(lines[2], "      2 1002 NAME1      30 ");

    s.execute("SET RECORD OFF");
    assert!(!s.execute("LIST ALL").lines[0].starts_with("Record#"));
}

#[test]
fn test_structure_leaves_cursor() {
    let mut s = customers(3);
    s.execute("LIST NEXT 1");
    let lines = s.execute("LIST STRUCTURE").lines;
    assert_eq!(lines[0], "Structure for database: CUSTOMERS");
    assert_eq!(lines[5], "AGE          N         3    0");
    assert_eq!(cursor(&s), 1);
}

#[test]
fn test_wrong_arity_keeps_record_count() {
    let mut s = customers(2);
    assert_eq!(
        s.execute("ADD RECORD 1 TWO").lines,
        vec!["Invalid number of values. Expected 3, got 2."]
    );
    assert_eq!(
        s.execute("ADD RECORD 1 2 3 4").lines,
        vec!["Invalid number of values. Expected 3, got 4."]
    );
    assert_eq!(s.database().selected().unwrap().record_count(), 2);
}
