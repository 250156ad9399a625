use lineput::{lps_line, Line, Ordered, Record, Unique, Value};

#[test]
fn test_lps_line_name_only() {
    let line: Line = lps_line!("empty");
    assert_eq!(line.name(), "empty");
    assert!(line.is_empty());
}

#[test]
fn test_lps_line_info_types() {
    let int_line: Line = lps_line!("n" => -123);
    assert_eq!(int_line.info_int(), -123);

    let bool_line: Line = lps_line!("b" => false);
    assert_eq!(bool_line.value(), &Value::Bool(false));

    let text_line: Line = lps_line!("s" => "a#b");
    assert_eq!(text_line.stored_info(), "a/idb");
    assert_eq!(text_line.info(), "a#b");
}

#[test]
fn test_lps_line_children_keep_order() {
    let line: Line<Ordered> = lps_line!("player", {
        "name": "Thomas1000",
        "level": 3,
        "ratio": 0.5,
    });
    let names: Vec<&str> = line.iter().map(Record::name).collect();
    assert_eq!(names, vec!["name", "level", "ratio"]);
    assert_eq!(line.get_double("ratio", 0.0), 0.5);
}

#[test]
fn test_lps_line_unique_replaces() {
    let line: Line<Unique> = lps_line!("player" => "p1", {
        "name": "Thomas1000",
        "name": "Alex",
    });
    assert_eq!(line.to_string(), "player#p1:|name#Alex:|");
}

#[test]
fn test_lps_line_empty_children() {
    let line: Line = lps_line!("x", {});
    assert!(line.is_empty());
}
