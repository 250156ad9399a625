use chrono::{TimeZone, Utc};
use lineput::escape::{decode, encode};
use lineput::{Document, Line, Ordered, Record, Sub, Value};

#[test]
fn test_escape_table() {
    assert_eq!(encode("|"), "/!|");
    assert_eq!(encode("/"), "/!");
    assert_eq!(encode("\t"), "/tab");
    assert_eq!(encode("\n"), "/n");
    assert_eq!(encode("\r"), "/r");
    assert_eq!(encode("#"), "/id");
    assert_eq!(encode(","), "/com");
    assert_eq!(encode(":|"), ":/!|");
}

#[test]
fn test_legacy_sequences_decode() {
    assert_eq!(decode("a/stopb"), "a:|b");
    assert_eq!(decode("x/equ1"), "x=1");
    assert_eq!(encode("x=1"), "x=1");
}

#[test]
fn test_line_without_delimiter() {
    let line: Line = Line::parse("flag");
    assert_eq!(line.name(), "flag");
    assert!(line.is_empty());
    assert_eq!(line.raw_text(), "flag");
    assert_eq!(line.to_string(), "flag:|flag");

    let with_comment: Line = Line::parse("cfg#2///note");
    assert_eq!(with_comment.info_int(), 2);
    assert_eq!(with_comment.raw_text(), "cfg#2");
    assert_eq!(with_comment.comments(), "note");
}

#[test]
fn test_full_grammar() {
    let wire = "item#sword:|atk#12:|def:|sharp/com shiny///found in the cave";
    let line: Line<Ordered> = Line::parse(wire);
    assert_eq!(line.name(), "item");
    assert_eq!(line.info(), "sword");
    let names: Vec<&str> = line.iter().map(Sub::name).collect();
    assert_eq!(names, vec!["atk", "def"]);
    assert_eq!(line.find("def").map(Record::stored_info).as_deref(), Some(""));
    assert_eq!(line.raw_text(), "sharp/com shiny");
    assert_eq!(line.text(), "sharp, shiny");
    assert_eq!(line.comments(), "found in the cave");
    assert_eq!(line.to_string(), wire);
}

#[test]
fn test_comment_is_not_escaped() {
    let mut line: Line = Line::parse("a:|");
    line.set_comments("x, y #z");
    assert_eq!(line.to_string(), "a:|///x, y #z");
}

#[test]
fn test_value_stored_forms() {
    let mut sub = Sub::new("v");
    sub.set_info_int(-42);
    assert_eq!(sub.stored_info(), "-42");
    sub.set_info_double(std::f64::consts::PI);
    assert_eq!(sub.stored_info(), "3.141592653589793");
    sub.set_info_float(6969.69);
    assert_eq!(sub.stored_info(), "6969.69");
    sub.set_info_bool(true);
    assert_eq!(sub.stored_info(), "true");
    sub.set_info_datetime(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    assert_eq!(sub.stored_info(), "2024-05-01T12:00:00Z");
}

#[test]
fn test_lenient_getters() {
    let sub = Sub::parse("v#not a number");
    assert_eq!(sub.info_int(), 0);
    assert_eq!(sub.info_double(), 0.0);
    assert!(!sub.info_bool());
    assert_eq!(sub.info_datetime().timestamp(), 0);
    assert_eq!(Sub::parse("v#TRUE").value(), &Value::from_stored("TRUE"));
    assert!(Sub::parse("v#TRUE").info_bool());
}

#[test]
fn test_document_line_endings() {
    let doc: Document = "a:|\r\n\r\nb:|\n\n".parse().unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.to_string(), "a:|\nb:|");
}
