//! Loading, editing and writing an LPS document.
//!
//! Run with: cargo run --example simple

use lineput::{from_str, to_string, Document, Record, Sub};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let text = "money#10000:|\ncomputer:|name#我的电脑:|";
    let mut doc: Document = from_str(text);

    // Top-level values live in the line's own info
    let money = doc.get_int("money", 0);
    doc.set_int("money", money + 500);

    // Children are keyed by name
    let computer = doc.find_or_add_line("computer");
    computer.set_int("cores", 8);
    computer.add(Sub::with_info("owner", "Alex, the admin"));
    println!("computer name: {}", computer.get_string("name").unwrap_or_default());

    let out = to_string(&doc);
    println!("LPS output:\n{}\n", out);

    let back: Document = from_str(&out);
    assert_eq!(back, doc);
    assert_eq!(back.get_int("money", 0), 10500);
    assert_eq!(
        back.find_line("computer").map(|l| l.get_string("owner")),
        Some(Some("Alex, the admin".to_string()))
    );
    println!("✓ Round-trip successful ({} lines)", back.len());

    if let Some(line) = back.find_line("computer") {
        for sub in line {
            println!("  {} = {}", sub.name(), sub.info());
        }
    }

    Ok(())
}
