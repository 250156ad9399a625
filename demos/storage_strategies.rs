//! Ordered versus unique children.
//!
//! Run with: cargo run --example storage_strategies

use lineput::{Line, Ordered, Record, Storage, Sub, Unique};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let wire = "player:|name#Thomas1000:|level#3:|";

    // Ordered keeps every child, duplicates included
    let mut ordered: Line<Ordered> = Line::parse(wire);
    ordered.add(Sub::with_info("name", "Alex"));
    println!("ordered ({} children): {}", ordered.len(), ordered);

    let names = ordered.subs().indexes_of("name")?;
    println!("  `name` at positions {:?}", names);
    ordered.subs_mut().insert(0, Sub::with_value("id", 7))?;
    println!("  after insert: {}", ordered);

    // Unique keeps one child per name; a duplicate replaces in place
    let mut unique: Line<Unique> = Line::parse(wire);
    if let Some(old) = unique.add(Sub::with_info("name", "Alex")) {
        println!("unique replaced `{}`", old.info());
    }
    println!("unique ({} children): {}", unique.len(), unique);

    // Positional access is an error on unique storage
    match unique.subs().get(0) {
        Ok(sub) => println!("  first child: {}", sub),
        Err(e) => println!("  {}", e),
    }

    // Convert between strategies
    let collapsed: Line<Unique> = Line::from_line(&ordered);
    println!("ordered collapsed to unique: {}", collapsed);

    // Equal hashes, different ordering
    let ab: Line<Ordered> = Line::parse("x:|a#1:|b#2:|");
    let ba: Line<Ordered> = Line::parse("x:|b#2:|a#1:|");
    println!(
        "reordered children: equal = {}, compare = {:?}",
        ab == ba,
        ab.compare(&ba)
    );

    Ok(())
}
