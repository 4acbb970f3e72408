//! Walk through the basic table operations with string keys and values.
//!
//! Run with `cargo run --example basic`.

use chain_table::{ChainedTable, StringTable, TableError};

fn main() -> Result<(), TableError> {
    let mut map: StringTable<&'static str> = ChainedTable::string_keyed(10)?;

    map.put("key1".to_string(), "value1");
    map.put("key2".to_string(), "value2");

    match map.get("key1") {
        Some(value) => println!("Got value for key1: {value}"),
        None => println!("key1 not found"),
    }

    if map.contains_key("key2") {
        println!("Map contains key2");
    }

    if map.remove("key1") {
        println!("Removed key1");
    }

    println!("Map size: {}", map.len());

    map.resize(32)?;
    println!(
        "Resized to {} buckets, load factor {:.3}",
        map.capacity(),
        map.load_factor()
    );

    map.clear();
    println!("Map cleared, size: {}", map.len());

    map.destroy();
    Ok(())
}
