//! Converts a compact form value to GeoJSON and back.
//!
//! ```text
//! cargo run --example convert -- Polygon "[[36.8, -121.9], [36.9, -122.0], [36.7, -122.1]]"
//! RUST_LOG=geoform=debug cargo run --example convert -- Point "[1]"
//! ```

use geoform::{ValueType, check_value, from_geojson, to_geojson};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let type_name = args.next().unwrap_or_else(|| "Point".to_string());
    let value = args.next().unwrap_or_else(|| "[36.8, -121.9]".to_string());

    let value_type: ValueType = match type_name.parse() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    println!("Type:  {}", value_type);
    println!("Value: {}", value);
    match check_value(&value, value_type.name(), false, "") {
        Ok(()) => println!("Check: ok"),
        Err(e) => println!("Check: {}", e),
    }

    let doc = match to_geojson(&value, value_type) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Cannot convert: {}", e);
            std::process::exit(1);
        }
    };
    println!("\n=== GeoJSON ===");
    println!("{}", serde_json::to_string_pretty(&doc).unwrap_or_default());

    println!("\n=== Back to compact ===");
    match from_geojson(Some(&doc), value_type) {
        Ok(text) if text.is_empty() => println!("(empty)"),
        Ok(text) => println!("{}", text),
        Err(e) => println!("error: {}", e),
    }
}
