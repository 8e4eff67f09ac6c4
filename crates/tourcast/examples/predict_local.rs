//! Score a record against artifacts on disk, without the HTTP server.
//!
//! Run with: cargo run --example predict_local -- '<json record>'
//!
//! Artifact paths come from the same `TOURCAST_*` variables the server uses.

use tourcast::prelude::*;

const DEFAULT_RECORD: &str = r#"{
    "country": "Angola",
    "year": 2020,
    "tourism_receipts": 150000000.0,
    "tourism_exports": 5.5,
    "tourism_expenditures": 3.0,
    "gdp": 10000000000.0,
    "inflation": 5.0,
    "unemployment": 7.5
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;
    let pipeline = pipeline_from_config(&config);
    println!("artifacts: {:?}", pipeline.status());

    let record = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_RECORD.to_string());

    match pipeline.predict_json(record.as_bytes()) {
        Ok(prediction) => println!("predicted_tourism_arrivals = {}", prediction),
        Err(e) => println!("{} error: {}", e.kind(), e),
    }

    Ok(())
}
