//! JSON file logging example
//!
//! Demonstrates a JSON lines sink with opaque values, lazy values and a
//! configuration read from JSON.
//!
//! Run with: cargo run --example json_logging

use rust_log_bridge::prelude::*;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr};

#[derive(Debug, Serialize)]
struct Session {
    user: String,
    roles: Vec<String>,
}

fn main() -> Result<()> {
    println!("=== Rust Log Bridge - JSON Logging Example ===\n");

    let config: HandlerConfig =
        serde_json::from_str(r#"{"level": "INFO", "add_source": true}"#)?;

    let sink = SinkLogger::builder()
        .min_level(LogLevel::Info)
        .appender(JsonAppender::to_file("bridge_demo.jsonl")?)
        .build();
    let logger = Logger::new(SinkHandler::new(sink.clone(), config.into_options()?));

    logger.info(
        "client connected",
        vec![
            Attr::any("peer", IpAddr::V4(Ipv4Addr::new(192, 168, 1, 2))),
            Attr::any("subnet", "192.168.1.0/24".parse::<IpPrefix>()?),
            Attr::any(
                "session",
                Serialized(Session {
                    user: "alice".to_string(),
                    roles: vec!["admin".to_string()],
                }),
            ),
        ],
    );

    // Never computed: debug is below the configured minimum
    logger.debug(
        "cache dump",
        vec![Attr::lazy("entries", || Value::from(expensive_dump()))],
    );

    logger.error(
        "upstream failed",
        vec![Attr::error("error", std::io::Error::other("connection reset"))],
    );

    sink.flush()?;
    println!("Wrote {} entries to bridge_demo.jsonl", sink.metrics().written_count());

    std::fs::remove_file("bridge_demo.jsonl")?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}

fn expensive_dump() -> String {
    (0..10_000).map(|i| i.to_string()).collect::<Vec<_>>().join(",")
}
