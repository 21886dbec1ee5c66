//! Basic bridge usage example
//!
//! Demonstrates console output, levels, bound attributes and groups.
//!
//! Run with: cargo run --example basic_usage

use rust_log_bridge::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Log Bridge - Basic Usage Example ===\n");

    let level = Arc::new(LevelVar::new(Level::DEBUG));
    let opts = HandlerOptions::new()
        .with_add_source(true)
        .with_level(Arc::clone(&level));
    let logger = Logger::new(SinkHandler::console(io::stdout(), opts));

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message", attrs!());
    logger.info("This is an info message", attrs!());
    logger.log(Level::INFO + 2, "This is a slightly more important info message");
    logger.warn("This is a warning message", attrs!());
    logger.error("This is an error message", attrs!());

    println!("\n2. Raising the minimum level at runtime:");
    level.set(Level::WARN);
    logger.info("Info message (hidden)", attrs!());
    logger.warn("Warning message (visible)", attrs!());
    level.set(Level::DEBUG);

    println!("\n3. Bound attributes and groups:");
    let request = logger
        .with(attrs!("service" => "billing"))
        .with_group("request");
    request.info(
        "request served",
        attrs!(
            "method" => "GET",
            "status" => 200i64,
            "latency" => Duration::from_millis(42),
        ),
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
