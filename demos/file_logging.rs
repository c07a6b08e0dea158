//! File logging example
//!
//! Demonstrates fan-out to the console and a file, each with its own
//! threshold.
//!
//! Run with: cargo run --example file_logging

use leveled_logger::prelude::*;
use leveled_logger::streams;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Leveled Logger - File Logging Example ===\n");

    let logger = Logger::builder("worker")
        .min_level(Level::Debug)
        .timestamp_format(TimestampFormat::Rfc3339Millis)
        .build();

    // Everything goes to the file, only warnings and above to the console
    logger.attach([streams::open_file("application.log")?]);
    logger.attach_sink(Arc::new(Sink::stdout()));

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.warning("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.infof(format_args!("Processing item {}/5", i));
        if i == 3 {
            logger.warning("Item 3 took longer than expected");
        }
    }

    logger.info("All operations completed");
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the full log output");

    Ok(())
}
