//! Basic logger usage example
//!
//! Demonstrates named loggers, level filtering and the package-level
//! functions.
//!
//! Run with: cargo run --example basic_usage

use leveled_logger::prelude::*;
use leveled_logger::{info, streams, warning};

fn main() -> Result<()> {
    println!("=== Leveled Logger - Basic Usage Example ===\n");

    let registry = Registry::new();

    // Create a named logger and send it to standard output
    let logger = registry.new_logger("app", Level::Debug);
    logger.attach([streams::stdout()]);

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Raising the minimum level to WARNING:");
    logger.set_min_level(Level::Warning);
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    warning!(logger, "Disk usage at {}%", 91);

    println!("\n3. UTC timestamps with call sites:");
    logger.configure(|s| {
        s.min_level = Level::Info;
        s.use_utc = true;
        s.show_file_and_line_number = true;
    });
    info!(logger, "Listening on port {}", 8080);

    println!("\n4. The same logger is returned by name:");
    registry.get_or_create("app").info("Found by name");

    println!("\n5. Package-level functions:");
    leveled_logger::add_output([streams::stdout()]);
    leveled_logger::info("Unnamed root logger");
    leveled_logger::warningf(format_args!("{} retries left", 2));

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
