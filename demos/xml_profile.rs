//! XML profile example
//!
//! Initializes logging from `config/zap.xml`, or from the path given as the
//! first argument. Without a readable file the built-in profile is used.
//!
//! Run with: cargo run --example xml_profile [-- path/to/zap.xml]

use profile_logger::prelude::*;
use profile_logger::{info, warn};

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/zap.xml".to_string());

    println!("=== Profile Logger - XML Profile Example ===\n");

    let logger = init_log(&config_path)?;
    println!("Minimum level: {}\n", logger.min_level());

    logger.debug("Loading configuration...");
    info!(logger, "Configuration loaded from {}", config_path);

    let http = logger.named("http").with_fields(
        LogContext::new()
            .with_field("port", 8080)
            .with_field("tls", false),
    );
    http.info("listening");

    for i in 1..=3 {
        info!(http, "Processing request {}/3", i);
    }
    warn!(http, "Slow response from upstream");

    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
