//! Basic logger usage example
//!
//! Demonstrates colorized blocks, groups, bound attributes, context values and
//! optional JSON forwarding.
//!
//! Run with: cargo run --example basic_usage
//!
//! Set `PRETTY_LOG_JSON_URL=http://localhost:8081/logs` to forward entries to
//! a JSON collector as well.

use rust_pretty_logger::prelude::*;
use rust_pretty_logger::{default_logger, info, set_default};

fn main() -> Result<()> {
    println!("=== Rust Pretty Logger - Basic Usage Example ===\n");

    // Colorized output on stderr, Debug and above
    let logger = Logger::builder().min_level(LogLevel::Debug).build();

    println!("1. Levels and attributes:");
    logger.info("Welcome to API !!!!", &[]);
    logger.warn(
        "Warn level log",
        &attrs!["warning_message" => "beware the dog !"],
    );
    logger.error(
        "Error level log",
        &attrs!["error_message" => "OUCH", "status_code" => 7],
    );
    logger.debug("Debug level log", &attrs!["custom-arg" => "a value"]);

    println!("\n2. Groups and bound attributes:");
    let grouped = logger.with_group("GroupPrefix");
    grouped.warn(
        "Warn level log with group prefix",
        &attrs!["warning_message" => "beware the dog"],
    );

    let with_url = logger.with([("url", "/url")]);
    with_url.error(
        "Error level log with repetitive attribute",
        &attrs!["error_message" => "OUCH"],
    );

    let both = logger.with_group("AnotherPrefix").with([("url", "/url")]);
    both.info("Information", &attrs!["info_message" => "my message"]);

    println!("\n3. Monochrome output:");
    let mono = Logger::builder()
        .colorize(false)
        .min_level(LogLevel::Error)
        .build();
    mono.info("filtered out: below Error", &[]);
    mono.error("test black and white", &[]);
    let mono_with_url = mono.with([("url", "/url")]);
    mono_with_url.fatal("fatal without colors", &[]);

    let anonymous = Logger::builder().colorize(false).add_source(false).build();
    anonymous.info("no source location", &[]);

    println!("\n4. JSON forwarding (configured from the environment):");
    let json_logger = Logger::from_env()?
        .with([("url", "/url")])
        .with_group("values");
    if json_logger.handler().options().json_url.is_some() {
        json_logger.info("foo", &[]);
        json_logger.warn_json("sent to the collector only", &[]);
    } else {
        println!("   PRETTY_LOG_JSON_URL not set, text only");
        json_logger.info_text("foo", &[]);
    }

    println!("\n5. Context values:");
    let ctx_logger = logger.with_context_keys(["id"]);
    let ctx = LogContext::new().with_value("id", "my id");
    ctx_logger.warn_ctx_text(&ctx, "warning with ctx attrs", &[]);

    println!("\n6. Macros and the default logger:");
    set_default(logger.with_group("default"));
    let port = 8080;
    info!(default_logger(), "Listening on port {}", port; "scheme" => "http");

    let metrics = logger.metrics();
    println!(
        "\n=== Done: {} written, {} filtered, {} JSON delivered ===",
        metrics.text_written(),
        metrics.filtered(),
        metrics.json_delivered()
    );

    Ok(())
}
