//! Shared helpers for the integration tests.
//!
//! The library logs through the `log` facade; `tracing-subscriber` picks
//! those records up (via its `tracing-log` bridge) so resolver decisions show
//! up next to test output.
//!
//! # Environment Variables
//!
//! - `RUST_LOG=swatch=trace` - Include per-lookup cache traces
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing

#![allow(dead_code)]

use std::sync::Once;

use swatch::{Dataset, DatasetBuilder, Rgba};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize test logging. Idempotent.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("swatch=debug,test=info"));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_file(true)
                        .with_line_number(true)
                        .with_thread_ids(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// Record which scenario a test exercises, next to the library's own logs.
pub fn log_test_context(test_name: &str, description: &str) {
    tracing::info!(test_name = test_name, description = description, "test context");
}

/// A small two-scheme palette with one indexed ramp.
///
/// `warm` and `cool` disagree on `accent`; `warm` is declared first.
pub fn fixture_dataset() -> Dataset {
    DatasetBuilder::new()
        .named_scheme("warm", "ink")
        .named_scheme("cool", "ink")
        .colors(
            "warm",
            &[
                ("ink", Rgba::opaque(10, 10, 10)),
                ("accent", Rgba::opaque(230, 80, 20)),
                ("ember", Rgba::opaque(230, 80, 20)),
            ],
        )
        .colors(
            "cool",
            &[
                ("ink", Rgba::opaque(10, 10, 10)),
                ("accent", Rgba::opaque(20, 80, 230)),
                ("glacier", Rgba::opaque(200, 230, 255)),
            ],
        )
        .indexed_scheme(
            "steps",
            [
                Rgba::opaque(10, 10, 10),
                Rgba::opaque(128, 128, 128),
                Rgba::opaque(250, 250, 250),
            ],
        )
        .build()
        .expect("fixture dataset is consistent")
}
