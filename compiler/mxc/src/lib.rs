//! MXC - the `mx` command-line front end.
//!
//! The binary in `main.rs` only dispatches; everything it runs lives here so
//! the commands can be tested in-process.
//!
//! # Modules
//!
//! - [`commands`]: `mx fmt` and `mx parse`

pub mod commands;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Enable with `RUST_LOG=mx_fmt=trace` or `RUST_LOG=debug`. Output is an
/// indented span tree on stderr. Does nothing unless `RUST_LOG` is set, and
/// only the first call has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        }
    });
}
