#![forbid(unsafe_code)]

mod fixtures;
mod report;

pub use fixtures::{fixed_target_geometry, materials};
pub use report::{print_segment_table, segment_frequencies};

/// Install a `fmt` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
