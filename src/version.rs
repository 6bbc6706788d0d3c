// Package identity baked in at compile time

pub const NAME: &str = env!("CARGO_PKG_NAME");

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line description from Cargo.toml, echoed by GET /version.
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
