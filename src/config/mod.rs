//! Startup configuration resolution.
//!
//! Credentials are resolved in the following order:
//!
//! 1. `--token` CLI flag
//! 2. `MIRO_ACCESS_TOKEN` environment variable (via clap's `env` feature)
//!
//! A missing credential is the sole fatal condition in the process; all
//! per-invocation failures are reported to the caller instead of aborting.

mod settings;

pub use settings::{Config, DEFAULT_BASE_URL};
