//! # pipedeploy-cli — Deployment Helper Validation CLI
//!
//! Provides the `pipedeploy` command-line interface: the gate every
//! deployment passes through before the pipeline runner sees its inputs.
//!
//! ## Subcommands
//!
//! - `pipedeploy args` — Run arguments (module and date window).
//! - `pipedeploy config` — Pipeline or transformation configuration files.
//! - `pipedeploy version` — Release version strings.
//!
//! ```bash
//! pipedeploy args --module daily_ingest --start-date 2022-01-01 --end-date 2022-01-31
//! pipedeploy args --module stream_events --optional-dates --set env=prod
//! pipedeploy config conf/pipeline.yaml --kind pipeline
//! pipedeploy --format json version 1.4.0-rc1
//! ```
//!
//! ## Exit codes
//!
//! `0` valid, `1` validation failure, `2` operational error (unreadable or
//! malformed file).
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; every validation rule lives in
//!   `pipedeploy-schema`.
//! - Reports go to stdout, logs to stderr.

pub mod args;
pub mod config;
pub mod document;
pub mod output;
pub mod version;

pub use output::{OutputFormat, Report};
