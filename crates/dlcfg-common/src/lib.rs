//! Common infrastructure for illumos data-link configuration tools.
//!
//! This crate provides shared functionality for the per-resource
//! reconcilers in this workspace (`dlcfg-vlan`, ...):
//!
//! - [`shell`]: command execution through `/bin/sh` with proper quoting
//! - [`reconcile`]: the desired-state engine ([`LinkReconciler`]) shared
//!   by all resource kinds
//! - [`error`]: error types for configuration operations
//!
//! # Architecture
//!
//! Reconcilers follow this pattern:
//!
//! 1. Construct an immutable parameter record at the CLI boundary
//! 2. Query the live system once through `dladm`
//! 3. Issue at most one corrective `dladm` command per invocation
//! 4. Report a structured outcome (or structured failure) to the caller
//!
//! # Example
//!
//! ```ignore
//! use dlcfg_common::{
//!     DesiredState, LinkReconciler,
//!     shell::{self, DLADM_CMD, shellquote},
//! };
//!
//! async fn link_exists(name: &str) -> dlcfg_common::DlCfgResult<bool> {
//!     let cmd = format!("{} show-vlan {}", DLADM_CMD, shellquote(name));
//!     Ok(shell::exec(&cmd).await?.success())
//! }
//! ```

pub mod error;
pub mod reconcile;
pub mod shell;

// Re-export commonly used items at crate root
pub use error::{DlCfgError, DlCfgResult};
pub use reconcile::{DesiredState, LinkReconciler, Outcome};
