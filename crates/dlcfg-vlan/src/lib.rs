//! dlcfg-vlan - VLAN link configuration for illumos
//!
//! Declares the desired existence/absence of a VLAN link and reconciles
//! the live system against it through `dladm(8)`:
//!
//! 1. Query: `dladm show-vlan <name>` (exit 0 means the link exists)
//! 2. Create: `dladm create-vlan [-t] -l <link> -v <vlan_id> <name>`
//! 3. Delete: `dladm delete-vlan [-t] <name>`
//!
//! At most one mutating command runs per invocation; the outcome (or a
//! structured failure) is reported as JSON by the `vlancfg` binary.

mod commands;
mod report;
mod types;
mod vlan;

pub use commands::*;
pub use report::*;
pub use types::*;
pub use vlan::VlanCfg;
