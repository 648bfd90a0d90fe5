//! JSON records reported to the caller on stdout.
//!
//! Shapes follow the conventions of configuration-management callers: a
//! result record echoes the declaration plus `changed` and any command
//! output; a failure record carries `msg` and, when a command ran, `rc`.

use serde::Serialize;

use dlcfg_common::{DesiredState, DlCfgError, Outcome};

use crate::types::VlanSpec;

/// Result record printed after a successful invocation.
#[derive(Debug, Serialize)]
pub struct VlanReport {
    pub name: String,
    pub link: Option<String>,
    pub state: &'static str,
    pub temporary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<u32>,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

impl VlanReport {
    /// Builds the record from the declaration and the reconcile outcome.
    pub fn new(spec: &VlanSpec, desired: DesiredState, outcome: &Outcome) -> Self {
        VlanReport {
            name: spec.name.clone(),
            link: spec.link.clone(),
            state: desired.as_str(),
            temporary: spec.temporary,
            vlan_id: (spec.vlan_id != 0).then_some(spec.vlan_id),
            changed: outcome.changed,
            stdout: outcome.stdout.clone(),
            stderr: outcome.stderr.clone(),
        }
    }
}

/// Failure record printed when the invocation aborts.
#[derive(Debug, Serialize)]
pub struct FailureReport {
    pub name: String,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rc: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<u32>,
}

impl FailureReport {
    /// Builds the record from the declaration and the error that aborted
    /// the invocation.
    ///
    /// A command failure reports the command's stderr as `msg` and its
    /// exit code as `rc`; a validation failure instead echoes the
    /// offending declaration fields.
    pub fn new(spec: &VlanSpec, desired: DesiredState, error: &DlCfgError) -> Self {
        match error {
            DlCfgError::CommandFailed {
                exit_code, stderr, ..
            } => FailureReport {
                name: spec.name.clone(),
                msg: if stderr.is_empty() {
                    error.to_string()
                } else {
                    stderr.clone()
                },
                rc: Some(*exit_code),
                state: None,
                link: None,
                vlan_id: None,
            },
            DlCfgError::InvalidConfig { .. } => FailureReport {
                name: spec.name.clone(),
                msg: error.to_string(),
                rc: None,
                state: Some(desired.as_str()),
                link: spec.link.clone(),
                vlan_id: (spec.vlan_id != 0).then_some(spec.vlan_id),
            },
            _ => FailureReport {
                name: spec.name.clone(),
                msg: error.to_string(),
                rc: None,
                state: None,
                link: None,
                vlan_id: None,
            },
        }
    }
}
