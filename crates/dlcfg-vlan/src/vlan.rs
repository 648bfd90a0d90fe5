//! VlanCfg - the VLAN link reconciler.

use async_trait::async_trait;

use dlcfg_common::shell::{self, ExecResult};
use dlcfg_common::{DesiredState, DlCfgError, DlCfgResult, LinkReconciler};

use crate::commands::{build_create_vlan_cmd, build_delete_vlan_cmd, build_show_vlan_cmd};
use crate::types::{VlanSpec, MAX_VLAN_ID};

#[cfg(test)]
use std::collections::VecDeque;

/// Reconciles one declared VLAN link against the live system.
///
/// Idempotence is keyed on the link name only: an existing link with the
/// same name but a different underlying link or tag is left untouched.
pub struct VlanCfg {
    spec: VlanSpec,

    /// Mock mode for testing
    #[cfg(test)]
    mock_mode: bool,

    /// Captured commands in mock mode
    #[cfg(test)]
    captured_commands: Vec<String>,

    /// Scripted results consumed by `run` in mock mode; drains to exit 0
    /// with empty output.
    #[cfg(test)]
    mock_results: VecDeque<ExecResult>,
}

impl VlanCfg {
    /// Creates a reconciler for the given declaration.
    pub fn new(spec: VlanSpec) -> Self {
        Self {
            spec,
            #[cfg(test)]
            mock_mode: false,
            #[cfg(test)]
            captured_commands: Vec::new(),
            #[cfg(test)]
            mock_results: VecDeque::new(),
        }
    }

    /// The declared parameters this reconciler was built from.
    pub fn spec(&self) -> &VlanSpec {
        &self.spec
    }

    /// Enables mock mode for testing
    #[cfg(test)]
    fn with_mock_mode(mut self) -> Self {
        self.mock_mode = true;
        self
    }

    /// Gets captured commands (for testing)
    #[cfg(test)]
    fn captured_commands(&self) -> &[String] {
        &self.captured_commands
    }

    /// Scripts the result of the next command (for testing)
    #[cfg(test)]
    fn push_mock_result(&mut self, result: ExecResult) {
        self.mock_results.push_back(result);
    }

    /// Execute a command (with mock mode support)
    async fn run(&mut self, cmd: &str) -> DlCfgResult<ExecResult> {
        #[cfg(test)]
        if self.mock_mode {
            self.captured_commands.push(cmd.to_string());
            return Ok(self.mock_results.pop_front().unwrap_or(ExecResult {
                exit_code: 0,
                stdout: String::new(),
                stderr: String::new(),
            }));
        }

        shell::exec(cmd).await
    }
}

#[async_trait]
impl LinkReconciler for VlanCfg {
    fn link_name(&self) -> &str {
        &self.spec.name
    }

    fn kind(&self) -> &'static str {
        "vlan"
    }

    fn validate(&self, desired: DesiredState) -> DlCfgResult<()> {
        if self.spec.name.is_empty() {
            return Err(DlCfgError::invalid_config(
                "name",
                "VLAN link name must not be empty",
            ));
        }
        if self.spec.vlan_id != 0 && !self.spec.is_valid_vlan_id() {
            return Err(DlCfgError::invalid_config(
                "vlan_id",
                format!("Invalid VLAN id value (must be 0-{})", MAX_VLAN_ID),
            ));
        }
        if desired == DesiredState::Present {
            if self.spec.link.as_deref().unwrap_or("").is_empty() {
                return Err(DlCfgError::invalid_config(
                    "link",
                    "required when state is 'present'",
                ));
            }
            if self.spec.vlan_id == 0 {
                return Err(DlCfgError::invalid_config(
                    "vlan_id",
                    "required when state is 'present'",
                ));
            }
        }
        Ok(())
    }

    async fn exists(&mut self) -> DlCfgResult<bool> {
        let cmd = build_show_vlan_cmd(&self.spec.name);
        // dladm exits non-zero for unknown links; any failure here is
        // read as absence.
        let result = self.run(&cmd).await?;
        Ok(result.success())
    }

    async fn create(&mut self) -> DlCfgResult<ExecResult> {
        let link = self.spec.link.clone().unwrap_or_default();
        let cmd = build_create_vlan_cmd(
            &self.spec.name,
            &link,
            self.spec.vlan_id,
            self.spec.temporary,
        );
        self.run(&cmd).await?.require_success(&cmd)
    }

    async fn destroy(&mut self) -> DlCfgResult<ExecResult> {
        let cmd = build_delete_vlan_cmd(&self.spec.name, self.spec.temporary);
        self.run(&cmd).await?.require_success(&cmd)
    }
}
