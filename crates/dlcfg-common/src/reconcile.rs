//! The reconcile engine shared by data-link configuration tools.
//!
//! A tool declares one resource (a VLAN, a VNIC, ...) and the state it
//! should be in; the engine queries the live system once and issues at
//! most one corrective command. Implementors supply the resource-specific
//! commands through [`LinkReconciler`]; the provided
//! [`reconcile`](LinkReconciler::reconcile) method owns the control flow.

use async_trait::async_trait;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::DlCfgResult;
use crate::shell::ExecResult;

/// Desired presence of a data link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredState {
    /// The link should exist.
    Present,
    /// The link should not exist.
    Absent,
}

impl FromStr for DesiredState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(DesiredState::Present),
            "absent" => Ok(DesiredState::Absent),
            other => Err(format!(
                "unknown state '{}', expected 'present' or 'absent'",
                other
            )),
        }
    }
}

impl DesiredState {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            DesiredState::Present => "present",
            DesiredState::Absent => "absent",
        }
    }
}

/// What one reconcile invocation did.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    /// True when a corrective command ran (or would have, in check mode).
    pub changed: bool,
    /// stdout of the mutating command, when non-empty.
    pub stdout: Option<String>,
    /// stderr of the mutating command, when non-empty.
    pub stderr: Option<String>,
}

impl Outcome {
    /// The live system already matched the desired state.
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// Check mode: a corrective command would have been issued.
    pub fn would_change() -> Self {
        Outcome {
            changed: true,
            stdout: None,
            stderr: None,
        }
    }

    /// A corrective command ran; keep its non-empty output streams.
    pub fn applied(result: ExecResult) -> Self {
        let ExecResult { stdout, stderr, .. } = result;
        Outcome {
            changed: true,
            stdout: (!stdout.is_empty()).then_some(stdout),
            stderr: (!stderr.is_empty()).then_some(stderr),
        }
    }
}

/// A declared data link that can be queried, created and destroyed.
///
/// The provided [`reconcile`](LinkReconciler::reconcile) method drives one
/// invocation: validate the declaration, query the live system once, then
/// issue at most one mutating command. There are no retries and no partial
/// application; each step either completes or aborts the invocation.
#[async_trait]
pub trait LinkReconciler {
    /// Name of the link instance, the key used to query the live system.
    fn link_name(&self) -> &str;

    /// Resource kind for log lines ("vlan", "vnic", ...).
    fn kind(&self) -> &'static str;

    /// Rejects an inconsistent declaration before any subprocess runs.
    fn validate(&self, _desired: DesiredState) -> DlCfgResult<()> {
        Ok(())
    }

    /// Queries the live system for the link.
    ///
    /// A non-zero exit from the query command is read as "does not
    /// exist", never surfaced as an error.
    async fn exists(&mut self) -> DlCfgResult<bool>;

    /// Issues the creating command; non-zero exit is fatal.
    async fn create(&mut self) -> DlCfgResult<ExecResult>;

    /// Issues the deleting command; non-zero exit is fatal.
    async fn destroy(&mut self) -> DlCfgResult<ExecResult>;

    /// Drives one reconcile invocation.
    ///
    /// With `check_mode` set, reports the change that would occur without
    /// issuing any mutating command.
    async fn reconcile(
        &mut self,
        desired: DesiredState,
        check_mode: bool,
    ) -> DlCfgResult<Outcome> {
        self.validate(desired)?;

        let exists = self.exists().await?;
        debug!(
            kind = self.kind(),
            link = self.link_name(),
            exists,
            desired = desired.as_str(),
            "queried link state"
        );

        match desired {
            DesiredState::Absent if exists => {
                if check_mode {
                    info!(
                        kind = self.kind(),
                        link = self.link_name(),
                        "check mode: would delete"
                    );
                    return Ok(Outcome::would_change());
                }
                let result = self.destroy().await?;
                info!(kind = self.kind(), link = self.link_name(), "link deleted");
                Ok(Outcome::applied(result))
            }
            DesiredState::Present if !exists => {
                if check_mode {
                    info!(
                        kind = self.kind(),
                        link = self.link_name(),
                        "check mode: would create"
                    );
                    return Ok(Outcome::would_change());
                }
                let result = self.create().await?;
                info!(kind = self.kind(), link = self.link_name(), "link created");
                Ok(Outcome::applied(result))
            }
            _ => {
                debug!(
                    kind = self.kind(),
                    link = self.link_name(),
                    "already in desired state"
                );
                Ok(Outcome::unchanged())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DlCfgError;

    #[test]
    fn test_desired_state_from_str() {
        assert_eq!(
            "present".parse::<DesiredState>().unwrap(),
            DesiredState::Present
        );
        assert_eq!(
            "absent".parse::<DesiredState>().unwrap(),
            DesiredState::Absent
        );
        assert!("gone".parse::<DesiredState>().is_err());
    }

    #[test]
    fn test_desired_state_as_str() {
        assert_eq!(DesiredState::Present.as_str(), "present");
        assert_eq!(DesiredState::Absent.as_str(), "absent");
    }

    #[test]
    fn test_outcome_constructors() {
        let unchanged = Outcome::unchanged();
        assert!(!unchanged.changed);
        assert!(unchanged.stdout.is_none());

        let would = Outcome::would_change();
        assert!(would.changed);
        assert!(would.stdout.is_none());
        assert!(would.stderr.is_none());

        let applied = Outcome::applied(ExecResult {
            exit_code: 0,
            stdout: "created".to_string(),
            stderr: String::new(),
        });
        assert!(applied.changed);
        assert_eq!(applied.stdout.as_deref(), Some("created"));
        assert!(applied.stderr.is_none());
    }

    /// Scripted reconciler for exercising the engine without a subprocess.
    struct FakeLink {
        valid: bool,
        exists: bool,
        exist_calls: usize,
        create_calls: usize,
        destroy_calls: usize,
    }

    impl FakeLink {
        fn new(exists: bool) -> Self {
            FakeLink {
                valid: true,
                exists,
                exist_calls: 0,
                create_calls: 0,
                destroy_calls: 0,
            }
        }
    }

    #[async_trait]
    impl LinkReconciler for FakeLink {
        fn link_name(&self) -> &str {
            "fake0"
        }

        fn kind(&self) -> &'static str {
            "fake"
        }

        fn validate(&self, _desired: DesiredState) -> DlCfgResult<()> {
            if self.valid {
                Ok(())
            } else {
                Err(DlCfgError::invalid_config("fake", "declaration rejected"))
            }
        }

        async fn exists(&mut self) -> DlCfgResult<bool> {
            self.exist_calls += 1;
            Ok(self.exists)
        }

        async fn create(&mut self) -> DlCfgResult<ExecResult> {
            self.create_calls += 1;
            self.exists = true;
            Ok(ExecResult {
                exit_code: 0,
                stdout: String::new(),
                stderr: String::new(),
            })
        }

        async fn destroy(&mut self) -> DlCfgResult<ExecResult> {
            self.destroy_calls += 1;
            self.exists = false;
            Ok(ExecResult {
                exit_code: 0,
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_reconcile_creates_missing_link() {
        let mut link = FakeLink::new(false);
        let outcome = link.reconcile(DesiredState::Present, false).await.unwrap();
        assert!(outcome.changed);
        assert_eq!(link.exist_calls, 1);
        assert_eq!(link.create_calls, 1);
        assert_eq!(link.destroy_calls, 0);
    }

    #[tokio::test]
    async fn test_reconcile_present_is_noop_when_link_exists() {
        let mut link = FakeLink::new(true);
        let outcome = link.reconcile(DesiredState::Present, false).await.unwrap();
        assert!(!outcome.changed);
        assert_eq!(link.create_calls, 0);
    }

    #[tokio::test]
    async fn test_reconcile_deletes_existing_link() {
        let mut link = FakeLink::new(true);
        let outcome = link.reconcile(DesiredState::Absent, false).await.unwrap();
        assert!(outcome.changed);
        assert_eq!(link.destroy_calls, 1);
    }

    #[tokio::test]
    async fn test_reconcile_absent_is_noop_when_link_missing() {
        let mut link = FakeLink::new(false);
        let outcome = link.reconcile(DesiredState::Absent, false).await.unwrap();
        assert!(!outcome.changed);
        assert_eq!(link.destroy_calls, 0);
        assert_eq!(link.exist_calls, 1);
    }

    #[tokio::test]
    async fn test_reconcile_is_idempotent() {
        let mut link = FakeLink::new(false);
        let first = link.reconcile(DesiredState::Present, false).await.unwrap();
        let second = link.reconcile(DesiredState::Present, false).await.unwrap();
        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(link.create_calls, 1);
    }

    #[tokio::test]
    async fn test_check_mode_never_mutates() {
        let mut link = FakeLink::new(false);
        let outcome = link.reconcile(DesiredState::Present, true).await.unwrap();
        assert!(outcome.changed);
        assert_eq!(link.create_calls, 0);

        let mut link = FakeLink::new(true);
        let outcome = link.reconcile(DesiredState::Absent, true).await.unwrap();
        assert!(outcome.changed);
        assert_eq!(link.destroy_calls, 0);

        // No change needed: check mode reports the same no-op.
        let mut link = FakeLink::new(true);
        let outcome = link.reconcile(DesiredState::Present, true).await.unwrap();
        assert!(!outcome.changed);
    }

    #[tokio::test]
    async fn test_validation_runs_before_any_query() {
        let mut link = FakeLink::new(false);
        link.valid = false;
        let err = link
            .reconcile(DesiredState::Present, false)
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(link.exist_calls, 0);
        assert_eq!(link.create_calls, 0);
    }
}
