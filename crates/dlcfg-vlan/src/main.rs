//! vlancfg - VLAN link configuration tool
//!
//! Entry point for the vlancfg binary. Parses the declared parameters,
//! runs one reconcile pass, and prints a JSON result record (or failure
//! record) on stdout; logs go to stderr.

use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use dlcfg_common::{DesiredState, LinkReconciler};
use dlcfg_vlan::{FailureReport, VlanCfg, VlanReport, VlanSpec};

/// Manage VLAN links on illumos via dladm
#[derive(Parser, Debug)]
#[command(name = "vlancfg")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// VLAN link name
    #[arg(long)]
    name: String,

    /// Underlying link the VLAN rides on (required when state is present)
    #[arg(short = 'l', long)]
    link: Option<String>,

    /// 802.1Q tag for the VLAN link (required when state is present)
    #[arg(short = 'v', long, visible_alias = "vid", default_value_t = 0)]
    vlan_id: u32,

    /// Do not persist the change across reboots
    #[arg(short = 't', long)]
    temporary: bool,

    /// Desired state of the link: present or absent
    #[arg(short = 's', long, default_value = "present", value_parser = parse_state)]
    state: DesiredState,

    /// Report what would change without invoking dladm
    #[arg(long)]
    check: bool,
}

fn parse_state(s: &str) -> Result<DesiredState, String> {
    DesiredState::from_str(s)
}

/// Initializes tracing/logging subsystem
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();
    let desired = args.state;
    let spec = VlanSpec {
        name: args.name,
        link: args.link,
        vlan_id: args.vlan_id,
        temporary: args.temporary,
    };

    let mut cfg = VlanCfg::new(spec);
    match cfg.reconcile(desired, args.check).await {
        Ok(outcome) => {
            let report = VlanReport::new(cfg.spec(), desired, &outcome);
            println!(
                "{}",
                serde_json::to_string_pretty(&report).expect("report serialization")
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            let report = FailureReport::new(cfg.spec(), desired, &error);
            println!(
                "{}",
                serde_json::to_string_pretty(&report).expect("report serialization")
            );
            ExitCode::FAILURE
        }
    }
}
