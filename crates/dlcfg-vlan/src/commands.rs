//! dladm command builders for VLAN operations.
//!
//! The argument shapes match what `dladm(8)` expects and are kept stable;
//! link names pass through [`shell::shellquote`] before interpolation.

use dlcfg_common::shell;

/// Build the existence query: `dladm show-vlan <name>`.
///
/// Exit 0 means the VLAN link exists.
pub fn build_show_vlan_cmd(name: &str) -> String {
    format!(
        "{} show-vlan {}",
        shell::DLADM_CMD,
        shell::shellquote(name)
    )
}

/// Build the create command:
/// `dladm create-vlan [-t] -l <link> -v <vlan_id> <name>`.
pub fn build_create_vlan_cmd(name: &str, link: &str, vlan_id: u32, temporary: bool) -> String {
    format!(
        "{} create-vlan{} -l {} -v {} {}",
        shell::DLADM_CMD,
        if temporary { " -t" } else { "" },
        shell::shellquote(link),
        vlan_id,
        shell::shellquote(name)
    )
}

/// Build the delete command: `dladm delete-vlan [-t] <name>`.
pub fn build_delete_vlan_cmd(name: &str, temporary: bool) -> String {
    format!(
        "{} delete-vlan{} {}",
        shell::DLADM_CMD,
        if temporary { " -t" } else { "" },
        shell::shellquote(name)
    )
}
