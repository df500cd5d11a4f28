use std::process::{Command, Stdio};

use anyhow::{bail, ensure, Context, Result};

/// Commands the installer shells out to, with the names shown to the user.
pub const REQUIRED_TOOLS: [(&str, &str); 4] = [
    ("mysql", "MySQL client"),
    ("git", "Git"),
    ("php", "PHP"),
    ("wp", "WP-CLI"),
];

/// Verifies every required tool is on the PATH and answers `--version`.
pub fn ensure_tools_installed() -> Result<()> {
    for (command, name) in REQUIRED_TOOLS {
        check_tool(command, name)?;
    }

    Ok(())
}

fn check_tool(command: &str, name: &str) -> Result<()> {
    if which::which(command).is_err() {
        bail!("{name} is not installed (no `{command}` found in PATH)");
    }

    let status = Command::new(command)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("Failed to run `{command} --version`"))?;

    ensure!(
        status.success(),
        "{name} is not installed (`{command} --version` exited with {status})"
    );

    Ok(())
}
