use std::{
    path::Path,
    process::{Command, Stdio},
};

use anyhow::{ensure, Context, Result};

/// Runs `program` with `args` inside `cwd`, discarding its output.
///
/// Fails if the program cannot be spawned or exits with a non-zero status.
pub fn run(program: &str, args: &[&str], cwd: &Path) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("Failed to run `{}`", render(program, args)))?;

    ensure!(
        status.success(),
        "`{}` exited with {status}",
        render(program, args)
    );

    Ok(())
}

fn render(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
