use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use indicatif::ProgressBar;
use owo_colors::{OwoColorize, Stream, Style};

use crate::{
    config::{PreferencesStore, StoredPreferences},
    prompts::{self, AnswerSet},
    replacer, shell, warn,
};

pub const TEMPLATE_REPO_URL: &str = "https://github.com/msteinerweb/wpstarter.git";
pub const DEFAULT_TARGET_DIR: &str = "wpstarter";

const CONFIG_FILE: &str = "config.js";

/// Absolute destination, the given name joined to the current directory.
pub fn resolve_target_dir(name: &str) -> Result<PathBuf> {
    let cwd = env::current_dir().context("Failed to get current directory")?;

    Ok(cwd.join(name))
}

/// The target may be missing or empty; anything else is a conflict.
pub fn ensure_target_available(dir: &Path, name: &str) -> Result<()> {
    if dir.exists()
        && dir
            .read_dir()
            .with_context(|| format!("Failed to read {}", dir.display()))?
            .next()
            .is_some()
    {
        bail!(
            "The directory {name} already exists and is not empty. \
             Please choose a different directory or delete the existing one."
        );
    }

    Ok(())
}

/// Removes the target directory unless disarmed first. Armed drops announce
/// the cleanup and ignore whether the removal itself succeeds.
struct CleanupGuard<'a> {
    target: &'a Path,
    armed: bool,
}

impl<'a> CleanupGuard<'a> {
    fn new(target: &'a Path) -> Self {
        CleanupGuard {
            target,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("An error occurred during installation. Cleaning up...");
            let _ = fs_extra::dir::remove(self.target);
        }
    }
}

/// Interactive session plus the provisioning pipeline. Any failure after
/// this point tears the target directory back down.
pub fn run(
    target_dir: &Path,
    target_name: &str,
    store: &PreferencesStore,
    stored: &StoredPreferences,
) -> Result<()> {
    greet(target_dir);

    let mut guard = CleanupGuard::new(target_dir);

    let answers = prompts::collect(stored)?;

    if !prompts::confirm_install()? {
        guard.disarm();
        println!(
            "\n{}",
            "Installation cancelled by the user. Exiting..."
                .if_supports_color(Stream::Stdout, |s| s.yellow())
        );
        return Ok(());
    }

    println!(
        "\n🚀 {}",
        "Setting up your WordPress project...".if_supports_color(Stream::Stdout, |s| s.cyan())
    );
    println!(
        "\n{}\n",
        "This may take just a few minutes. Please wait..."
            .if_supports_color(Stream::Stdout, |s| s.cyan())
    );

    provision(target_dir, &answers, stored, store)?;
    guard.disarm();

    farewell(target_name);

    Ok(())
}

fn provision(
    target_dir: &Path,
    answers: &AnswerSet,
    stored: &StoredPreferences,
    store: &PreferencesStore,
) -> Result<()> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let target = target_dir.display().to_string();

    step(
        "Cloning the repository...",
        "Repository cloned successfully!",
        "Failed to clone the repository.",
        || shell::run("git", &["clone", TEMPLATE_REPO_URL, &target], &cwd),
    )?;

    step(
        "Installing scaffolder dependencies...",
        "Scaffolder dependencies installed successfully!",
        "Failed to install scaffolder dependencies.",
        || shell::run("npm", &["install"], &cwd),
    )?;

    let config_file = target_dir.join(CONFIG_FILE);
    if config_file.exists() {
        let contents = fs::read_to_string(&config_file)
            .with_context(|| format!("Failed to read {}", config_file.display()))?;
        let patched = replacer::patch_config(&contents, answers, &stored.recommended_plugins)?;
        fs::write(&config_file, patched)
            .with_context(|| format!("Failed to write {}", config_file.display()))?;
    }

    if answers.save_config {
        store.save(&stored.with_answers(answers))?;
    }

    step(
        "Installing project dependencies...",
        "Project dependencies installed successfully!",
        "Failed to install project dependencies.",
        || shell::run("npm", &["install"], target_dir),
    )?;

    step(
        "Installing WordPress...",
        "WordPress installed successfully!",
        "Failed to install WordPress.",
        || shell::run("npm", &["run", "wpinstall"], target_dir),
    )?;

    Ok(())
}

fn step(
    running: &str,
    done: &str,
    failed: &str,
    action: impl FnOnce() -> Result<()>,
) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(running.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = action();
    spinner.finish_and_clear();

    match outcome {
        Ok(()) => {
            println!(
                "{} {done}",
                "✓".if_supports_color(Stream::Stdout, |s| s
                    .style(Style::new().bold().green()))
            );
            Ok(())
        }
        Err(error) => {
            eprintln!(
                "{} {failed}",
                "✗".if_supports_color(Stream::Stderr, |s| s.style(Style::new().bold().red()))
            );
            Err(error)
        }
    }
}

fn greet(target_dir: &Path) {
    println!(
        "\n🚀 {}\n",
        "WELCOME TO THE WPSTARTER INSTALLER"
            .if_supports_color(Stream::Stdout, |s| s.style(Style::new().bold().green()))
    );
    println!("We'll be installing the new site in the following directory:");
    println!(
        "{}",
        format!(">> {}", target_dir.display()).if_supports_color(Stream::Stdout, |s| s.yellow())
    );
    println!("\nPress Ctrl+C to stop.\n");
}

fn farewell(target_name: &str) {
    println!(
        "\n🎉 {}\n",
        "Your WordPress project has been successfully set up and is ready to go!"
            .if_supports_color(Stream::Stdout, |s| s.style(Style::new().bold().green()))
    );
    println!("To start the development server, navigate to your project directory:");
    println!(
        "{}\n",
        format!(">> cd {target_name}").if_supports_color(Stream::Stdout, |s| s.yellow())
    );
    println!("And run the following command:");
    println!(
        "{}\n",
        ">> npm run dev".if_supports_color(Stream::Stdout, |s| s.yellow())
    );
    println!(
        "{}\n",
        "Happy coding! 🚀".if_supports_color(Stream::Stdout, |s| s.magenta())
    );
}
