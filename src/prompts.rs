use anyhow::Result;
use inquire::{Confirm, MultiSelect, Password, PasswordDisplayMode, Text};

use crate::config::{Plugin, StoredPreferences};

/// Everything the interactive session collects.
#[derive(Debug, Clone)]
pub struct AnswerSet {
    pub site_title: String,
    pub blog_description: String,
    pub theme_name: String,
    pub db_name: String,
    pub db_user: String,
    pub db_pass: String,
    pub db_host: String,
    pub admin_user: String,
    pub admin_password: String,
    pub admin_email: String,
    pub plugins: Vec<String>,
    pub save_config: bool,
}

/// Walks the user through every question, seeding defaults from `stored`.
pub fn collect(stored: &StoredPreferences) -> Result<AnswerSet> {
    let site_title = Text::new("Enter the site title:")
        .with_default("Website Title")
        .prompt()?;
    let blog_description = Text::new("Enter the blog description:")
        .with_default("Just another WordPress site")
        .prompt()?;
    let theme_name = Text::new("Enter the theme name:")
        .with_default("WPStarter")
        .prompt()?;
    let db_name = Text::new("Enter the database name:").prompt()?;
    let db_user = text_prompt("Enter the database user:", &stored.db_user)?;
    let db_pass = password_prompt("Enter the database password:", &stored.db_pass)?;
    let db_host = text_prompt("Enter the database host:", &stored.db_host)?;
    let admin_user = text_prompt("Enter the admin username:", &stored.admin_user)?;
    let admin_password = password_prompt("Enter the admin password:", &stored.admin_password)?;
    let admin_email = text_prompt("Enter the admin email:", &stored.admin_email)?;

    let plugins = select_plugins(&stored.recommended_plugins)?;

    let save_config = Confirm::new("Would you like to save these settings for future projects?")
        .with_default(true)
        .prompt()?;

    Ok(AnswerSet {
        site_title,
        blog_description,
        theme_name,
        db_name,
        db_user,
        db_pass,
        db_host,
        admin_user,
        admin_password,
        admin_email,
        plugins,
        save_config,
    })
}

pub fn confirm_install() -> Result<bool> {
    let proceed = Confirm::new("Are you sure you want to proceed with the installation?")
        .with_default(true)
        .prompt()?;

    Ok(proceed)
}

fn text_prompt(message: &str, stored: &str) -> Result<String> {
    let prompt = Text::new(message);
    let answer = if stored.is_empty() {
        prompt.prompt()?
    } else {
        prompt.with_default(stored).prompt()?
    };

    Ok(answer)
}

/// An empty catalog yields an empty selection without opening a prompt;
/// the selector rejects an empty option list.
fn select_plugins(catalog: &[Plugin]) -> Result<Vec<String>> {
    if catalog.is_empty() {
        return Ok(Vec::new());
    }

    let names: Vec<String> = catalog.iter().map(|plugin| plugin.name.clone()).collect();
    let selected = MultiSelect::new("Select plugins to install:", names)
        .with_default(&preselected(catalog))
        .prompt()?;

    Ok(selected)
}

/// Passwords cannot be shown as prompt defaults. An empty entry keeps the
/// stored value instead.
fn password_prompt(message: &str, stored: &str) -> Result<String> {
    let mut prompt = Password::new(message)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation();

    if !stored.is_empty() {
        prompt = prompt.with_help_message("leave empty to keep the saved value");
    }

    let entered = prompt.prompt()?;
    if entered.is_empty() && !stored.is_empty() {
        return Ok(stored.to_owned());
    }

    Ok(entered)
}

/// Indices of the catalog entries that start out checked.
#[must_use]
pub fn preselected(plugins: &[Plugin]) -> Vec<usize> {
    plugins
        .iter()
        .enumerate()
        .filter_map(|(index, plugin)| plugin.enabled.then_some(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(enabled: [bool; 3]) -> Vec<Plugin> {
        ["Yoast SEO", "Jetpack", "WooCommerce"]
            .into_iter()
            .zip(enabled)
            .map(|(name, enabled)| Plugin {
                name: name.to_owned(),
                slug: name.to_lowercase().replace(' ', "-"),
                enabled,
            })
            .collect()
    }

    #[test]
    fn preselects_enabled_catalog_entries() {
        assert_eq!(preselected(&catalog([true, false, false])), [0]);
    }

    #[test]
    fn stored_jetpack_selection_is_prechecked() {
        assert_eq!(preselected(&catalog([true, true, false])), [0, 1]);
    }

    #[test]
    fn nothing_checked_when_all_disabled() {
        assert!(preselected(&catalog([false, false, false])).is_empty());
    }

    #[test]
    fn empty_catalog_skips_the_selection_prompt() {
        assert!(select_plugins(&[]).unwrap().is_empty());
    }
}
