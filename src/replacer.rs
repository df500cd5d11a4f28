use anyhow::Result;
use regex::{NoExpand, Regex};

use crate::{config::Plugin, prompts::AnswerSet};

/// Rewrites the template's `config.js` assignments with this session's
/// answers. Lines that do not match any pattern are left untouched, and the
/// answers are spliced in verbatim.
pub fn patch_config(contents: &str, answers: &AnswerSet, catalog: &[Plugin]) -> Result<String> {
    let plugin_list = selected_slugs(catalog, &answers.plugins)
        .iter()
        .map(|slug| format!("'{slug}'"))
        .collect::<Vec<_>>()
        .join(",");

    let substitutions: [(&str, String); 11] = [
        (
            r"config\.site\.title = '.*';",
            format!("config.site.title = '{}';", answers.site_title),
        ),
        (
            r"config\.site\.blogdescription = '.*';",
            format!(
                "config.site.blogdescription = '{}';",
                answers.blog_description
            ),
        ),
        (
            r"config\.site\.theme_name = '.*';",
            format!("config.site.theme_name = '{}';", answers.theme_name),
        ),
        (
            r"config\.database\.dbname = '.*';",
            format!("config.database.dbname = '{}';", answers.db_name),
        ),
        (
            r"config\.database\.dbuser = '.*';",
            format!("config.database.dbuser = '{}';", answers.db_user),
        ),
        (
            r"config\.database\.dbpass = '.*';",
            format!("config.database.dbpass = '{}';", answers.db_pass),
        ),
        (
            r"config\.database\.dbhost = '.*';",
            format!("config.database.dbhost = '{}';", answers.db_host),
        ),
        (
            r"config\.site\.admin_user = '.*';",
            format!("config.site.admin_user = '{}';", answers.admin_user),
        ),
        (
            r"config\.site\.admin_password = '.*';",
            format!("config.site.admin_password = '{}';", answers.admin_password),
        ),
        (
            r"config\.site\.admin_email = '.*';",
            format!("config.site.admin_email = '{}';", answers.admin_email),
        ),
        (
            r"(?s)config\.plugins = \[.*\];",
            format!("config.plugins = [{plugin_list}];"),
        ),
    ];

    let mut patched = contents.to_owned();
    for (pattern, replacement) in substitutions {
        patched = Regex::new(pattern)?
            .replace(&patched, NoExpand(&replacement))
            .into_owned();
    }

    Ok(patched)
}

/// Slugs of the selected plugins, in catalog order.
#[must_use]
pub fn selected_slugs<'c>(catalog: &'c [Plugin], selected: &[String]) -> Vec<&'c str> {
    catalog
        .iter()
        .filter(|plugin| selected.contains(&plugin.name))
        .map(|plugin| plugin.slug.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Plugin> {
        [
            ("Yoast SEO", "wordpress-seo"),
            ("Jetpack", "jetpack"),
            ("WooCommerce", "woocommerce"),
        ]
        .into_iter()
        .map(|(name, slug)| Plugin {
            name: name.to_owned(),
            slug: slug.to_owned(),
            enabled: false,
        })
        .collect()
    }

    fn answers() -> AnswerSet {
        AnswerSet {
            site_title: "My Site".into(),
            blog_description: "Just another WordPress site".into(),
            theme_name: "WPStarter".into(),
            db_name: "site1".into(),
            db_user: "root".into(),
            db_pass: "hunter2".into(),
            db_host: "localhost".into(),
            admin_user: "admin".into(),
            admin_password: "changeme".into(),
            admin_email: "admin@example.com".into(),
            plugins: vec![],
            save_config: false,
        }
    }

    const TEMPLATE: &str = "\
config.site.title = 'Placeholder';
config.site.blogdescription = 'Placeholder';
config.site.theme_name = 'placeholder';
config.database.dbname = 'placeholder';
config.database.dbuser = 'placeholder';
config.database.dbpass = 'placeholder';
config.database.dbhost = 'placeholder';
config.site.admin_user = 'placeholder';
config.site.admin_password = 'placeholder';
config.site.admin_email = 'placeholder@example.com';
config.plugins = ['placeholder'];
";

    #[test]
    fn patches_every_assignment() {
        let patched = patch_config(TEMPLATE, &answers(), &catalog()).unwrap();

        assert!(patched.contains("config.site.title = 'My Site';"));
        assert!(patched.contains("config.database.dbname = 'site1';"));
        assert!(patched.contains("config.database.dbhost = 'localhost';"));
        assert!(patched.contains("config.site.admin_email = 'admin@example.com';"));
        assert!(!patched.contains("placeholder"));
    }

    #[test]
    fn selected_plugins_become_a_slug_list() {
        let mut answers = answers();
        answers.plugins = vec!["Yoast SEO".into()];

        let patched = patch_config(TEMPLATE, &answers, &catalog()).unwrap();

        assert!(patched.contains("config.plugins = ['wordpress-seo'];"));
    }

    #[test]
    fn empty_selection_empties_the_plugin_array() {
        let patched = patch_config(TEMPLATE, &answers(), &catalog()).unwrap();

        assert!(patched.contains("config.plugins = [];"));
    }

    #[test]
    fn slug_list_keeps_catalog_order() {
        let catalog = catalog();
        let selected = vec!["WooCommerce".to_owned(), "Yoast SEO".to_owned()];

        let slugs = selected_slugs(&catalog, &selected);

        assert_eq!(slugs, ["wordpress-seo", "woocommerce"]);
    }

    #[test]
    fn unknown_selection_is_skipped() {
        let selected = vec!["Jetpack".to_owned(), "Not In Catalog".to_owned()];

        assert_eq!(selected_slugs(&catalog(), &selected), ["jetpack"]);
    }

    #[test]
    fn answers_are_spliced_verbatim() {
        let mut answers = answers();
        answers.db_pass = "pa$w0rd$1".into();

        let patched = patch_config(TEMPLATE, &answers, &catalog()).unwrap();

        assert!(patched.contains("config.database.dbpass = 'pa$w0rd$1';"));
    }

    #[test]
    fn absent_assignments_are_left_alone() {
        let contents = "config.site.title = 'Placeholder';\nconfig.custom = 42;\n";

        let patched = patch_config(contents, &answers(), &catalog()).unwrap();

        assert!(patched.contains("config.site.title = 'My Site';"));
        assert!(patched.contains("config.custom = 42;"));
    }

    #[test]
    fn multiline_plugin_array_collapses() {
        let contents = "config.plugins = [\n    'one',\n    'two',\n];\n";
        let mut answers = answers();
        answers.plugins = vec!["Jetpack".into()];

        let patched = patch_config(contents, &answers, &catalog()).unwrap();

        assert_eq!(patched, "config.plugins = ['jetpack'];\n");
    }
}
