//! List the templates available to the renderer.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::MatrixConfig;
use crate::view::View;

/// Command to list registered templates.
///
/// Built-in templates are listed alongside any overrides found in the
/// templates directory; overridden built-ins are marked.
#[derive(Args, Debug)]
pub struct TemplatesCommand {
    /// Directory of template overrides
    #[arg(short = 't', long)]
    templates: Option<PathBuf>,
}

impl TemplatesCommand {
    /// Print every registered template name.
    ///
    /// # Errors
    ///
    /// Returns an error if a template in the overrides directory fails to parse.
    pub fn execute(self, config: &MatrixConfig) -> Result<()> {
        for line in self.listing(config)? {
            println!("{line}");
        }
        Ok(())
    }

    fn listing(&self, config: &MatrixConfig) -> Result<Vec<String>> {
        let templates_dir = self.templates.as_deref().or(config.templates_dir.as_deref());
        let view = View::with_templates_dir(config.namespace.clone(), templates_dir)?;

        let lines = view
            .template_names()
            .into_iter()
            .map(|name| {
                match (View::is_builtin(&name), templates_dir.is_some_and(|dir| overrides(dir, &name))) {
                    (true, true) => format!("{} {}", name.green(), "(overridden)".yellow()),
                    (true, false) => format!("{} {}", name.green(), "(built-in)".dimmed()),
                    (false, _) => format!("{} {}", name.cyan(), "(custom)".dimmed()),
                }
            })
            .collect();

        Ok(lines)
    }
}

fn overrides(dir: &std::path::Path, name: &str) -> bool {
    dir.join(name).is_file()
}
