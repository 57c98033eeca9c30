//! Install-script generation.
//!
//! Selected catalog entries are rendered into a platform-specific script
//! that the user reviews and runs themselves; nothing is ever executed
//! directly. Package names pass through escaping filters and every install
//! command is validated against shell metacharacters before rendering, so a
//! hostile registry record cannot smuggle extra commands into the output.

use std::borrow::Cow;

use chrono::Utc;
use minijinja::{context, Environment};
use shell_escape::escape;

use crate::data::CatalogEntry;
use crate::errors::{CatalogError, Result};

/// Script formats for the supported platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    /// Unix shell script (.sh) for Linux and macOS
    Shell,
    /// Windows PowerShell script (.ps1)
    PowerShell,
}

impl ScriptFormat {
    /// Choose the appropriate format for the current platform.
    #[must_use]
    pub fn auto_detect() -> Self {
        if cfg!(windows) {
            ScriptFormat::PowerShell
        } else {
            ScriptFormat::Shell
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ScriptFormat::Shell => "sh",
            ScriptFormat::PowerShell => "ps1",
        }
    }

    fn template_name(self) -> &'static str {
        match self {
            ScriptFormat::Shell => "install.sh",
            ScriptFormat::PowerShell => "install.ps1",
        }
    }
}

/// Template-based script generator with escaping filters.
pub struct ScriptGenerator {
    env: Environment<'static>,
}

impl ScriptGenerator {
    /// Create a generator with the built-in templates and escaping filters.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("install.sh", include_str!("../templates/install.sh.j2"))?;
        env.add_template("install.ps1", include_str!("../templates/install.ps1.j2"))?;
        env.add_filter("shell_escape", |value: String| {
            escape(Cow::Owned(value)).into_owned()
        });
        env.add_filter("powershell_escape", escape_powershell_arg);
        Ok(Self { env })
    }

    /// Render an install script for the given entries.
    pub fn install_script(
        &self,
        entries: &[CatalogEntry],
        format: ScriptFormat,
    ) -> Result<String> {
        for entry in entries {
            if !is_safe_install_command(&entry.install_command) {
                return Err(CatalogError::invalid_record(format!(
                    "Install command for '{}' contains dangerous characters",
                    entry.id
                )));
            }
        }
        let template = self.env.get_template(format.template_name())?;
        let rendered = template.render(context! {
            entries => entries,
            timestamp => Utc::now().to_rfc3339(),
            version => env!("CARGO_PKG_VERSION"),
            package_count => entries.len(),
        })?;
        Ok(rendered)
    }

    /// Timestamped output filename, e.g. `brewdeck_install_20260830_120301.sh`.
    #[must_use]
    pub fn filename(prefix: &str, format: ScriptFormat) -> String {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        format!("{}_{}.{}", prefix, timestamp, format.extension())
    }
}

/// Single-quote an argument for PowerShell, doubling embedded quotes.
fn escape_powershell_arg(arg: String) -> String {
    format!("'{}'", arg.replace('\'', "''"))
}

/// Reject commands that could break out of their own line in a script.
fn is_safe_install_command(command: &str) -> bool {
    let dangerous = &[
        "$(", "`", ";", "|", "&&", "||", ">", "<", "../", "..\\",
    ];
    if dangerous.iter().any(|pattern| command.contains(pattern)) {
        return false;
    }
    !command.chars().any(|c| c.is_control())
}
