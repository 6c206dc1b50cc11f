use crate::config::{GcliConfig, OutputFormat};

pub const DEFAULT_URL: &str = "http://localhost:8090";

/// Values supplied on the command line (or through their environment
/// variables). `None` means the user did not set it.
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub url: Option<String>,
    pub metalake: Option<String>,
    pub ignore_versions: bool,
    pub output: Option<OutputFormat>,
    pub quiet: bool,
}

/// Immutable connection and presentation parameters for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub url: String,
    pub metalake: Option<String>,
    pub ignore_versions: bool,
    pub output: OutputFormat,
    pub quiet: bool,
}

impl Settings {
    /// Flags win over the config file, the config file wins over defaults.
    pub fn resolve(overrides: SettingsOverrides, file: Option<GcliConfig>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            url: non_empty(overrides.url)
                .or(non_empty(file.url))
                .unwrap_or_else(|| DEFAULT_URL.to_string()),
            metalake: non_empty(overrides.metalake).or(non_empty(file.metalake)),
            ignore_versions: overrides.ignore_versions || file.ignore.unwrap_or(false),
            output: overrides.output.or(file.output).unwrap_or_default(),
            quiet: overrides.quiet,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
