pub mod error;
pub mod loader;
pub mod settings;

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Contents of the optional YAML config file, e.g.
///
/// ```yaml
/// url: http://gravitino.internal:8090
/// metalake: lake1
/// ignore: true
/// output: table
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GcliConfig {
    pub url: Option<String>,
    pub metalake: Option<String>,
    pub ignore: Option<bool>,
    pub output: Option<OutputFormat>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma separated rows.
    #[default]
    Plain,
    /// ASCII box table.
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "table" => Ok(OutputFormat::Table),
            other => Err(format!(
                "unsupported output format '{other}', expected 'plain' or 'table'"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => f.write_str("plain"),
            OutputFormat::Table => f.write_str("table"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("TABLE".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert_eq!("plain".parse::<OutputFormat>(), Ok(OutputFormat::Plain));
        assert!("json".parse::<OutputFormat>().is_err());
    }
}
