use common::config::OutputFormat;
use std::io::{self, Write};
use tabled::builder::Builder;
use tabled::settings::Style;

/// What a command produced, before it is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Rows(Rows),
    /// Free-text line confirming a mutation.
    Confirmation(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rows {
    pub header: Vec<String>,
    /// Print the header in plain output too. Table output always shows it.
    pub plain_header: bool,
    pub rows: Vec<Vec<String>>,
}

impl Rows {
    pub fn new(header: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            plain_header: false,
            rows,
        }
    }

    pub fn with_plain_header(mut self) -> Self {
        self.plain_header = true;
        self
    }
}

/// Writes command output in the configured format.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    format: OutputFormat,
    quiet: bool,
}

impl Printer {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn print<W: Write>(&self, output: &CommandOutput, out: &mut W) -> io::Result<()> {
        match output {
            CommandOutput::Confirmation(line) => {
                if !self.quiet {
                    writeln!(out, "{line}")?;
                }
            }
            CommandOutput::Rows(rows) => match self.format {
                OutputFormat::Plain => write_plain(rows, out)?,
                OutputFormat::Table => write_table(rows, out)?,
            },
        }
        out.flush()
    }
}

fn write_plain<W: Write>(rows: &Rows, out: &mut W) -> io::Result<()> {
    if rows.plain_header {
        writeln!(out, "{}", rows.header.join(","))?;
    }
    for row in &rows.rows {
        writeln!(out, "{}", row.join(","))?;
    }
    Ok(())
}

fn write_table<W: Write>(rows: &Rows, out: &mut W) -> io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(rows.header.iter().cloned());
    for row in &rows.rows {
        builder.push_record(row.iter().cloned());
    }
    let mut table = builder.build();
    table.with(Style::ascii());
    writeln!(out, "{table}")
}
