use crate::artifacts::core::error::DispatchError;
use crate::artifacts::diff::html::escape_html;
use crate::artifacts::results::diff_result::DiffResult;
use crate::artifacts::results::status_filter::StatusFilter;
use colored::Colorize;
use serde_json::json;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

const PAGE_STYLE: &str = "\
table.diff {font-family: Courier, monospace; border: medium;}
.diff_header {background-color: #e0e0e0;}
td.diff_header {text-align: right;}
.diff_add {background-color: #aaffaa;}
.diff_chg {background-color: #ffff77;}
.diff_sub {background-color: #ffaaaa;}
tr.diff_changed td {border-left: 2px solid #d0d0d0;}
.error {color: #b00020;}";

/// Prints comparison results in one of the output formats.
pub struct Reporter<'w> {
    writer: &'w mut dyn Write,
    format: OutputFormat,
    filter: StatusFilter,
}

impl<'w> Reporter<'w> {
    pub fn new(writer: &'w mut dyn Write, format: OutputFormat, filter: StatusFilter) -> Self {
        Reporter {
            writer,
            format,
            filter,
        }
    }

    pub fn write_results(&mut self, results: &[DiffResult]) -> anyhow::Result<()> {
        let selected = results
            .iter()
            .filter(|result| self.filter.matches(result))
            .collect::<Vec<_>>();

        match self.format {
            OutputFormat::Text => self.write_text(&selected)?,
            OutputFormat::Json => {
                let document = json!({ "diffs": selected });
                writeln!(self.writer, "{}", serde_json::to_string_pretty(&document)?)?;
            }
            OutputFormat::Html => self.write_page(&selected)?,
        }

        Ok(())
    }

    pub fn write_error(&mut self, error: &DispatchError) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let document = json!({ "error": error.to_string(), "kind": error.kind() });
                writeln!(self.writer, "{}", serde_json::to_string_pretty(&document)?)?;
            }
            _ => writeln!(self.writer, "{}", format!("error: {error}").red())?,
        }

        Ok(())
    }

    fn write_text(&mut self, results: &[&DiffResult]) -> anyhow::Result<()> {
        for result in results {
            match result {
                DiffResult::Errored { file, error } => {
                    writeln!(self.writer, "{}", format!("{file}: {error}").red())?
                }
                DiffResult::UniqueLeft { file, diff: None } => {
                    writeln!(self.writer, "{}", format!("Only in left: {file}").bold())?
                }
                DiffResult::UniqueRight { file, diff: None } => {
                    writeln!(self.writer, "{}", format!("Only in right: {file}").bold())?
                }
                _ => {
                    if let Some(diff) = result.diff() {
                        self.write_diff(diff)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn write_diff(&mut self, diff: &str) -> anyhow::Result<()> {
        for line in diff.lines() {
            if line.starts_with("---") || line.starts_with("+++") {
                writeln!(self.writer, "{}", line.bold())?;
            } else if line.starts_with("@@") {
                writeln!(self.writer, "{}", line.cyan())?;
            } else if line.starts_with('-') {
                writeln!(self.writer, "{}", line.red())?;
            } else if line.starts_with('+') {
                writeln!(self.writer, "{}", line.green())?;
            } else {
                writeln!(self.writer, "{line}")?;
            }
        }

        Ok(())
    }

    fn write_page(&mut self, results: &[&DiffResult]) -> anyhow::Result<()> {
        writeln!(self.writer, "<!DOCTYPE html>")?;
        writeln!(self.writer, "<html>\n<head>\n<meta charset=\"utf-8\">")?;
        writeln!(self.writer, "<title>litediff</title>")?;
        writeln!(self.writer, "<style>\n{PAGE_STYLE}\n</style>\n</head>\n<body>")?;

        for result in results {
            writeln!(self.writer, "<h2>{}</h2>", escape_html(result.file()))?;
            match result {
                DiffResult::Errored { error, .. } => {
                    writeln!(self.writer, "<p class=\"error\">{}</p>", escape_html(error))?
                }
                DiffResult::UniqueLeft { diff: None, .. } => {
                    writeln!(self.writer, "<p>Only in left</p>")?
                }
                DiffResult::UniqueRight { diff: None, .. } => {
                    writeln!(self.writer, "<p>Only in right</p>")?
                }
                _ => match result.diff() {
                    Some(diff) if diff.starts_with("<table") => write!(self.writer, "{diff}")?,
                    Some(diff) => writeln!(self.writer, "<pre>{}</pre>", escape_html(diff))?,
                    None => {}
                },
            }
        }

        writeln!(self.writer, "</body>\n</html>")?;
        Ok(())
    }
}
