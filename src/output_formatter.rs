use crate::config::Config;
use crate::errors::Result;
use crate::stats::Summary;
use serde::Serialize;
use std::io::Write;

/// Defines the possible output formats for the run summary.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// A simple, human-readable text format.
    #[default]
    Text,
    /// JSON format, suitable for machine processing.
    Json,
}

/// Handles the formatting of the run banner and the final summary.
pub struct OutputFormatter {
    format: OutputFormat,
    tool_name: String,
    tool_version: String,
}

impl OutputFormatter {
    /// Creates a new `OutputFormatter`.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Writes the settings of the run before it starts. JSON output has no banner.
    pub fn write_banner<W: Write>(&self, writer: &mut W, config: &Config) -> Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }
        writeln!(writer, "Starting replacement:")?;
        writeln!(writer, "  Directory   : {}", config.root().display())?;
        writeln!(writer, "  Search      : '{}'", config.search())?;
        writeln!(writer, "  Replacement : '{}'", config.replacement())?;
        writeln!(writer, "  Workers     : {}", config.workers())?;
        writeln!(writer, "  Dry run     : {}", config.dry_run())?;
        writeln!(writer)?;
        Ok(())
    }

    /// Writes the final summary of a run.
    pub fn write_summary<W: Write>(
        &self,
        writer: &mut W,
        summary: &Summary,
        dry_run: bool,
    ) -> Result<()> {
        let output = match self.format {
            OutputFormat::Text => self.format_text(summary, dry_run),
            OutputFormat::Json => self.format_json(summary, dry_run)?,
        };
        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn format_text(&self, summary: &Summary, dry_run: bool) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", "-".repeat(50)));
        output.push_str(&format!("Files found     : {}\n", summary.files_found));
        output.push_str(&format!("Files processed : {}\n", summary.files_processed));
        output.push_str(&format!("Files matched   : {}\n", summary.files_matched));
        output.push_str(&format!("Total matches   : {}\n", summary.matches));
        output.push_str(&format!("Errors          : {}\n", summary.errors));
        if dry_run {
            output.push_str("\nDry run: no files were modified. Run without --dry-run to apply.\n");
        }
        output
    }

    fn format_json(&self, summary: &Summary, dry_run: bool) -> Result<String> {
        #[derive(Serialize)]
        struct JsonOutput<'a> {
            tool: ToolInfo<'a>,
            dry_run: bool,
            #[serde(flatten)]
            summary: &'a Summary,
        }

        #[derive(Serialize)]
        struct ToolInfo<'a> {
            name: &'a str,
            version: &'a str,
        }

        let output = JsonOutput {
            tool: ToolInfo {
                name: &self.tool_name,
                version: &self.tool_version,
            },
            dry_run,
            summary,
        };

        let mut json = serde_json::to_string_pretty(&output)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn summary() -> Summary {
        Summary {
            files_found: 3,
            files_processed: 3,
            files_matched: 1,
            matches: 2,
            errors: 0,
        }
    }

    #[test]
    fn test_text_summary_mentions_dry_run() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let mut out = Vec::new();
        formatter.write_summary(&mut out, &summary(), true).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Files found     : 3"));
        assert!(text.contains("Total matches   : 2"));
        assert!(text.contains("no files were modified"));
    }

    #[test]
    fn test_json_summary_is_flat() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let mut out = Vec::new();
        formatter.write_summary(&mut out, &summary(), false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["tool"]["name"], "restr");
        assert_eq!(value["dry_run"], false);
        assert_eq!(value["files_found"], 3);
        assert_eq!(value["files_matched"], 1);
        assert_eq!(value["matches"], 2);
        assert_eq!(value["errors"], 0);
    }

    #[test]
    fn test_json_has_no_banner() {
        let config = Config::new(Path::new("."), "a", "b", 2, false, false).unwrap();
        let mut out = Vec::new();
        OutputFormatter::new(OutputFormat::Json)
            .write_banner(&mut out, &config)
            .unwrap();
        assert!(out.is_empty());

        OutputFormatter::new(OutputFormat::Text)
            .write_banner(&mut out, &config)
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Workers     : 2"));
    }
}
