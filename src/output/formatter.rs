//! Output formatters for ranking reports

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::RankingReport;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering ranking reports
pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console table with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    show_failures: bool,
}

/// JSON formatter for machine consumers
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    show_failures: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, show_failures: bool) -> Self {
        Self { use_colors, show_failures }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n# {}\n", title)
        }
    }

    fn score_color(score: f64) -> Color {
        match score {
            s if s >= 60.0 => Color::Green,
            s if s >= 30.0 => Color::Yellow,
            s if s > 0.0 => Color::BrightRed,
            _ => Color::BrightBlack,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("Screening results for {}", report.job_description)));
        output.push_str(&format!(
            "Generated: {} | Strategy: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.strategy
        ));
        if let Some(sentences) = report.summary_sentences {
            output.push_str(&format!(" | Summary: first {} sentences", sentences));
        }
        output.push('\n');

        if let Some(error) = &report.error {
            output.push_str(&format!("{} {}\n", self.colorize("Error:", Color::Red), error));
            return Ok(output);
        }

        if report.results.is_empty() {
            output.push_str("No resumes matched.\n");
        } else {
            let name_width = report
                .results
                .iter()
                .map(|r| r.filename.chars().count())
                .max()
                .unwrap_or(0)
                .max("Resume".len());

            output.push_str(&format!("\n{:>4}  {:<width$}  {:>7}\n", "Rank", "Resume", "Score", width = name_width));
            output.push_str(&format!("{}\n", "-".repeat(4 + 2 + name_width + 2 + 7)));
            for result in &report.results {
                let score = format!("{:>6.2}%", result.score);
                output.push_str(&format!(
                    "{:>4}  {:<width$}  {}\n",
                    result.rank,
                    result.filename,
                    self.colorize(&score, Self::score_color(result.score)),
                    width = name_width
                ));
            }
        }

        output.push_str(&format!(
            "\n{} of {} resumes ranked\n",
            report.results.len(),
            report.resumes_considered
        ));

        if self.show_failures && !report.failures.is_empty() {
            output.push_str(&format!("\n{}\n", self.colorize("Could not parse:", Color::Yellow)));
            for failure in &report.failures {
                output.push_str(&format!("  • {}: {}\n", failure.filename, failure.reason));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(show_failures: bool) -> Self {
        Self { show_failures }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("# Screening Results for {}\n\n", report.job_description));
        output.push_str(&format!(
            "*Generated {} with the `{}` strategy*\n\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.strategy
        ));

        if let Some(error) = &report.error {
            output.push_str(&format!("> **Error:** {}\n", error));
            return Ok(output);
        }

        output.push_str("| Rank | Resume | Score |\n");
        output.push_str("|-----:|--------|------:|\n");
        for result in &report.results {
            output.push_str(&format!(
                "| {} | {} | {:.2}% |\n",
                result.rank,
                Self::escape_cell(&result.filename),
                result.score
            ));
        }

        if self.show_failures && !report.failures.is_empty() {
            output.push_str("\n## Could not parse\n\n");
            for failure in &report.failures {
                output.push_str(&format!("- `{}`: {}\n", failure.filename, failure.reason));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true)
    }

    pub fn with_options(use_colors: bool, show_failures: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, show_failures),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(show_failures),
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content).map_err(|e| {
        ScreenerError::OutputFormatting(format!("Failed to write {}: {}", file_path.display(), e))
    })
}

pub fn suggest_filename(format: &OutputFormat, job_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(job_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_ranking{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_ranking{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_ranking{}.md", base_name, timestamp_suffix),
    }
}
