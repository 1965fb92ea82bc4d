use colored::Colorize;

use super::driver::Failure;

/// Formats per-input failures as `<file>: error: <message>`.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, failures: &[Failure]) -> String {
        failures
            .iter()
            .map(|failure| self.format_failure(failure))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_failure(&self, failure: &Failure) -> String {
        format!(
            "{}: {}: {}",
            self.format_file(&failure.file),
            self.format_category(),
            failure.message
        )
    }

    pub fn format_summary(&self, failed: usize, total: usize) -> String {
        let summary = format!("{failed} of {total} inputs failed");
        if self.color {
            summary.red().to_string()
        } else {
            summary
        }
    }

    fn format_file(&self, file: &str) -> String {
        if self.color {
            file.bold().to_string()
        } else {
            file.to_string()
        }
    }

    fn format_category(&self) -> String {
        if self.color {
            "error".red().bold().to_string()
        } else {
            "error".to_string()
        }
    }
}
