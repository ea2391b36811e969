//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_s;

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The path or document the finding is about.
    pub target: String,
    pub reason: String,
}

/// Findings grouped by check, split into errors and warnings.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: BTreeMap<&'static str, Vec<Finding>>,
    pub warnings: BTreeMap<&'static str, Vec<Finding>>,
}

impl ValidationReport {
    pub fn add_error(&mut self, check: &'static str, target: impl Into<String>, reason: impl Into<String>) {
        self.errors.entry(check).or_default().push(Finding {
            target: target.into(),
            reason: reason.into(),
        });
    }

    pub fn add_warning(
        &mut self,
        check: &'static str,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.warnings.entry(check).or_default().push(Finding {
            target: target.into(),
            reason: reason.into(),
        });
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.values().map(Vec::len).sum()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Print the full report to stderr (warnings, then errors).
    pub fn print(&self) {
        for (check, findings) in &self.warnings {
            print_section(check, findings, false);
        }
        for (check, findings) in &self.errors {
            print_section(check, findings, true);
        }
    }
}

fn print_section(check: &str, findings: &[Finding], is_error: bool) {
    eprintln!();
    let count = format!("({} issue{})", findings.len(), plural_s(findings.len()));
    if is_error {
        eprintln!("{} {}", check.red().bold(), count.dimmed());
    } else {
        eprintln!("{} {}", check.yellow().bold(), count.dimmed());
    }

    for finding in findings {
        let arrow = if is_error { "→".red().to_string() } else { "→".yellow().to_string() };
        eprintln!("{} {} {}", arrow, finding.target.cyan(), finding.reason);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.error_count();
        let warnings = self.warning_count();

        match (errors, warnings) {
            (0, 0) => write!(f, "{}", "all checks passed".green()),
            (0, w) => write!(
                f,
                "{} {}",
                "passed with".dimmed(),
                format!("{w} warning{}", plural_s(w)).yellow()
            ),
            (e, _) => write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                e.to_string().red().bold(),
                format!("error{}", plural_s(e)).dimmed()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut report = ValidationReport::default();
        assert!(!report.has_errors());

        report.add_warning("orphans", "/contact", "no Spanish page");
        report.add_error("xml", "/sitemap.xml", "unclosed tag");
        report.add_error("xml", "/sitemap-en.xml", "unclosed tag");

        assert!(report.has_errors());
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.errors["xml"][1].target, "/sitemap-en.xml");
    }

    #[test]
    fn test_display_summary() {
        let mut report = ValidationReport::default();
        assert!(report.to_string().contains("all checks passed"));

        report.add_warning("orphans", "/contact", "no Spanish page");
        assert!(report.to_string().contains("1 warning"));

        report.add_error("entries", "", "path is empty");
        let summary = report.to_string();
        assert!(summary.contains("found"));
        assert!(!summary.contains("warning"));
    }
}
