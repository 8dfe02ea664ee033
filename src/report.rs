/*!
 * Reporting functionality for ctxmd
 *
 * Renders a console summary of a run using the tabled library. Token counts
 * are a rough per-extension character heuristic and are informational only.
 */

use std::collections::HashMap;
use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::utils::estimate_tokens;

/// Per-extension tallies
#[derive(Debug, Clone, Default)]
pub struct ExtensionStat {
    /// Number of embedded files with this extension
    pub files: usize,
    /// Total characters embedded
    pub chars: usize,
    /// Estimated token count
    pub tokens: usize,
}

/// Accumulator for one run; mutated once per processed file and printed at
/// the end, never persisted
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    /// Files listed in the directory tree
    pub files_listed: usize,
    /// Files whose content was embedded
    pub files_embedded: usize,
    /// Files replaced by a size-ceiling placeholder
    pub files_skipped_size: usize,
    /// Files replaced by a read-error placeholder
    pub files_errored: usize,
    /// Blank files
    pub files_empty: usize,
    /// Total bytes of all listed files
    pub total_bytes: u64,
    /// Total characters embedded
    pub total_chars: usize,
    /// Tallies keyed by dot-prefixed extension ("" for extensionless)
    pub per_extension: HashMap<String, ExtensionStat>,
}

impl RunStatistics {
    pub fn record_listed(&mut self, size: u64) {
        self.files_listed += 1;
        self.total_bytes += size;
    }

    pub fn record_embedded(&mut self, ext: &str, chars: usize) {
        self.files_embedded += 1;
        self.total_chars += chars;

        let entry = self.per_extension.entry(ext.to_string()).or_default();
        entry.files += 1;
        entry.chars += chars;
        entry.tokens += estimate_tokens(ext, chars);
    }

    pub fn record_empty(&mut self) {
        self.files_embedded += 1;
        self.files_empty += 1;
    }

    pub fn record_size_skip(&mut self) {
        self.files_skipped_size += 1;
    }

    pub fn record_read_error(&mut self) {
        self.files_errored += 1;
    }

    /// Estimated token total across all extensions
    pub fn estimated_tokens(&self) -> usize {
        self.per_extension.values().map(|s| s.tokens).sum()
    }
}

/// Statistics for a completed run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Time taken for scan plus write
    pub duration: Duration,
    /// Accumulated run statistics
    pub stats: RunStatistics,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
    // Other formats could be added in the future
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

/// How many extensions the breakdown table shows at most
const TOP_EXTENSIONS: usize = 10;

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string based on run statistics
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.stats;
        let mut rows = Vec::new();

        rows.push(SummaryRow {
            key: "📂 Output File".to_string(),
            value: report.output_file.clone(),
        });

        rows.push(SummaryRow {
            key: "⏱️ Process Time".to_string(),
            value: format!("{:.4?}", report.duration),
        });

        rows.push(SummaryRow {
            key: "📄 Files Listed".to_string(),
            value: self.format_number(stats.files_listed),
        });

        rows.push(SummaryRow {
            key: "📝 Files Embedded".to_string(),
            value: self.format_number(stats.files_embedded),
        });

        if stats.files_skipped_size > 0 {
            rows.push(SummaryRow {
                key: "⏭️ Size Skips".to_string(),
                value: self.format_number(stats.files_skipped_size),
            });
        }

        if stats.files_errored > 0 {
            rows.push(SummaryRow {
                key: "⚠️ Read Errors".to_string(),
                value: self.format_number(stats.files_errored),
            });
        }

        rows.push(SummaryRow {
            key: "💾 Total Size".to_string(),
            value: crate::utils::format_file_size(stats.total_bytes),
        });

        rows.push(SummaryRow {
            key: "📦 LLM Tokens".to_string(),
            value: format!(
                "{} tokens (estimated)",
                self.format_number(stats.estimated_tokens())
            ),
        });

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Create the per-extension breakdown table
    fn create_extensions_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct ExtensionRow {
            #[tabled(rename = "Extension")]
            extension: String,

            #[tabled(rename = "Files")]
            files: String,

            #[tabled(rename = "Chars")]
            chars: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        // Sort extensions by estimated token volume, largest first
        let mut extensions: Vec<_> = report.stats.per_extension.iter().collect();
        extensions.sort_by(|(_, a), (_, b)| b.tokens.cmp(&a.tokens));
        extensions.truncate(TOP_EXTENSIONS);

        let rows: Vec<ExtensionRow> = extensions
            .iter()
            .map(|(ext, stat)| ExtensionRow {
                extension: if ext.is_empty() {
                    "(none)".to_string()
                } else {
                    ext.to_string()
                },
                files: self.format_number(stat.files),
                chars: self.format_number(stat.chars),
                tokens: self.format_number(stat.tokens),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Generate a console table report
    fn generate_console_report(&self, report: &ScanReport) -> String {
        let summary_table = self.create_summary_table(report);

        let extensions_title = if report.stats.per_extension.len() > TOP_EXTENSIONS {
            "📋  TOP 10 EXTENSIONS BY ESTIMATED TOKENS"
        } else {
            "📋  EXTENSIONS BY ESTIMATED TOKENS"
        };

        if report.stats.per_extension.is_empty() {
            return format!("✅  CONTEXT GENERATED\n{}", summary_table);
        }

        let extensions_table = self.create_extensions_table(report);
        format!(
            "{}\n{}\n\n✅  CONTEXT GENERATED\n{}",
            extensions_title, extensions_table, summary_table
        )
    }
}
