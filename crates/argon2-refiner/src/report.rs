//! Report generation for recommendation results.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::result::Recommendation;

/// CSV exporter for ranked recommendations.
///
/// # Example
///
/// ```
/// use argon2_refiner::{CsvExporter, Recommendation};
///
/// let samples = [Recommendation { memory_cost: 67108864, time_cost: 3, measured_ms: 512 }];
/// let csv = CsvExporter::to_string(&samples);
/// assert!(csv.starts_with("memory_cost,time_cost,measured_ms"));
/// assert!(csv.contains("67108864,3,512"));
/// ```
pub struct CsvExporter;

impl CsvExporter {
    /// Exports recommendations to a CSV string.
    pub fn to_string(recommendations: &[Recommendation]) -> String {
        let mut output = String::new();

        writeln!(output, "memory_cost,time_cost,measured_ms").unwrap();
        for rec in recommendations {
            writeln!(
                output,
                "{},{},{}",
                rec.memory_cost, rec.time_cost, rec.measured_ms
            )
            .unwrap();
        }

        output
    }

    /// Writes recommendations as CSV to a writer.
    pub fn write<W: Write>(recommendations: &[Recommendation], mut writer: W) -> io::Result<()> {
        let csv = Self::to_string(recommendations);
        writer.write_all(csv.as_bytes())
    }
}

/// Markdown report generator.
///
/// Renders ranked recommendations as a human-readable table, slowest (most
/// conservative) candidate first.
///
/// # Example
///
/// ```
/// use argon2_refiner::{MarkdownReport, Recommendation};
///
/// let samples = [Recommendation { memory_cost: 67108864, time_cost: 3, measured_ms: 512 }];
/// let md = MarkdownReport::to_string(&samples);
/// assert!(md.contains("# Recommended Parameters"));
/// assert!(md.contains("| 1 | 67108864 | 3 | 512 |"));
/// ```
pub struct MarkdownReport;

impl MarkdownReport {
    /// Generates a Markdown report string.
    pub fn to_string(recommendations: &[Recommendation]) -> String {
        let mut output = String::new();

        writeln!(output, "# Recommended Parameters").unwrap();
        writeln!(output).unwrap();

        if recommendations.is_empty() {
            writeln!(output, "*No candidate landed inside the tolerance window.*").unwrap();
            return output;
        }

        writeln!(output, "- **Candidates**: {}", recommendations.len()).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Rank | Memory (bytes) | Time Cost | Measured (ms) |").unwrap();
        writeln!(output, "|------|----------------|-----------|---------------|").unwrap();

        for (index, rec) in recommendations.iter().enumerate() {
            writeln!(
                output,
                "| {} | {} | {} | {} |",
                index + 1,
                rec.memory_cost,
                rec.time_cost,
                rec.measured_ms,
            )
            .unwrap();
        }

        output
    }

    /// Writes a Markdown report to a writer.
    pub fn write<W: Write>(recommendations: &[Recommendation], mut writer: W) -> io::Result<()> {
        let md = Self::to_string(recommendations);
        writer.write_all(md.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Recommendation> {
        vec![
            Recommendation {
                memory_cost: 134217728,
                time_cost: 4,
                measured_ms: 540,
            },
            Recommendation {
                memory_cost: 67108864,
                time_cost: 3,
                measured_ms: 470,
            },
        ]
    }

    #[test]
    fn csv_has_one_row_per_sample() {
        let csv = CsvExporter::to_string(&samples());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "memory_cost,time_cost,measured_ms");
        assert_eq!(lines[1], "134217728,4,540");
        assert_eq!(lines[2], "67108864,3,470");
    }

    #[test]
    fn csv_write_matches_to_string() {
        let mut buffer = Vec::new();
        CsvExporter::write(&samples(), &mut buffer).unwrap();
        assert_eq!(buffer, CsvExporter::to_string(&samples()).into_bytes());
    }

    #[test]
    fn markdown_ranks_samples_in_order() {
        let md = MarkdownReport::to_string(&samples());
        assert!(md.contains("- **Candidates**: 2"));
        assert!(md.contains("| 1 | 134217728 | 4 | 540 |"));
        assert!(md.contains("| 2 | 67108864 | 3 | 470 |"));
    }

    #[test]
    fn markdown_reports_an_empty_search() {
        let md = MarkdownReport::to_string(&[]);
        assert!(md.contains("No candidate landed inside the tolerance window"));
    }
}
