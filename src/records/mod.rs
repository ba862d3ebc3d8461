//! Parsed ads.txt content.
//!
//! [`ParseResult`] accumulates the outcome of every line of one file, in source
//! order: data records, variables, warnings, and the verbatim body.

mod types;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use types::{AccountType, DataRecord, Severity, VariableRecord, VariableType, Warning};

/// A warning before it is tied to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub(crate) fn high(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::High,
            message: message.into(),
        }
    }

    pub(crate) fn low(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Low,
            message: message.into(),
        }
    }
}

/// What a single line contributed to the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineOutcome {
    /// Blank or comment-only line
    Skipped,
    /// A data record, possibly flagged with a low severity finding
    Data {
        record: DataRecord,
        flag: Option<Finding>,
    },
    Variable(VariableRecord),
    /// The line produced no record
    Rejected(Finding),
}

/// Records parsed from one ads.txt file together with the diagnostics raised
/// while parsing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Data records in line order
    pub data_records: Vec<DataRecord>,
    /// Variables in line order
    pub variables: Vec<VariableRecord>,
    /// Warnings in line order
    pub warnings: Vec<Warning>,
    /// Original file content, one entry per source line
    pub body: Vec<String>,
}

impl ParseResult {
    /// Folds one line's outcome into the result. `index` is 1-based.
    pub(crate) fn record(&mut self, index: usize, raw: &str, outcome: LineOutcome) {
        match outcome {
            LineOutcome::Skipped => {}
            LineOutcome::Data { record, flag } => {
                if let Some(finding) = flag {
                    self.warn(index, raw, finding);
                }
                self.data_records.push(record);
            }
            LineOutcome::Variable(variable) => self.variables.push(variable),
            LineOutcome::Rejected(finding) => self.warn(index, raw, finding),
        }
    }

    fn warn(&mut self, index: usize, raw: &str, finding: Finding) {
        self.warnings.push(Warning {
            line_index: index,
            raw_text: raw.to_string(),
            message: finding.message,
            severity: finding.severity,
        });
    }

    /// Warnings for lines whose record was rejected.
    pub fn high_severity_warnings(&self) -> impl Iterator<Item = &Warning> {
        self.warnings
            .iter()
            .filter(|w| w.severity == Severity::High)
    }

    /// Whether any line was rejected.
    pub fn has_high_severity(&self) -> bool {
        self.high_severity_warnings().next().is_some()
    }

    /// Whether the file produced nothing at all: no records, variables or warnings.
    pub fn is_empty(&self) -> bool {
        self.data_records.is_empty() && self.variables.is_empty() && self.warnings.is_empty()
    }
}

fn write_section<T: Serialize>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    items: &[T],
    first: &mut bool,
) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    if !*first {
        writeln!(f)?;
    }
    *first = false;
    write!(f, "{}: [{}]", title, items.len())?;
    for item in items {
        let json = serde_json::to_string(item).map_err(|_| fmt::Error)?;
        write!(f, "\n{json}")?;
    }
    Ok(())
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        write_section(f, "Warnings", &self.warnings, &mut first)?;
        write_section(f, "Data Records", &self.data_records, &mut first)?;
        write_section(f, "Variables", &self.variables, &mut first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct(domain: &str) -> DataRecord {
        DataRecord {
            advertiser_domain: domain.to_string(),
            publisher_account_id: "1".to_string(),
            account_type: AccountType::Direct,
            cert_authority_id: None,
        }
    }

    #[test]
    fn test_record_keeps_line_order() {
        let mut result = ParseResult::default();
        result.record(1, "a.com,1,DIRECT", LineOutcome::Data {
            record: direct("a.com"),
            flag: None,
        });
        result.record(2, "# comment", LineOutcome::Skipped);
        result.record(3, "junk", LineOutcome::Rejected(Finding::high("could not parse this line")));
        result.record(4, "b.com,1,DIRECT", LineOutcome::Data {
            record: direct("b.com"),
            flag: None,
        });

        assert_eq!(result.data_records.len(), 2);
        assert_eq!(result.data_records[0].advertiser_domain, "a.com");
        assert_eq!(result.data_records[1].advertiser_domain, "b.com");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].line_index, 3);
        assert_eq!(result.warnings[0].raw_text, "junk");
    }

    #[test]
    fn test_flagged_data_record_produces_record_and_warning() {
        let mut result = ParseResult::default();
        result.record(1, "a.com,1,DIRECT,<x>", LineOutcome::Data {
            record: direct("a.com"),
            flag: Some(Finding::low("odd")),
        });

        assert_eq!(result.data_records.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].severity, Severity::Low);
        assert!(!result.has_high_severity());
    }

    #[test]
    fn test_high_severity_helpers() {
        let mut result = ParseResult::default();
        assert!(result.is_empty());
        result.record(1, "x", LineOutcome::Rejected(Finding::high("bad")));
        result.record(2, "y", LineOutcome::Rejected(Finding::low("meh")));

        assert!(result.has_high_severity());
        assert_eq!(result.high_severity_warnings().count(), 1);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_display_sections() {
        let mut result = ParseResult::default();
        result.record(1, "a.com,1,DIRECT", LineOutcome::Data {
            record: direct("a.com"),
            flag: None,
        });
        result.record(2, "contact=me", LineOutcome::Variable(VariableRecord {
            variable_type: VariableType::Contact,
            value: "me".to_string(),
        }));

        let text = result.to_string();
        assert_eq!(
            text,
            "Data Records: [1]\n\
             {\"advertiserDomain\":\"a.com\",\"publisherAccountId\":\"1\",\"accountType\":\"DIRECT\"}\n\
             Variables: [1]\n\
             {\"type\":\"contact\",\"value\":\"me\"}"
        );
    }

    #[test]
    fn test_display_empty_result() {
        assert_eq!(ParseResult::default().to_string(), "");
    }
}
