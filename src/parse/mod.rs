//! ads.txt line classification and parsing.
//!
//! Parsing never fails on content: every non-blank, non-comment line becomes a
//! data record, a variable, or a warning, and the next line is processed
//! regardless. The only error is an unreadable input stream.
//!
//! Line grammar (IAB ads.txt 1.0.1):
//! - `<domain>, <account id>, <DIRECT|RESELLER>[, <certification authority id>]`
//! - `<variable>=<value>` where variable is `subdomain` or `contact`
//! - `#` starts a comment that runs to the end of the line

use std::io::Read;
use std::str::FromStr;

use crate::adsystems::{validate_canonical_name, AdSystemLookup};
use crate::domain::validate_hostname_shape;
use crate::error_handling::ParseError;
use crate::records::{
    AccountType, DataRecord, Finding, LineOutcome, ParseResult, VariableRecord, VariableType,
};

const COMMENT_DELIMITER: char = '#';
const ESCAPE: char = '\\';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// More `=` than this on a comma separated line means it is not a data record.
const MAX_EQUALS_IN_DATA_RECORD: usize = 5;

const MSG_UNPARSEABLE: &str = "could not parse this line";
const MSG_FIELD_PATTERN: &str =
    "Data record must be declared as <FIELD #1>, <FIELD #2>, <FIELD #3>, <FIELD #4> (optional) pattern";
const MSG_MISSING_DOMAIN: &str = "Missing domain name of the advertising system (required)";
const MSG_MISSING_ACCOUNT_ID: &str = "Missing publisher's Account ID (required)";
const MSG_MISSING_ACCOUNT_TYPE: &str = "Missing type of account/relationship (required)";

/// Parses ads.txt content, optionally checking advertising systems against a registry.
///
/// # Examples
///
/// ```
/// use adstxt_crawler::{KnownAdSystems, Parser, Severity};
///
/// let registry = KnownAdSystems::from_entries([(1, "adtech", "adtech.com")]);
/// let result = Parser::with_ad_systems(&registry)
///     .parse(b"adtech.com, 123, DIRECT\nexample.com, 456, RESELLER\n");
///
/// assert_eq!(result.data_records.len(), 2);
/// assert_eq!(result.warnings.len(), 1);
/// assert_eq!(result.warnings[0].severity, Severity::Low);
/// ```
#[derive(Clone, Copy, Default)]
pub struct Parser<'a> {
    ad_systems: Option<&'a dyn AdSystemLookup>,
}

impl<'a> Parser<'a> {
    /// A parser that checks host name shape only.
    pub fn new() -> Self {
        Self { ad_systems: None }
    }

    /// A parser that also checks advertising systems against `lookup`.
    pub fn with_ad_systems(lookup: &'a dyn AdSystemLookup) -> Self {
        Self {
            ad_systems: Some(lookup),
        }
    }

    pub(crate) fn with_optional_ad_systems(lookup: Option<&'a dyn AdSystemLookup>) -> Self {
        Self {
            ad_systems: lookup,
        }
    }

    /// Parses raw file content into records, variables and warnings.
    pub fn parse(&self, content: &[u8]) -> ParseResult {
        let body = split_lines(content);
        let mut result = ParseResult::default();
        for (index, raw) in body.iter().enumerate() {
            result.record(index + 1, raw, self.parse_line(raw));
        }
        result.body = body;
        result
    }

    /// Reads `reader` to the end and parses its content.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Read` if the stream cannot be read.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<ParseResult, ParseError> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        Ok(self.parse(&content))
    }

    /// Classifies one source line and parses it accordingly.
    pub(crate) fn parse_line(&self, raw: &str) -> LineOutcome {
        let line = strip_comment(raw);
        if line.is_empty() {
            return LineOutcome::Skipped;
        }

        let commas = line.matches(',').count();
        let equals = line.matches('=').count();
        if commas >= 2 && equals <= MAX_EQUALS_IN_DATA_RECORD {
            self.parse_data_record(line)
        } else if equals == 1 {
            parse_variable(line)
        } else {
            LineOutcome::Rejected(Finding::high(MSG_UNPARSEABLE))
        }
    }

    fn parse_data_record(&self, line: &str) -> LineOutcome {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let (domain, account_id, account_type, cert_authority_id) = match fields.as_slice() {
            [domain, account_id, account_type] => (*domain, *account_id, *account_type, None),
            [domain, account_id, account_type, cert] => {
                (*domain, *account_id, *account_type, Some(*cert))
            }
            _ => return LineOutcome::Rejected(Finding::high(MSG_FIELD_PATTERN)),
        };

        if domain.is_empty() {
            return LineOutcome::Rejected(Finding::high(MSG_MISSING_DOMAIN));
        }
        if !validate_hostname_shape(domain) {
            return LineOutcome::Rejected(Finding::high(format!(
                "{domain} is not a valid Ad system domain"
            )));
        }
        if account_id.is_empty() {
            return LineOutcome::Rejected(Finding::high(MSG_MISSING_ACCOUNT_ID));
        }
        if account_type.is_empty() {
            return LineOutcome::Rejected(Finding::high(MSG_MISSING_ACCOUNT_TYPE));
        }
        let Ok(parsed_type) = AccountType::from_str(account_type) else {
            return LineOutcome::Rejected(Finding::high(format!(
                "[{account_type}] is not a valid account type. Account type must be [{}] or [{}]",
                AccountType::Direct,
                AccountType::Reseller
            )));
        };

        let record = DataRecord {
            advertiser_domain: domain.to_string(),
            publisher_account_id: account_id.to_string(),
            account_type: parsed_type,
            cert_authority_id: cert_authority_id
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        };
        let flag = self.flag_record(&record);
        LineOutcome::Data { record, flag }
    }

    /// At most one low severity finding per record; the registry check wins.
    fn flag_record(&self, record: &DataRecord) -> Option<Finding> {
        if let Some(lookup) = self.ad_systems {
            if let Err(e) = validate_canonical_name(lookup, &record.advertiser_domain) {
                return Some(Finding::low(e.to_string()));
            }
        }
        match record.cert_authority_id.as_deref() {
            Some(id) if !id.chars().all(|c| c.is_ascii_alphanumeric()) => Some(Finding::low(
                format!("Certification Authority ID {id} may not be correct as it is not alphanumeric"),
            )),
            _ => None,
        }
    }
}

fn parse_variable(line: &str) -> LineOutcome {
    let Some((key, value)) = line.split_once('=') else {
        return LineOutcome::Rejected(Finding::high(MSG_UNPARSEABLE));
    };
    match VariableType::from_str(key) {
        Ok(variable_type) => LineOutcome::Variable(VariableRecord {
            variable_type,
            value: value.to_string(),
        }),
        Err(_) => LineOutcome::Rejected(Finding::high(format!(
            "[{key}] is not a valid Variable type"
        ))),
    }
}

/// Removes the comment (from the first unescaped `#`) and surrounding whitespace.
pub(crate) fn strip_comment(line: &str) -> &str {
    let mut escaped = false;
    let mut end = line.len();
    for (i, c) in line.char_indices() {
        if c == COMMENT_DELIMITER && !escaped {
            end = i;
            break;
        }
        escaped = c == ESCAPE;
    }
    line[..end].trim_start_matches(BYTE_ORDER_MARK).trim()
}

/// Splits content on `\n`, `\r\n` or a bare `\r`, keeping each line's text verbatim.
///
/// A terminator at the very end does not produce a trailing empty line.
pub(crate) fn split_lines(content: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while let Some(&byte) = content.get(i) {
        match byte {
            b'\n' | b'\r' => {
                lines.push(decode(&content[start..i]));
                i += 1;
                if byte == b'\r' && content.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < content.len() {
        lines.push(decode(&content[start..]));
    }
    lines
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Parses ads.txt content without an advertising system registry.
///
/// # Examples
///
/// ```
/// use adstxt_crawler::parse_file;
///
/// let result = parse_file(b"greenadexchange.com, XF7342, DIRECT\ncontact=ads@example.com");
/// assert_eq!(result.data_records.len(), 1);
/// assert_eq!(result.variables.len(), 1);
/// assert!(result.warnings.is_empty());
/// ```
pub fn parse_file(content: &[u8]) -> ParseResult {
    Parser::new().parse(content)
}

/// Reads and parses ads.txt content without an advertising system registry.
///
/// # Errors
///
/// Returns `ParseError::Read` if the stream cannot be read.
pub fn parse_reader<R: Read>(reader: R) -> Result<ParseResult, ParseError> {
    Parser::new().parse_reader(reader)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
