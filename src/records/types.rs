//! Record and diagnostic types produced by the ads.txt parser.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Relationship between the publisher and the advertising system account.
///
/// Parsed case-insensitively, stored upper-case.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AccountType {
    /// The publisher directly controls the account
    Direct,
    /// The publisher authorized another entity to control the account
    Reseller,
}

/// One authorized seller relationship:
/// `<advertising system>, <account id>, <DIRECT|RESELLER>[, <certification authority id>]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRecord {
    /// Canonical domain of the advertising system
    pub advertiser_domain: String,
    /// Publisher's account id within the advertising system
    pub publisher_account_id: String,
    /// DIRECT or RESELLER
    pub account_type: AccountType,
    /// Certification authority id of the advertising system, if given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_authority_id: Option<String>,
}

/// Supported `<VARIABLE>=<VALUE>` directives.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VariableType {
    /// Subdomain within the root domain that carries its own ads.txt
    Subdomain,
    /// Contact information for the owner of the file
    Contact,
}

/// A file-level directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableRecord {
    /// Directive name
    #[serde(rename = "type")]
    pub variable_type: VariableType,
    /// Value as written after the `=`
    pub value: String,
}

/// How much a warning undermines the line it was raised for.
///
/// `Low`: a record was produced despite a formatting anomaly.
/// `High`: the line could not be trusted and produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Record kept, anomaly noted
    Low,
    /// Line rejected
    High,
}

/// A diagnostic attached to one source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    /// 1-based line number in the source file
    pub line_index: usize,
    /// The line exactly as it appeared in the file
    pub raw_text: String,
    /// What is wrong with the line
    pub message: String,
    /// Whether a record was still produced
    pub severity: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_account_type_is_case_insensitive() {
        assert_eq!(AccountType::from_str("direct").unwrap(), AccountType::Direct);
        assert_eq!(
            AccountType::from_str("ReSeLLeR").unwrap(),
            AccountType::Reseller
        );
        assert!(AccountType::from_str("unknow").is_err());
        assert_eq!(AccountType::Direct.to_string(), "DIRECT");
    }

    #[test]
    fn test_variable_type_is_case_insensitive() {
        assert_eq!(
            VariableType::from_str("SUBDOMAIN").unwrap(),
            VariableType::Subdomain
        );
        assert_eq!(
            VariableType::from_str("Contact").unwrap(),
            VariableType::Contact
        );
        assert!(VariableType::from_str("subdomains").is_err());
        assert_eq!(VariableType::Contact.as_ref(), "contact");
    }

    #[test]
    fn test_data_record_json_encode() {
        let record = DataRecord {
            advertiser_domain: "greenadexchange.com".to_string(),
            publisher_account_id: "XF7342".to_string(),
            account_type: AccountType::Direct,
            cert_authority_id: Some("5jyxf8k54".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"advertiserDomain":"greenadexchange.com","publisherAccountId":"XF7342","accountType":"DIRECT","certAuthorityId":"5jyxf8k54"}"#
        );

        // Optional value is omitted when absent
        let record = DataRecord {
            cert_authority_id: None,
            ..record
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"advertiserDomain":"greenadexchange.com","publisherAccountId":"XF7342","accountType":"DIRECT"}"#
        );
    }

    #[test]
    fn test_data_record_json_decode() {
        let json = r#"{"advertiserDomain":"greenadexchange.com","publisherAccountId":"XF7342","accountType":"RESELLER"}"#;
        let record: DataRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.advertiser_domain, "greenadexchange.com");
        assert_eq!(record.account_type, AccountType::Reseller);
        assert_eq!(record.cert_authority_id, None);
    }

    #[test]
    fn test_variable_and_warning_json() {
        let variable = VariableRecord {
            variable_type: VariableType::Subdomain,
            value: "dev.example.com".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&variable).unwrap(),
            r#"{"type":"subdomain","value":"dev.example.com"}"#
        );

        let warning = Warning {
            line_index: 3,
            raw_text: "bad line".to_string(),
            message: "could not parse this line".to_string(),
            severity: Severity::High,
        };
        assert_eq!(
            serde_json::to_string(&warning).unwrap(),
            r#"{"lineIndex":3,"rawText":"bad line","message":"could not parse this line","severity":"HIGH"}"#
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::High);
    }
}
