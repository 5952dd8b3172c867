use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Index-futures root symbol traded against a CSI/SSE spot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum FuturesRoot {
    IH,
    IF,
    IC,
    IM,
}

impl FuturesRoot {
    pub const ALL: [Self; 4] = [Self::IH, Self::IF, Self::IC, Self::IM];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IH => "IH",
            Self::IF => "IF",
            Self::IC => "IC",
            Self::IM => "IM",
        }
    }

    /// Equity code of the underlying spot index, used as the spot leg of a
    /// spread fetch.
    pub const fn spot_index(self) -> &'static str {
        match self {
            Self::IH => "sh000922",
            Self::IF => "sh000300",
            Self::IC => "sh000905",
            Self::IM => "sh000852",
        }
    }

    fn from_prefix(value: &str) -> Option<Self> {
        match value {
            "IH" => Some(Self::IH),
            "IF" => Some(Self::IF),
            "IC" => Some(Self::IC),
            "IM" => Some(Self::IM),
            _ => None,
        }
    }
}

impl Display for FuturesRoot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative expiry selector for a futures code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tenor {
    /// Nearest quarterly contract.
    Front,
    /// One quarter further out.
    Next,
}

impl Tenor {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Next => "Next",
        }
    }
}

impl Display for Tenor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the disjoint code families a validated code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeFamily {
    Equity,
    Futures,
    /// `test*` codes, served by the synthetic random-walk source.
    Synthetic,
}

/// Validated, immutable instrument code.
///
/// Three disjoint families:
/// - equity: 2-letter market prefix (`sh`/`sz`) followed by 6 digits;
/// - futures: root (`IH`/`IF`/`IC`/`IM`) plus a `-Front`/`-Next` tenor marker;
/// - synthetic: any code starting with `test`, fed by generated data.
///
/// Validation happens exactly once, at construction; accessors never
/// re-validate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstrumentCode {
    raw: String,
    kind: CodeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CodeKind {
    Equity,
    Futures(FuturesRoot, Tenor),
    Synthetic,
}

impl InstrumentCode {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCode);
        }

        if trimmed.starts_with("sh") || trimmed.starts_with("sz") {
            return Self::parse_equity(trimmed);
        }
        if let Some(root) = trimmed.get(..2).and_then(FuturesRoot::from_prefix) {
            return Self::parse_futures(trimmed, root);
        }
        if trimmed.starts_with("test") {
            return Ok(Self {
                raw: trimmed.to_owned(),
                kind: CodeKind::Synthetic,
            });
        }

        Err(ValidationError::UnknownCodeFamily {
            value: trimmed.to_owned(),
        })
    }

    fn parse_equity(code: &str) -> Result<Self, ValidationError> {
        if code.len() != 8 {
            return Err(ValidationError::EquityCodeLength {
                value: code.to_owned(),
            });
        }
        if !code[2..].chars().all(|ch| ch.is_ascii_digit()) {
            return Err(ValidationError::EquityCodeDigits {
                value: code.to_owned(),
            });
        }
        Ok(Self {
            raw: code.to_owned(),
            kind: CodeKind::Equity,
        })
    }

    fn parse_futures(code: &str, root: FuturesRoot) -> Result<Self, ValidationError> {
        let Some(rest) = code[2..].strip_prefix('-') else {
            return Err(ValidationError::FuturesCodeShape {
                value: code.to_owned(),
            });
        };
        let tenor = match rest {
            "Front" => Tenor::Front,
            "Next" => Tenor::Next,
            _ => {
                return Err(ValidationError::FuturesCodeTenor {
                    value: code.to_owned(),
                })
            }
        };
        Ok(Self {
            raw: code.to_owned(),
            kind: CodeKind::Futures(root, tenor),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub const fn family(&self) -> CodeFamily {
        match self.kind {
            CodeKind::Equity => CodeFamily::Equity,
            CodeKind::Futures(..) => CodeFamily::Futures,
            CodeKind::Synthetic => CodeFamily::Synthetic,
        }
    }

    /// Root symbol; `None` outside the futures family.
    pub const fn root(&self) -> Option<FuturesRoot> {
        match self.kind {
            CodeKind::Futures(root, _) => Some(root),
            CodeKind::Equity | CodeKind::Synthetic => None,
        }
    }

    /// Tenor marker; `None` outside the futures family.
    pub const fn tenor(&self) -> Option<Tenor> {
        match self.kind {
            CodeKind::Futures(_, tenor) => Some(tenor),
            CodeKind::Equity | CodeKind::Synthetic => None,
        }
    }
}

// Code ordering keeps the working set deterministic.
impl PartialOrd for InstrumentCode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InstrumentCode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl Display for InstrumentCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentCode {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for InstrumentCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for InstrumentCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<InstrumentCode> for String {
    fn from(value: InstrumentCode) -> Self {
        value.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_equity_codes() {
        let code = InstrumentCode::parse("sh600000").expect("valid equity code");
        assert_eq!(code.family(), CodeFamily::Equity);
        assert_eq!(code.as_str(), "sh600000");
        assert!(code.root().is_none());
    }

    #[test]
    fn rejects_short_equity_code() {
        let err = InstrumentCode::parse("sh60000").expect_err("must fail");
        assert!(matches!(err, ValidationError::EquityCodeLength { .. }));
    }

    #[test]
    fn rejects_non_digit_equity_suffix() {
        let err = InstrumentCode::parse("sz60000a").expect_err("must fail");
        assert!(matches!(err, ValidationError::EquityCodeDigits { .. }));
    }

    #[test]
    fn parses_futures_codes() {
        let code = InstrumentCode::parse("IC-Front").expect("valid futures code");
        assert_eq!(code.family(), CodeFamily::Futures);
        assert_eq!(code.root(), Some(FuturesRoot::IC));
        assert_eq!(code.tenor(), Some(Tenor::Front));
    }

    #[test]
    fn rejects_unknown_tenor() {
        let err = InstrumentCode::parse("IC-Middle").expect_err("must fail");
        assert!(matches!(err, ValidationError::FuturesCodeTenor { .. }));
    }

    #[test]
    fn rejects_missing_separator() {
        let err = InstrumentCode::parse("IHFront").expect_err("must fail");
        assert!(matches!(err, ValidationError::FuturesCodeShape { .. }));
    }

    #[test]
    fn parses_synthetic_test_codes() {
        let code = InstrumentCode::parse("test000001").expect("valid synthetic code");
        assert_eq!(code.family(), CodeFamily::Synthetic);
        assert!(code.root().is_none());
        assert!(code.tenor().is_none());
    }

    #[test]
    fn rejects_unknown_family() {
        let err = InstrumentCode::parse("AAPL").expect_err("must fail");
        assert!(matches!(err, ValidationError::UnknownCodeFamily { .. }));
    }

    #[test]
    fn spot_index_mapping_is_total() {
        for root in FuturesRoot::ALL {
            assert!(InstrumentCode::parse(root.spot_index()).is_ok());
        }
    }

    #[test]
    fn orders_by_raw_code() {
        let a = InstrumentCode::parse("IC-Front").expect("valid");
        let b = InstrumentCode::parse("sh000001").expect("valid");
        assert!(a < b);
    }
}
