//! Wire-format parsing for the quote endpoint.
//!
//! A response body carries the payload of interest between the first pair of
//! double quotes, as a comma-delimited field list. Numeric fields must be
//! fully consumable as floating point; name fields arrive in a legacy
//! double-byte charset (GBK) and are converted to UTF-8 before being
//! surfaced. Each source layout supplies its own positional field indices.
//!
//! Splitting on raw bytes is safe: `"` and `,` are below 0x40 and therefore
//! never occur as GBK trail bytes.

use tracing::{error, warn};

use crate::domain::{Fetched, QuoteRecord};
use crate::error::FetchError;

/// Where a layout finds the display-name field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    At(usize),
    /// Last field of the payload, wherever that falls.
    Last,
}

/// Positional field mapping for one payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: NameField,
    pub open: usize,
    pub previous_close: usize,
    pub current: usize,
    /// Parsing fails outright when fewer fields than this are present.
    pub min_fields: usize,
    /// Half-open range of fields expected to be numeric; anomalies outside
    /// the required indices are logged but tolerated.
    pub numeric_start: usize,
    pub numeric_end: usize,
}

/// Equity and spot-index payload shape.
pub const EQUITY_LAYOUT: FieldLayout = FieldLayout {
    name: NameField::At(0),
    open: 1,
    previous_close: 2,
    current: 3,
    min_fields: 8,
    numeric_start: 1,
    numeric_end: 8,
};

/// Index-futures payload shape. The previous-session reference and the open
/// share field 0; the contract name sits in the final field.
pub const FUTURES_LAYOUT: FieldLayout = FieldLayout {
    name: NameField::Last,
    open: 0,
    previous_close: 0,
    current: 3,
    min_fields: 5,
    numeric_start: 0,
    numeric_end: 5,
};

/// Decode a raw response body into a quote record under `layout`.
pub fn parse_quote(body: &[u8], layout: &FieldLayout) -> Result<Fetched, FetchError> {
    let payload = quoted_payload(body).ok_or_else(|| {
        error!(
            body = %String::from_utf8_lossy(body),
            "quote payload missing quoted section"
        );
        FetchError::parse("response has no quoted payload")
    })?;

    let fields: Vec<&[u8]> = payload.split(|b| *b == b',').collect();
    if fields.len() < layout.min_fields {
        error!(
            got = fields.len(),
            want = layout.min_fields,
            payload = %String::from_utf8_lossy(payload),
            "quote payload has too few fields"
        );
        return Err(FetchError::parse(format!(
            "expected at least {} fields, got {}",
            layout.min_fields,
            fields.len()
        )));
    }

    // Strict numeric scan over the layout's span; a malformed field is only
    // fatal when one of the required indices needs it.
    let mut values: Vec<Option<f64>> = Vec::with_capacity(layout.numeric_end - layout.numeric_start);
    for index in layout.numeric_start..layout.numeric_end {
        let parsed = numeric_field(fields[index]);
        if parsed.is_none() {
            warn!(
                index,
                field = %String::from_utf8_lossy(fields[index]),
                "invalid price format"
            );
        }
        values.push(parsed);
    }

    let require = |index: usize, what: &str| -> Result<f64, FetchError> {
        values
            .get(index - layout.numeric_start)
            .copied()
            .flatten()
            .ok_or_else(|| FetchError::parse(format!("field {index} ({what}) is not numeric")))
    };

    let record = QuoteRecord::new(
        require(layout.current, "current")?,
        require(layout.previous_close, "previous close")?,
        require(layout.open, "open")?,
    );

    let name_bytes = match layout.name {
        NameField::At(index) => fields.get(index).copied(),
        NameField::Last => fields.last().copied(),
    };
    let name = name_bytes
        .map(decode_gbk)
        .filter(|name| !name.is_empty());

    Ok(Fetched::new(record, name))
}

/// Substring between the first pair of double quotes, as raw bytes.
fn quoted_payload(body: &[u8]) -> Option<&[u8]> {
    let start = body.iter().position(|b| *b == b'"')?;
    let rest = &body[start + 1..];
    let end = rest.iter().position(|b| *b == b'"')?;
    Some(&rest[..end])
}

/// Strict parse: the whole field must be consumable as a float.
fn numeric_field(field: &[u8]) -> Option<f64> {
    std::str::from_utf8(field).ok()?.parse::<f64>().ok()
}

/// Convert a GBK-encoded name field to UTF-8. Undecodable bytes degrade to
/// replacement characters rather than failing the record.
fn decode_gbk(raw: &[u8]) -> String {
    let (decoded, _, _) = encoding_rs::GBK.decode(raw);
    decoded.into_owned()
}
