use time::Date;

use super::code::{FuturesRoot, Tenor};

/// Resolve the concrete exchange contract code for `root` at `tenor` as of
/// `today`.
///
/// Expiries follow the quarterly cycle (Mar/Jun/Sep/Dec): the month is
/// rounded up to the next multiple of three, `Next` adds one more quarter,
/// and the year carries when the month overflows December. Output is
/// `<root><2-digit year><2-digit month>`, e.g. `IH2503`.
///
/// Contract codes roll as calendar quarters pass, so this must be recomputed
/// before every fetch of a futures leg.
pub fn resolve_contract_code(root: FuturesRoot, tenor: Tenor, today: Date) -> String {
    let mut year = today.year().rem_euclid(100);
    let mut month = u8::from(today.month()) as i32;

    let remainder = month % 3;
    if remainder != 0 {
        month += 3 - remainder;
    }
    if tenor == Tenor::Next {
        month += 3;
    }
    if month > 12 {
        year += 1;
        month %= 12;
    }

    format!("{}{year:02}{month:02}", root.as_str())
}
