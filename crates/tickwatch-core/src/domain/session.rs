use time::macros::time;
use time::{OffsetDateTime, Weekday};

/// Whether `now` (exchange-local time) falls inside a trading session.
///
/// Sessions are Mon-Fri, 09:30-11:30 and 13:00-15:00, bounds inclusive.
/// Outside these windows fetches are skipped entirely.
pub fn is_trading_session(now: OffsetDateTime) -> bool {
    if matches!(now.weekday(), Weekday::Saturday | Weekday::Sunday) {
        return false;
    }

    let t = now.time();
    let morning = t >= time!(9:30) && t <= time!(11:30);
    let afternoon = t >= time!(13:00) && t <= time!(15:00);
    morning || afternoon
}
