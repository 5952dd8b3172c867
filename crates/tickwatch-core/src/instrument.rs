//! Instrument aggregate: one quote source plus a bounded rolling history.

use time::OffsetDateTime;
use tracing::error;

use crate::domain::{is_trading_session, InstrumentCode};
use crate::error::FetchError;
use crate::ring::RingBuffer;
use crate::source::QuoteSource;

/// Samples retained per instrument.
pub const HISTORY_CAPACITY: usize = 240;

/// Rolling price history of one instrument.
pub type History = RingBuffer<f64, HISTORY_CAPACITY>;

/// One tracked instrument: exclusive owner of its source and history.
///
/// Construction performs a synchronous first fetch. On success the baseline
/// is set and the history is pre-filled to capacity with the first sample,
/// so charts start as a flat line. On failure the instrument still exists
/// but with empty history and no baseline; callers must treat an instrument
/// with empty history as not yet ready.
pub struct Instrument {
    code: InstrumentCode,
    name: String,
    base: f64,
    history: History,
    source: Box<dyn QuoteSource>,
}

impl Instrument {
    pub fn new(mut source: Box<dyn QuoteSource>) -> Self {
        let code = source.code().clone();
        let mut name = String::new();
        let mut base = 0.0;
        let mut history = History::new();

        match source.fetch() {
            Ok(fetched) => {
                base = fetched.record.previous_close;
                history.fill(fetched.record.current);
                if let Some(fetched_name) = fetched.name {
                    name = fetched_name;
                }
            }
            Err(err) => {
                error!(code = %code, error = %err, "initial fetch failed, instrument starts empty");
            }
        }

        Self {
            code,
            name,
            base,
            history,
            source,
        }
    }

    /// Acquire one new sample.
    ///
    /// A no-op outside trading sessions. On success the baseline follows the
    /// reported previous close when it changes intraday and `current` is
    /// appended to the history. On failure state is left untouched and the
    /// error is reported upward; the caller skips this tick and retries on
    /// the next one.
    pub fn refresh(&mut self, now: OffsetDateTime) -> Result<(), FetchError> {
        if !is_trading_session(now) {
            return Ok(());
        }

        let fetched = self.source.fetch()?;
        if fetched.record.previous_close != self.base {
            self.base = fetched.record.previous_close;
        }
        if self.name.is_empty() {
            if let Some(name) = fetched.name {
                self.name = name;
            }
        }
        self.history.push(fetched.record.current);
        Ok(())
    }

    pub fn code(&self) -> &InstrumentCode {
        &self.code
    }

    /// Display name from the first successful fetch; empty until then.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cached baseline (previous close).
    pub fn base_data(&self) -> f64 {
        self.base
    }

    /// Most recent sample; `None` while the history is empty.
    pub fn current_value(&self) -> Option<f64> {
        self.history.back().ok().copied()
    }

    pub fn delta(&self) -> Option<f64> {
        self.current_value().map(|current| current - self.base)
    }

    pub fn percent(&self) -> Option<f64> {
        self.delta().map(|delta| delta / self.base * 100.0)
    }

    pub fn is_down(&self) -> bool {
        self.delta().is_some_and(|delta| delta < 0.0)
    }

    /// `(min, max)` over the whole history; `(base, base)` when empty.
    pub fn bound(&self) -> (f64, f64) {
        let mut iter = self.history.iter();
        let Some(first) = iter.next() else {
            return (self.base, self.base);
        };
        iter.fold((*first, *first), |(min, max), value| {
            (min.min(*value), max.max(*value))
        })
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Not yet ready: the initial fetch failed and no sample has landed since.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::domain::{Fetched, QuoteRecord};

    /// Scripted source: pops pre-programmed outcomes, then repeats the last.
    struct ScriptedSource {
        code: InstrumentCode,
        outcomes: Vec<Result<Fetched, FetchError>>,
        calls: usize,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<Result<Fetched, FetchError>>) -> Self {
            Self {
                code: InstrumentCode::parse("sh000001").expect("valid"),
                outcomes,
                calls: 0,
            }
        }
    }

    impl QuoteSource for ScriptedSource {
        fn code(&self) -> &InstrumentCode {
            &self.code
        }

        fn fetch(&mut self) -> Result<Fetched, FetchError> {
            let index = self.calls.min(self.outcomes.len() - 1);
            self.calls += 1;
            self.outcomes[index].clone()
        }
    }

    fn quote(current: f64, previous_close: f64) -> Result<Fetched, FetchError> {
        Ok(Fetched::new(
            QuoteRecord::new(current, previous_close, previous_close),
            Some(String::from("scripted")),
        ))
    }

    const OPEN_SESSION: time::OffsetDateTime = datetime!(2024-03-13 10:00:00 +8);
    const CLOSED_SESSION: time::OffsetDateTime = datetime!(2024-03-13 20:00:00 +8);

    #[test]
    fn construction_seeds_baseline_name_and_full_history() {
        let instrument = Instrument::new(Box::new(ScriptedSource::new(vec![quote(101.0, 100.0)])));
        assert_eq!(instrument.base_data(), 100.0);
        assert_eq!(instrument.name(), "scripted");
        assert!(instrument.history().is_full());
        assert_eq!(instrument.current_value(), Some(101.0));
    }

    #[test]
    fn failed_first_fetch_leaves_an_empty_instrument() {
        let instrument = Instrument::new(Box::new(ScriptedSource::new(vec![Err(
            FetchError::network("down"),
        )])));
        assert!(instrument.is_empty());
        assert_eq!(instrument.current_value(), None);
        assert_eq!(instrument.bound(), (0.0, 0.0));
    }

    #[test]
    fn refresh_outside_trading_hours_is_a_silent_no_op() {
        let mut instrument =
            Instrument::new(Box::new(ScriptedSource::new(vec![
                quote(101.0, 100.0),
                quote(555.0, 999.0),
            ])));
        instrument.refresh(CLOSED_SESSION).expect("no error");
        assert_eq!(instrument.current_value(), Some(101.0));
        assert_eq!(instrument.base_data(), 100.0);
    }

    #[test]
    fn refresh_appends_and_tracks_baseline_changes() {
        let mut instrument = Instrument::new(Box::new(ScriptedSource::new(vec![
            quote(101.0, 100.0),
            quote(102.0, 100.0),
            quote(103.0, 102.5),
        ])));

        instrument.refresh(OPEN_SESSION).expect("refresh");
        assert_eq!(instrument.current_value(), Some(102.0));
        assert_eq!(instrument.base_data(), 100.0);

        instrument.refresh(OPEN_SESSION).expect("refresh");
        assert_eq!(instrument.base_data(), 102.5);
        assert_eq!(instrument.current_value(), Some(103.0));
    }

    #[test]
    fn failed_refresh_leaves_state_untouched() {
        let mut instrument = Instrument::new(Box::new(ScriptedSource::new(vec![
            quote(101.0, 100.0),
            Err(FetchError::parse("garbled")),
        ])));

        let err = instrument.refresh(OPEN_SESSION).expect_err("propagates");
        assert!(err.retryable());
        assert_eq!(instrument.current_value(), Some(101.0));
        assert_eq!(instrument.base_data(), 100.0);
    }

    #[test]
    fn derived_metrics_follow_the_latest_sample() {
        let mut instrument = Instrument::new(Box::new(ScriptedSource::new(vec![
            quote(99.0, 100.0),
            quote(98.0, 100.0),
        ])));
        instrument.refresh(OPEN_SESSION).expect("refresh");

        assert_eq!(instrument.delta(), Some(-2.0));
        assert_eq!(instrument.percent(), Some(-2.0));
        assert!(instrument.is_down());
        assert_eq!(instrument.bound(), (98.0, 99.0));
    }
}
