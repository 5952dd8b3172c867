//! Working set of instruments plus the rolling display cursor.

use std::collections::BTreeMap;

use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::config::ConfigData;
use crate::domain::InstrumentCode;
use crate::error::CoreError;
use crate::instrument::Instrument;
use crate::source::SourceRegistry;

/// Cyclic position over the ordered working set.
///
/// Advancing wraps unconditionally. Any membership change of the working set
/// resets the cursor to the first element; a position is never carried
/// across a structural mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RollingCursor {
    pos: usize,
}

impl RollingCursor {
    pub const fn new() -> Self {
        Self { pos: 0 }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn advance(&mut self, len: usize) {
        if len == 0 {
            self.pos = 0;
        } else {
            self.pos = (self.pos + 1) % len;
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

/// Ordered, duplicate-free working set keyed by instrument code.
///
/// Mutation of membership happens only through [`add_code`]/[`remove_code`]
/// (never concurrently with a fetch pass) and resets the cursor atomically
/// with the change.
///
/// [`add_code`]: Watchlist::add_code
/// [`remove_code`]: Watchlist::remove_code
pub struct Watchlist {
    instruments: BTreeMap<InstrumentCode, Instrument>,
    cursor: RollingCursor,
    registry: SourceRegistry,
}

impl Watchlist {
    pub fn new(registry: SourceRegistry) -> Self {
        Self {
            instruments: BTreeMap::new(),
            cursor: RollingCursor::new(),
            registry,
        }
    }

    /// Build a watchlist from configured codes. Codes that fail validation
    /// or source construction are logged and skipped rather than aborting
    /// startup.
    pub fn from_config(config: &ConfigData, registry: SourceRegistry) -> Self {
        let mut watchlist = Self::new(registry);
        for code in &config.codes {
            if let Err(err) = watchlist.add_code(code) {
                warn!(code, error = %err, "skipping configured code");
            }
        }
        watchlist
    }

    /// Validate `code` and add it to the working set.
    ///
    /// The initial fetch happens synchronously here; an instrument whose
    /// first fetch fails is still added (not-yet-ready). Adding a code that
    /// is already present is a no-op. Membership changes reset the cursor.
    pub fn add_code(&mut self, code: &str) -> Result<(), CoreError> {
        let code = InstrumentCode::parse(code)?;
        if self.instruments.contains_key(&code) {
            return Ok(());
        }

        let source = self.registry.create_for(code.clone())?;
        self.instruments.insert(code.clone(), Instrument::new(source));
        self.cursor.reset();
        info!(%code, "instrument added");
        Ok(())
    }

    /// Remove `code` from the working set; returns whether it was present.
    /// Membership changes reset the cursor.
    pub fn remove_code(&mut self, code: &str) -> bool {
        let before = self.instruments.len();
        self.instruments.retain(|key, _| key.as_str() != code);
        let removed = self.instruments.len() != before;
        if removed {
            self.cursor.reset();
            info!(code, "instrument removed");
        }
        removed
    }

    /// One full sequential fetch pass over the working set.
    ///
    /// Failures are isolated per instrument: the failed instrument keeps its
    /// previous state, the error is logged, and the pass continues. The next
    /// tick retries unconditionally.
    pub fn refresh_all(&mut self, now: OffsetDateTime) {
        for (code, instrument) in &mut self.instruments {
            if let Err(err) = instrument.refresh(now) {
                error!(%code, error = %err, "refresh failed, keeping previous sample");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&Instrument> {
        self.instruments
            .iter()
            .find(|(key, _)| key.as_str() == code)
            .map(|(_, instrument)| instrument)
    }

    /// Instruments in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.values()
    }

    pub const fn cursor_position(&self) -> usize {
        self.cursor.position()
    }

    /// Instrument at the cursor, if the working set is non-empty.
    pub fn current(&self) -> Option<&Instrument> {
        self.instruments.values().nth(self.cursor.position())
    }

    /// Rotate display focus to the next instrument, wrapping.
    pub fn advance_cursor(&mut self) -> usize {
        self.cursor.advance(self.instruments.len());
        self.cursor.position()
    }
}
