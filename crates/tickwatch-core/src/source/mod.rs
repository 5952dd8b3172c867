//! Quote sources and the startup registry.
//!
//! Every variant exposes the same capability: one blocking fetch producing a
//! normalized [`Fetched`] record or a [`FetchError`]. Variants:
//!
//! - [`RandomWalkSource`]: synthetic generation, never fails;
//! - [`NetworkQuoteSource`]: one blocking request to the quote endpoint,
//!   equity or futures layout by code family;
//! - [`SpreadSource`]: composite of a spot leg and a futures leg, reporting
//!   the futures price against the spot price as baseline.

mod network;
mod random_walk;
mod registry;
mod spread;

pub use network::NetworkQuoteSource;
pub use random_walk::RandomWalkSource;
pub use registry::{SourceKind, SourceRegistry};
pub use spread::SpreadSource;

use crate::domain::{Fetched, InstrumentCode};
use crate::error::FetchError;

/// Pluggable fetch capability owned by an instrument.
pub trait QuoteSource: Send {
    fn code(&self) -> &InstrumentCode;

    /// Acquire one quote. Blocking; sequential with every other fetch.
    fn fetch(&mut self) -> Result<Fetched, FetchError>;
}
