//! Core contracts for tickwatch.
//!
//! This crate contains:
//! - Validated instrument codes and normalized quote records
//! - The fixed-capacity rolling history buffer
//! - Pluggable quote sources (random walk, network, spread) and their
//!   startup registry
//! - Wire-format parsing for the quote endpoint, including legacy-charset
//!   name conversion
//! - The instrument aggregate and the watchlist with its rolling cursor
//!
//! Acquisition is single-threaded and blocking: an external timer drives
//! [`Watchlist::refresh_all`], and the display layer reads instruments
//! through the accessors and rotates focus with the cursor on its own
//! schedule.

pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod instrument;
pub mod parser;
pub mod ring;
pub mod source;
pub mod watchlist;

pub use config::{ConfigData, DEFAULT_CODE, DEFAULT_REFRESH_INTERVAL_MS};
pub use domain::{
    is_trading_session, resolve_contract_code, CodeFamily, Fetched, FuturesRoot, InstrumentCode,
    QuoteRecord, Tenor,
};
pub use error::{CoreError, FetchError, ValidationError};
pub use http::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestClient, SharedHttpClient,
};
pub use instrument::{History, Instrument, HISTORY_CAPACITY};
pub use parser::{parse_quote, FieldLayout, NameField, EQUITY_LAYOUT, FUTURES_LAYOUT};
pub use ring::{RingBuffer, RingCursor, RingError};
pub use source::{
    NetworkQuoteSource, QuoteSource, RandomWalkSource, SourceKind, SourceRegistry, SpreadSource,
};
pub use watchlist::{RollingCursor, Watchlist};
