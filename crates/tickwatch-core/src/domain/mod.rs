//! Domain models: instrument codes, quote records, contract-code
//! resolution, and the trading-session predicate.

mod code;
mod contract;
mod quote;
mod session;

pub use code::{CodeFamily, FuturesRoot, InstrumentCode, Tenor};
pub use contract::resolve_contract_code;
pub use quote::{Fetched, QuoteRecord};
pub use session::is_trading_session;
