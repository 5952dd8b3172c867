use crate::domain::{CodeFamily, Fetched, InstrumentCode, QuoteRecord};
use crate::error::FetchError;
use crate::http::SharedHttpClient;
use crate::source::{NetworkQuoteSource, QuoteSource};

/// Composite backwardation/spread source.
///
/// Owns a spot leg (the root's underlying index) and a futures leg. A fetch
/// acquires the spot first and fails fast if it errors; the futures leg then
/// refreshes its contract and fetches. The combined record reports the
/// futures price against the spot price as baseline:
/// `current = future.current`, `previous_close = open = spot.current`.
pub struct SpreadSource {
    code: InstrumentCode,
    spot: NetworkQuoteSource,
    future: NetworkQuoteSource,
}

impl SpreadSource {
    pub fn new(code: InstrumentCode, transport: SharedHttpClient) -> Result<Self, FetchError> {
        if code.family() != CodeFamily::Futures {
            return Err(FetchError::configuration(format!(
                "spread source requires a futures code, got '{code}'"
            )));
        }
        let root = code
            .root()
            .ok_or_else(|| FetchError::configuration("futures code without root"))?;

        let spot_code = InstrumentCode::parse(root.spot_index())
            .map_err(|e| FetchError::configuration(format!("bad spot index mapping: {e}")))?;

        Ok(Self {
            spot: NetworkQuoteSource::new(spot_code, transport.clone()),
            future: NetworkQuoteSource::new(code.clone(), transport),
            code,
        })
    }
}

impl QuoteSource for SpreadSource {
    fn code(&self) -> &InstrumentCode {
        &self.code
    }

    fn fetch(&mut self) -> Result<Fetched, FetchError> {
        // Spot first; the futures leg is never touched when the spot fails.
        let spot = self.spot.fetch()?;
        let future = self.future.fetch()?;

        let record = QuoteRecord::new(
            future.record.current,
            spot.record.current,
            spot.record.current,
        );
        let name = self.future.contract().map(str::to_owned);
        Ok(Fetched::new(record, name))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http::{HttpClient, HttpError, HttpRequest, HttpResponse};

    struct SpotOnlyClient;

    impl HttpClient for SpotOnlyClient {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            if request.url.contains("nf_") {
                return Ok(HttpResponse::ok(
                    &b"var hq_str_nf=\"3300.0,3310.0,3290.0,3305.5,9000,IH2403\";"[..],
                ));
            }
            Ok(HttpResponse::ok(
                &b"var hq_str=\"index,3190.0,3185.0,3200.0,3210.0,3180.0,0,0\";"[..],
            ))
        }
    }

    #[test]
    fn reports_future_price_against_spot_baseline() {
        let code = InstrumentCode::parse("IH-Front").expect("valid");
        let mut source = SpreadSource::new(code, Arc::new(SpotOnlyClient)).expect("construct");

        let fetched = source.fetch().expect("both legs succeed");
        assert_eq!(fetched.record.current, 3305.5);
        assert_eq!(fetched.record.previous_close, 3200.0);
        assert_eq!(fetched.record.open, 3200.0);
        let name = fetched.name.expect("contract name");
        assert!(name.starts_with("IH"));
    }

    #[test]
    fn rejects_equity_codes_at_construction() {
        let code = InstrumentCode::parse("sh600000").expect("valid");
        let err = SpreadSource::new(code, Arc::new(SpotOnlyClient))
            .err()
            .expect("must fail");
        assert!(matches!(err, FetchError::Configuration { .. }));
    }
}
