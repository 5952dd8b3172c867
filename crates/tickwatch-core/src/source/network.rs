use time::OffsetDateTime;
use tracing::debug;

use crate::domain::{resolve_contract_code, CodeFamily, Fetched, InstrumentCode};
use crate::error::FetchError;
use crate::http::{HttpRequest, SharedHttpClient};
use crate::parser::{parse_quote, FieldLayout, EQUITY_LAYOUT, FUTURES_LAYOUT};
use crate::source::QuoteSource;

const QUOTE_HOST: &str = "http://hq.sinajs.cn/list=";
const REFERER: &str = "https://finance.sina.com.cn/";
// The endpoint rejects default clients, so present a browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Raw network source issuing one blocking request per fetch.
///
/// Equity codes query `list=<code>`; futures codes re-resolve their concrete
/// contract before every fetch (contracts roll with the calendar) and query
/// `list=nf_<contract>`.
pub struct NetworkQuoteSource {
    code: InstrumentCode,
    transport: SharedHttpClient,
    /// Contract resolved by the most recent futures fetch.
    contract: Option<String>,
}

impl NetworkQuoteSource {
    pub fn new(code: InstrumentCode, transport: SharedHttpClient) -> Self {
        Self {
            code,
            transport,
            contract: None,
        }
    }

    /// Concrete contract code of the last fetch; `None` for equity sources
    /// or before the first futures fetch.
    pub fn contract(&self) -> Option<&str> {
        self.contract.as_deref()
    }

    fn target(&mut self) -> Result<(String, &'static FieldLayout), FetchError> {
        match self.code.family() {
            CodeFamily::Equity => Ok((
                format!("{QUOTE_HOST}{}", self.code.as_str()),
                &EQUITY_LAYOUT,
            )),
            CodeFamily::Futures => {
                let (root, tenor) = self
                    .code
                    .root()
                    .zip(self.code.tenor())
                    .ok_or_else(|| FetchError::configuration("futures code without tenor"))?;
                let contract =
                    resolve_contract_code(root, tenor, OffsetDateTime::now_utc().date());
                let url = format!("{QUOTE_HOST}nf_{contract}");
                self.contract = Some(contract);
                Ok((url, &FUTURES_LAYOUT))
            }
            CodeFamily::Synthetic => Err(FetchError::configuration(format!(
                "synthetic code '{}' has no network endpoint",
                self.code
            ))),
        }
    }
}

impl QuoteSource for NetworkQuoteSource {
    fn code(&self) -> &InstrumentCode {
        &self.code
    }

    fn fetch(&mut self) -> Result<Fetched, FetchError> {
        let (url, layout) = self.target()?;
        debug!(code = %self.code, %url, "fetching quote");

        let request = HttpRequest::get(url)
            .with_header("referer", REFERER)
            .with_header("user-agent", USER_AGENT);

        let response = self
            .transport
            .execute(request)
            .map_err(|e| FetchError::network(e.message()))?;
        if !response.is_success() {
            return Err(FetchError::network(format!(
                "quote endpoint returned status {}",
                response.status
            )));
        }

        parse_quote(&response.body, layout)
    }
}
