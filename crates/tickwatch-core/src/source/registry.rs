use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use tracing::info;

use crate::domain::{CodeFamily, InstrumentCode};
use crate::error::FetchError;
use crate::http::SharedHttpClient;
use crate::source::{NetworkQuoteSource, QuoteSource, RandomWalkSource, SpreadSource};

/// Tag naming one source construction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    RandomWalk,
    Network,
    Spread,
}

impl SourceKind {
    pub const ALL: [Self; 3] = [Self::RandomWalk, Self::Network, Self::Spread];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RandomWalk => "random_walk",
            Self::Network => "network",
            Self::Spread => "spread",
        }
    }

    /// Default kind for a validated code: futures codes fetch as a spread,
    /// equity codes fetch the raw network quote, and `test*` codes run the
    /// synthetic random walk.
    pub const fn infer(code: &InstrumentCode) -> Self {
        match code.family() {
            CodeFamily::Equity => Self::Network,
            CodeFamily::Futures => Self::Spread,
            CodeFamily::Synthetic => Self::RandomWalk,
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

type SourceCtor = Box<dyn Fn(InstrumentCode) -> Result<Box<dyn QuoteSource>, FetchError> + Send + Sync>;

/// Finite constructor registry, populated once at process start by explicit
/// registration. Looking up an unregistered kind is a configuration error,
/// fatal to the caller.
pub struct SourceRegistry {
    ctors: BTreeMap<SourceKind, SourceCtor>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            ctors: BTreeMap::new(),
        }
    }

    /// Registry with all built-in kinds wired to `transport`.
    pub fn with_defaults(transport: SharedHttpClient) -> Self {
        let mut registry = Self::new();
        registry.register(SourceKind::RandomWalk, |code| {
            let source: Box<dyn QuoteSource> = Box::new(RandomWalkSource::new(code));
            Ok(source)
        });

        let network_transport = transport.clone();
        registry.register(SourceKind::Network, move |code| {
            let source: Box<dyn QuoteSource> =
                Box::new(NetworkQuoteSource::new(code, network_transport.clone()));
            Ok(source)
        });

        registry.register(SourceKind::Spread, move |code| {
            let source: Box<dyn QuoteSource> =
                Box::new(SpreadSource::new(code, transport.clone())?);
            Ok(source)
        });
        registry
    }

    pub fn register<F>(&mut self, kind: SourceKind, ctor: F)
    where
        F: Fn(InstrumentCode) -> Result<Box<dyn QuoteSource>, FetchError> + Send + Sync + 'static,
    {
        self.ctors.insert(kind, Box::new(ctor));
    }

    pub fn is_registered(&self, kind: SourceKind) -> bool {
        self.ctors.contains_key(&kind)
    }

    /// Construct a source of `kind` for `code`.
    pub fn create(
        &self,
        kind: SourceKind,
        code: InstrumentCode,
    ) -> Result<Box<dyn QuoteSource>, FetchError> {
        let ctor = self.ctors.get(&kind).ok_or_else(|| {
            FetchError::configuration(format!("source kind '{kind}' is not registered"))
        })?;
        info!(%kind, %code, "creating quote source");
        ctor(code)
    }

    /// Construct the inferred default source for `code`.
    pub fn create_for(&self, code: InstrumentCode) -> Result<Box<dyn QuoteSource>, FetchError> {
        self.create(SourceKind::infer(&code), code)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
