//! Behavior tests for quote sources and the startup registry.

use tickwatch_tests::{
    equity_body, futures_body, FakeTransport, FetchError, HttpError, HttpResponse, InstrumentCode,
    QuoteSource, SourceKind, SourceRegistry, SpreadSource,
};

fn code(raw: &str) -> InstrumentCode {
    InstrumentCode::parse(raw).expect("valid code")
}

// ============================================================================
// SpreadSource: leg ordering and fail-fast
// ============================================================================

#[test]
fn when_the_spot_leg_fails_the_future_leg_is_never_fetched() {
    // Given: a transport that refuses everything
    let transport = FakeTransport::new(|_| Err(HttpError::new("connection refused")));
    let mut source = SpreadSource::new(code("IH-Front"), transport.clone()).expect("construct");

    // When: a spread fetch runs
    let err = source.fetch().expect_err("spot failure must surface");

    // Then: the spot error comes back unchanged and only one request went out
    assert!(matches!(err, FetchError::Network { .. }));
    assert_eq!(transport.request_count(), 1);
    assert!(!transport.requests()[0].contains("nf_"));
}

#[test]
fn a_spread_fetch_hits_spot_then_future_in_order() {
    let transport = FakeTransport::healthy();
    let mut source = SpreadSource::new(code("IC-Next"), transport.clone()).expect("construct");

    let fetched = source.fetch().expect("both legs answer");

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    // Spot leg is the root's underlying index.
    assert!(requests[0].ends_with("list=sh000905"));
    assert!(requests[1].contains("list=nf_IC"));

    // Futures price against spot baseline.
    assert_eq!(fetched.record.current, 3210.0);
    assert_eq!(fetched.record.previous_close, 10.8);
    assert_eq!(fetched.record.open, 10.8);
}

#[test]
fn the_future_leg_contract_is_recomputed_on_every_fetch() {
    let transport = FakeTransport::healthy();
    let mut source = SpreadSource::new(code("IF-Front"), transport.clone()).expect("construct");

    source.fetch().expect("fetch");
    source.fetch().expect("fetch");

    let futures_urls: Vec<_> = transport
        .requests()
        .into_iter()
        .filter(|url| url.contains("nf_"))
        .collect();
    assert_eq!(futures_urls.len(), 2);
    // Same calendar day, so the same concrete contract both times.
    assert_eq!(futures_urls[0], futures_urls[1]);
}

// ============================================================================
// NetworkQuoteSource: payload handling through the transport
// ============================================================================

#[test]
fn a_malformed_payload_is_a_parse_error_and_retryable() {
    let transport = FakeTransport::new(|_| Ok(HttpResponse::ok(&b"rubbish"[..])));
    let registry = SourceRegistry::with_defaults(transport);
    let mut source = registry
        .create(SourceKind::Network, code("sh600000"))
        .expect("create");

    let err = source.fetch().expect_err("must fail");
    assert!(matches!(err, FetchError::Parse { .. }));
    assert!(err.retryable());
}

#[test]
fn a_payload_with_too_few_fields_is_rejected() {
    let transport = FakeTransport::new(|_| {
        Ok(HttpResponse::ok(&b"var hq_str=\"name,10.5,10.2\";"[..]))
    });
    let registry = SourceRegistry::with_defaults(transport);
    let mut source = registry
        .create(SourceKind::Network, code("sh600000"))
        .expect("create");

    assert!(matches!(
        source.fetch().expect_err("must fail"),
        FetchError::Parse { .. }
    ));
}

#[test]
fn an_equity_quote_round_trips_through_the_documented_indices() {
    let transport = FakeTransport::new(|_| Ok(HttpResponse::ok(equity_body("n", 11.0, 10.0, 12.5))));
    let registry = SourceRegistry::with_defaults(transport);
    let mut source = registry
        .create(SourceKind::Network, code("sz000001"))
        .expect("create");

    let fetched = source.fetch().expect("fetch");
    assert_eq!(fetched.record.open, 11.0);
    assert_eq!(fetched.record.previous_close, 10.0);
    assert_eq!(fetched.record.current, 12.5);
}

#[test]
fn a_futures_quote_names_itself_after_the_tail_field() {
    let transport = FakeTransport::new(|_| Ok(HttpResponse::ok(futures_body(3000.0, 3010.0, "IM2506"))));
    let registry = SourceRegistry::with_defaults(transport);
    let mut source = registry
        .create(SourceKind::Network, code("IM-Front"))
        .expect("create");

    let fetched = source.fetch().expect("fetch");
    assert_eq!(fetched.name.as_deref(), Some("IM2506"));
    assert_eq!(fetched.record.previous_close, 3000.0);
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn an_unregistered_kind_is_a_fatal_configuration_error() {
    let registry = SourceRegistry::new();
    let err = registry
        .create(SourceKind::Spread, code("IH-Front"))
        .err()
        .expect("must fail");
    assert!(matches!(err, FetchError::Configuration { .. }));
    assert!(!err.retryable());
}

#[test]
fn the_random_walk_kind_never_touches_the_transport() {
    let transport = FakeTransport::new(|_| Err(HttpError::new("offline")));
    let registry = SourceRegistry::with_defaults(transport.clone());
    let mut source = registry
        .create(SourceKind::RandomWalk, code("sh000001"))
        .expect("create");

    for _ in 0..50 {
        let fetched = source.fetch().expect("synthetic fetches cannot fail");
        assert!(fetched.record.current > 0.0);
    }
    assert_eq!(transport.request_count(), 0);
}
