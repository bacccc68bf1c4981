mod common;

use std::cell::Cell;

use candle_chart_wasm::application::{ChartAdapter, LoadCandlesUseCase, LoadTicket};
use candle_chart_wasm::domain::errors::ChartError;
use candle_chart_wasm::domain::market_data::{CandleRequest, CandleTime, Symbol, Timeframe};
use candle_chart_wasm::infrastructure::http::{
    ApiCandleSource, FETCH_FAILED, api_error_message, parse_candle_envelope,
};
use common::{FakeSurface, InstantPause, ScriptedSource, candles, envelope, journal, policy};
use futures::executor::block_on;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use serde_json::json;

fn request(symbol: &str, timeframe: Timeframe, benchmark: &str) -> CandleRequest {
    CandleRequest::new(Symbol::new(symbol).unwrap(), Symbol::new(benchmark).unwrap(), timeframe)
}

fn adapter() -> ChartAdapter<FakeSurface, InstantPause> {
    ChartAdapter::new(FakeSurface::sized(800, 600, journal()), InstantPause::default(), policy(2))
}

#[test]
fn request_path_matches_endpoint() {
    let req = request("AAPL", Timeframe::OneDay, "QQQ");
    assert_eq!(req.path(), "/api/candles/AAPL/1d?benchmark=QQQ");

    let req = request(" msft ", Timeframe::OneMonth, "spy");
    assert_eq!(req.path(), "/api/candles/MSFT/1mo?benchmark=SPY");
}

#[test]
fn api_base_is_prefixed_once() {
    let req = request("AAPL", Timeframe::FourHours, "QQQ");
    assert_eq!(ApiCandleSource::default().url_for(&req), "/api/candles/AAPL/4h?benchmark=QQQ");
    assert_eq!(
        ApiCandleSource::new("http://localhost:5000/").url_for(&req),
        "http://localhost:5000/api/candles/AAPL/4h?benchmark=QQQ"
    );
}

#[test]
fn loads_candles_in_received_order() {
    let source = ScriptedSource::new(vec![Ok(envelope("AAPL", "QQQ", "1d", candles(3)))], journal());
    let use_case = LoadCandlesUseCase::new(source);
    let adapter = adapter();
    let latest = Cell::new(0);
    let ticket = LoadTicket::issue(&latest);

    let summary = block_on(use_case.execute(&adapter, &request("AAPL", Timeframe::OneDay, "QQQ"), &ticket)).unwrap();

    assert_eq!(summary.candle_count, 3);
    assert_eq!(summary.title(), "AAPL vs QQQ - 1d");
    assert_eq!(adapter.surface().data.borrow().as_slice(), [candles(3)]);
    assert_eq!(adapter.surface().fits.get(), 1);
}

#[test]
fn summary_falls_back_to_request_when_echo_is_missing() {
    let mut body = envelope("", "", "", candles(2));
    body.symbol = None;
    body.benchmark = None;
    body.timeframe = None;
    let use_case = LoadCandlesUseCase::new(ScriptedSource::new(vec![Ok(body)], journal()));
    let adapter = adapter();
    let latest = Cell::new(0);
    let ticket = LoadTicket::issue(&latest);

    let summary = block_on(use_case.execute(&adapter, &request("tsla", Timeframe::OneHour, "spy"), &ticket)).unwrap();

    assert_eq!(summary.title(), "TSLA vs SPY - 1h");
}

#[test]
fn empty_or_missing_candles_is_no_data() {
    let mut missing = envelope("AAPL", "QQQ", "1d", Vec::new());
    missing.candles = None;
    let responses = vec![Ok(envelope("AAPL", "QQQ", "1d", Vec::new())), Ok(missing)];
    let use_case = LoadCandlesUseCase::new(ScriptedSource::new(responses, journal()));
    let adapter = adapter();
    let latest = Cell::new(0);
    let req = request("AAPL", Timeframe::OneDay, "QQQ");

    for _ in 0..2 {
        let ticket = LoadTicket::issue(&latest);
        let err = block_on(use_case.execute(&adapter, &req, &ticket)).unwrap_err();
        assert_eq!(err, ChartError::NoData);
        assert_eq!(err.user_message(), "No data available");
    }
    assert!(adapter.surface().data.borrow().is_empty());
}

#[test]
fn chart_is_ready_before_the_request_goes_out() {
    let log = journal();
    let adapter = ChartAdapter::new(FakeSurface::sized(800, 600, log.clone()), InstantPause::default(), policy(2));
    let use_case = LoadCandlesUseCase::new(ScriptedSource::new(
        vec![Ok(envelope("AAPL", "QQQ", "1d", candles(1)))],
        log.clone(),
    ));
    let latest = Cell::new(0);
    let ticket = LoadTicket::issue(&latest);

    block_on(use_case.execute(&adapter, &request("AAPL", Timeframe::OneDay, "QQQ"), &ticket)).unwrap();

    assert_eq!(
        log.borrow().as_slice(),
        [
            "initialize 800x600",
            "fetch /api/candles/AAPL/1d?benchmark=QQQ",
            "set_data 1",
            "fit_view",
        ]
        .map(String::from)
    );
}

#[test]
fn superseded_ticket_is_not_rendered() {
    let use_case = LoadCandlesUseCase::new(ScriptedSource::new(
        vec![Ok(envelope("AAPL", "QQQ", "1d", candles(4)))],
        journal(),
    ));
    let adapter = adapter();
    let latest = Cell::new(0);
    let ticket = LoadTicket::issue(&latest);
    let _newer = LoadTicket::issue(&latest);

    let err = block_on(use_case.execute(&adapter, &request("AAPL", Timeframe::OneDay, "QQQ"), &ticket)).unwrap_err();

    assert_eq!(err, ChartError::Stale { sequence: 1 });
    assert!(adapter.surface().data.borrow().is_empty());
}

#[test]
fn source_errors_pass_through() {
    let use_case = LoadCandlesUseCase::new(ScriptedSource::new(
        vec![Err(ChartError::Api("Invalid timeframe".to_string()))],
        journal(),
    ));
    let adapter = adapter();
    let latest = Cell::new(0);
    let ticket = LoadTicket::issue(&latest);

    let err = block_on(use_case.execute(&adapter, &request("AAPL", Timeframe::OneDay, "QQQ"), &ticket)).unwrap_err();

    assert_eq!(err.user_message(), "Invalid timeframe");
}

#[test]
fn error_body_message_or_fallback() {
    assert_eq!(api_error_message(r#"{"error": "Could not fetch data for ZZZZ"}"#), "Could not fetch data for ZZZZ");
    assert_eq!(api_error_message(r#"{"error": ""}"#), FETCH_FAILED);
    assert_eq!(api_error_message(r#"{"detail": "nope"}"#), FETCH_FAILED);
    assert_eq!(api_error_message("<html>502 Bad Gateway</html>"), FETCH_FAILED);
    assert_eq!(api_error_message(""), FETCH_FAILED);
}

#[test]
fn parses_backend_body() {
    let body = r#"{
        "symbol": "AAPL",
        "benchmark": "QQQ",
        "timeframe": "1d",
        "candles": [
            {"time": 1704067200, "open": 185.1, "high": 186.0, "low": 184.2, "close": 185.6},
            {"time": "2024-01-03", "open": 185.6, "high": 187.3, "low": 185.0, "close": 187.0},
            {"time": 1704326400.0, "open": 187.0, "high": 188.1, "low": 186.2, "close": 186.5},
            {"time": {"year": 2024, "month": 1, "day": 5}, "open": 186.5, "high": 187.0, "low": 185.1, "close": 185.9}
        ]
    }"#;

    let mut parsed = parse_candle_envelope(body).unwrap();

    assert_eq!(parsed.symbol.as_deref(), Some("AAPL"));
    let bars = parsed.take_candles().unwrap();
    assert_eq!(bars.len(), 4);
    assert_eq!(bars[0].time, CandleTime::from(1_704_067_200_i64));
    assert_eq!(bars[0].time.as_unix_seconds(), Some(1_704_067_200));
    assert_eq!(bars[1].time, CandleTime::from("2024-01-03"));
    assert_eq!(bars[1].close, 187.0);
    assert_eq!(bars[2].time.as_json(), &json!(1704326400.0));
    assert_eq!(bars[3].time.as_json(), &json!({"year": 2024, "month": 1, "day": 5}));
}

#[test]
fn candle_time_goes_back_out_unchanged() {
    let body = r#"{"candles": [
        {"time": 1704326400.5, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5},
        {"time": {"year": 2024, "month": 1, "day": 5}, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5}
    ]}"#;

    let bars = parse_candle_envelope(body).unwrap().take_candles().unwrap();
    let sent = serde_json::to_value(&bars).unwrap();

    assert_eq!(sent[0]["time"], json!(1704326400.5));
    assert_eq!(sent[1]["time"], json!({"year": 2024, "month": 1, "day": 5}));
}

#[test]
fn malformed_body_is_a_parse_error() {
    assert!(matches!(parse_candle_envelope("not json"), Err(ChartError::Parse(_))));
    assert!(matches!(
        parse_candle_envelope(r#"{"candles": [{"time": 1, "open": "x"}]}"#),
        Err(ChartError::Parse(_))
    ));
}

#[quickcheck]
fn every_received_candle_reaches_the_series(n: u8) -> TestResult {
    if n == 0 {
        return TestResult::discard();
    }
    let expected = candles(n as usize);
    let use_case = LoadCandlesUseCase::new(ScriptedSource::new(
        vec![Ok(envelope("AAPL", "QQQ", "1d", expected.clone()))],
        journal(),
    ));
    let adapter = adapter();
    let latest = Cell::new(0);
    let ticket = LoadTicket::issue(&latest);

    let summary = block_on(use_case.execute(&adapter, &request("AAPL", Timeframe::OneDay, "QQQ"), &ticket));

    let applied = adapter.surface().data.borrow();
    TestResult::from_bool(
        summary.map(|s| s.candle_count) == Ok(n as usize) && applied.len() == 1 && applied[0] == expected,
    )
}
