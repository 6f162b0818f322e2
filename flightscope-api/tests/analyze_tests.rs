//! Router tests for POST /analyze

mod support;

use axum::http::StatusCode;
use flightscope_core::{supported_airports, ScheduleMode, SourceError};
use flightscope_llm::EMPTY_REPLY_FALLBACK;
use flightscope_test_utils::fixtures::{arrivals_payload, departures_payload};
use flightscope_test_utils::{StubChatProvider, StubScheduleSource};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use support::{form_request, send_json, test_app, test_config};

const QUESTION: &str = "How+many+flights+arrived%3F";

fn analyze_body(airport_code: &str) -> String {
    format!("airport_code={}&question={}", airport_code, QUESTION)
}

// ============================================================================
// VALIDATION
// ============================================================================

#[tokio::test]
async fn test_unknown_airport_is_rejected() -> Result<(), String> {
    let app = test_app(test_config(), StubScheduleSource::new(), None);

    let (status, body) = send_json(&app.router, form_request(&analyze_body("XXX"))?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_AIRPORT_CODE");
    assert!(body["message"].as_str().unwrap_or_default().contains("XXX"));
    assert_eq!(app.source.total_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_lowercase_code_is_not_normalized() -> Result<(), String> {
    let app = test_app(test_config(), StubScheduleSource::new(), None);

    let (status, body) = send_json(&app.router, form_request(&analyze_body("lhr"))?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_AIRPORT_CODE");
    Ok(())
}

#[tokio::test]
async fn test_blank_question_is_rejected() -> Result<(), String> {
    let app = test_app(test_config(), StubScheduleSource::new(), None);

    let (status, body) =
        send_json(&app.router, form_request("airport_code=LHR&question=+++")?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_FIELD");
    assert_eq!(app.source.total_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_airport_field_is_rejected() -> Result<(), String> {
    let app = test_app(test_config(), StubScheduleSource::new(), None);

    let (status, body) = send_json(&app.router, form_request(&format!("question={}", QUESTION))?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_FIELD");
    Ok(())
}

#[tokio::test]
async fn test_non_form_body_is_rejected() -> Result<(), String> {
    let app = test_app(test_config(), StubScheduleSource::new(), None);
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"airport_code\":\"LHR\"}"))
        .map_err(|e| e.to_string())?;

    let (status, body) = send_json(&app.router, request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    Ok(())
}

// ============================================================================
// ANSWERS
// ============================================================================

#[tokio::test]
async fn test_offline_answer_counts_arrivals() -> Result<(), String> {
    let source = StubScheduleSource::new().with_arrivals(arrivals_payload(10));
    let app = test_app(test_config(), source, None);

    let (status, body) = send_json(&app.router, form_request(&analyze_body("LHR"))?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["airport_code"], "LHR");
    assert_eq!(body["flights_count"], 10);
    assert_eq!(body["answer_source"], "offline");
    assert_eq!(body["data_source"], "live");
    assert_eq!(body["answer"], "Всего проанализировано 10 рейсов в аэропорт LHR.");
    assert_eq!(app.source.calls(ScheduleMode::Arrivals), 1);
    assert_eq!(app.source.calls(ScheduleMode::Departures), 1);
    Ok(())
}

#[tokio::test]
async fn test_model_answer_is_returned() -> Result<(), String> {
    let source = StubScheduleSource::new()
        .with_arrivals(arrivals_payload(4))
        .with_departures(departures_payload(2));
    let app = test_app(
        test_config(),
        source,
        Some(StubChatProvider::replying("Из Германии прилетел 1 рейс.")),
    );

    let (status, body) = send_json(&app.router, form_request(&analyze_body("DXB"))?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "Из Германии прилетел 1 рейс.");
    assert_eq!(body["answer_source"], "model");
    assert_eq!(body["flights_count"], 4);

    let provider = app.provider.ok_or("provider missing")?;
    assert_eq!(provider.call_count(), 1);
    let requests = provider.requests();
    assert_eq!(requests[0].user, "How many flights arrived?");
    assert_eq!(requests[0].model, "gpt-4o-mini");
    assert!(requests[0].system.contains("DXB"));
    Ok(())
}

#[tokio::test]
async fn test_departures_stay_out_of_origin_counts() -> Result<(), String> {
    let source = StubScheduleSource::new()
        .with_arrivals(arrivals_payload(2))
        .with_departures(departures_payload(3));
    let app = test_app(
        test_config(),
        source,
        Some(StubChatProvider::replying("ok")),
    );

    let (status, body) = send_json(&app.router, form_request(&analyze_body("DXB"))?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flights_count"], 2);

    let provider = app.provider.ok_or("provider missing")?;
    let system = provider
        .requests()
        .first()
        .map(|request| request.system.clone())
        .ok_or("no chat request recorded")?;
    assert!(system.contains("\"total_flights\": 2"));
    assert!(system.contains("\"Germany\": 1"));
    assert!(system.contains("\"France\": 1"));
    assert!(!system.contains("\"UAE\""));
    assert!(!system.contains("\"Dubai\""));
    Ok(())
}

#[tokio::test]
async fn test_departures_alone_do_not_count_as_flights() -> Result<(), String> {
    let source = StubScheduleSource::new().with_departures(departures_payload(4));
    let app = test_app(test_config(), source, None);

    let (status, body) = send_json(&app.router, form_request(&analyze_body("LHR"))?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flights_count"], 0);
    assert_eq!(body["data_source"], "live");
    Ok(())
}

#[tokio::test]
async fn test_empty_model_reply_uses_fallback_text() -> Result<(), String> {
    let source = StubScheduleSource::new().with_arrivals(arrivals_payload(3));
    let app = test_app(test_config(), source, Some(StubChatProvider::scripted(Ok(None))));

    let (status, body) = send_json(&app.router, form_request(&analyze_body("LHR"))?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], EMPTY_REPLY_FALLBACK);
    Ok(())
}

#[tokio::test]
async fn test_model_failure_degrades_answer() -> Result<(), String> {
    let source = StubScheduleSource::new().with_arrivals(arrivals_payload(5));
    let app = test_app(test_config(), source, Some(StubChatProvider::failing()));

    let (status, body) = send_json(&app.router, form_request(&analyze_body("LHR"))?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["answer_source"], "degraded");
    let answer = body["answer"].as_str().unwrap_or_default();
    assert!(answer.starts_with("Ошибка при обработке запроса: "));
    assert_eq!(body["flights_count"], 5);
    Ok(())
}

// ============================================================================
// UPSTREAM
// ============================================================================

#[tokio::test]
async fn test_second_request_is_served_from_cache() -> Result<(), String> {
    let source = StubScheduleSource::new().with_arrivals(arrivals_payload(7));
    let app = test_app(test_config(), source, None);

    let (_, first) = send_json(&app.router, form_request(&analyze_body("CDG"))?).await?;
    let (status, second) = send_json(&app.router, form_request(&analyze_body("CDG"))?).await?;

    assert_eq!(first["data_source"], "live");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["data_source"], "cache");
    assert_eq!(second["flights_count"], 7);
    assert_eq!(app.source.total_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_malformed_upstream_body_is_server_error() -> Result<(), String> {
    let source = StubScheduleSource::new().respond(
        ScheduleMode::Arrivals,
        Err(SourceError::MalformedBody {
            reason: "expected value at line 1 column 1".to_string(),
        }),
    );
    let app = test_app(test_config(), source, None);

    let (status, body) = send_json(&app.router, form_request(&analyze_body("LHR"))?).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UPSTREAM_FETCH_ERROR");
    Ok(())
}

#[tokio::test]
async fn test_unreachable_upstream_yields_empty_answer() -> Result<(), String> {
    let source = StubScheduleSource::new()
        .unreachable(ScheduleMode::Arrivals)
        .unreachable(ScheduleMode::Departures);
    let app = test_app(test_config(), source, None);

    let (status, body) = send_json(&app.router, form_request(&analyze_body("SIN"))?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flights_count"], 0);
    assert_eq!(body["data_source"], "live");
    Ok(())
}

#[tokio::test]
async fn test_demo_fallback_when_enabled() -> Result<(), String> {
    let source = StubScheduleSource::new()
        .unreachable(ScheduleMode::Arrivals)
        .unreachable(ScheduleMode::Departures);
    let mut config = test_config();
    config.demo_fallback = true;
    let app = test_app(config, source, None);

    let (status, body) = send_json(&app.router, form_request(&analyze_body("SIN"))?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data_source"], "demo");
    assert_eq!(body["flights_count"], flightscope_api::fallback::DEMO_FLIGHT_COUNT);
    Ok(())
}

#[tokio::test]
async fn test_undecodable_entries_are_skipped() -> Result<(), String> {
    let mut payload = arrivals_payload(3);
    if let Some(data) = payload
        .pointer_mut("/airport/pluginData/schedule/arrivals/data")
        .and_then(|v| v.as_array_mut())
    {
        data.push(serde_json::json!({ "no_flight_here": true }));
    }
    let app = test_app(test_config(), StubScheduleSource::new().with_arrivals(payload), None);

    let (status, body) = send_json(&app.router, form_request(&analyze_body("LHR"))?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flights_count"], 3);
    Ok(())
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn test_runtime() -> Result<tokio::runtime::Runtime, TestCaseError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| TestCaseError::fail(format!("Failed to create runtime: {}", e)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_unsupported_codes_never_reach_upstream(code in "[A-Z]{3}") {
        prop_assume!(supported_airports().iter().all(|a| a.code != code));

        let rt = test_runtime()?;
        rt.block_on(async {
            let app = test_app(test_config(), StubScheduleSource::new(), None);
            let request = form_request(&analyze_body(&code)).map_err(TestCaseError::fail)?;
            let (status, body) = send_json(&app.router, request)
                .await
                .map_err(TestCaseError::fail)?;

            prop_assert_eq!(status, StatusCode::BAD_REQUEST);
            prop_assert_eq!(&body["code"], "INVALID_AIRPORT_CODE");
            prop_assert_eq!(app.source.total_calls(), 0);
            Ok(())
        })?;
    }
}
