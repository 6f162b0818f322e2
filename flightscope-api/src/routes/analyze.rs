//! Analyze Endpoint
//!
//! POST /analyze takes `airport_code` and `question` as form fields, fetches
//! the airport's schedule, decodes it, and asks the answering service.

use std::sync::Arc;

use axum::{extract::rejection::FormRejection, extract::State, Form, Json};
use chrono::Utc;
use flightscope_core::{find_airport, parse_schedule, FlightSummary};
use flightscope_llm::QuestionAnsweringService;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::fallback::demo_records;
use crate::fetcher::FlightDataFetcher;

// ============================================================================
// TYPES
// ============================================================================

/// Form body for POST /analyze. Fields are optional so absence maps to a
/// structured 400 instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeForm {
    pub airport_code: Option<String>,
    pub question: Option<String>,
}

/// Where the flights behind an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Cache,
    Demo,
}

/// Successful analyze response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub answer: String,
    pub airport_code: String,
    /// Arrival flights behind the answer.
    pub flights_count: usize,
    /// `model`, `offline` or `degraded`.
    pub answer_source: String,
    pub data_source: DataSource,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /analyze - Answer a question about an airport's flights
pub async fn analyze(
    State(config): State<Arc<AppConfig>>,
    State(fetcher): State<Arc<FlightDataFetcher>>,
    State(answering): State<Arc<QuestionAnsweringService>>,
    form: Result<Form<AnalyzeForm>, FormRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let Form(form) = form.map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;

    let airport_code = form
        .airport_code
        .ok_or_else(|| ApiError::missing_field("airport_code"))?;
    let airport =
        find_airport(&airport_code).ok_or_else(|| ApiError::invalid_airport_code(&airport_code))?;
    let question = form
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::missing_field("question"))?;

    let read = fetcher.get_arrivals(airport.code).await?;
    let mut data_source = if read.was_cache_hit() {
        DataSource::Cache
    } else {
        DataSource::Live
    };

    let report = parse_schedule(read.value(), airport);
    let skipped = report.failed_count();
    if skipped > 0 {
        tracing::warn!(
            airport_code = airport.code,
            skipped,
            decoded = report.decoded_count(),
            "Some schedule entries could not be decoded"
        );
    }
    tracing::debug!(
        airport_code = airport.code,
        arrivals = report.arrivals.len(),
        departures = report.departures.len(),
        "Schedule decoded"
    );

    // The summary covers arrivals; a departure's origin is the airport itself.
    let records = if report.arrivals.is_empty() && config.demo_fallback {
        tracing::info!(airport_code = airport.code, "No arrivals decoded, using demo flights");
        data_source = DataSource::Demo;
        demo_records(airport, Utc::now())
    } else {
        report.arrivals
    };

    let summary = FlightSummary::build(airport.code, &records).with_skipped_entries(skipped);
    let answer = answering.answer(&question, &summary, airport.code).await;

    tracing::info!(
        airport_code = airport.code,
        flights_count = records.len(),
        answer_source = answer.source(),
        ?data_source,
        "Question answered"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        answer: answer.text(),
        airport_code: airport.code.to_string(),
        flights_count: records.len(),
        answer_source: answer.source().to_string(),
        data_source,
    }))
}
