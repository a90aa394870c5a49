// src/handlers/survey.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    db,
    error::AppError,
    models::survey::{SubmitSurveyRequest, SubmitSurveyResponse, SurveyResponse},
    questionnaire::{self, AnswerSheet},
    utils::{html, link, qr},
};

/// Records one survey submission.
///
/// * Validates the identity block and completes the answer sheet with the
///   documented defaults.
/// * Writes the row update-or-create keyed by student id, so a resubmission
///   replaces the previous response instead of stacking a duplicate.
/// * Returns 201 Created with the personalized feedback link and its QR code.
pub async fn submit_survey(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<SubmitSurveyRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    let answers = AnswerSheet::from_partial(&payload.answers)?;

    let response = SurveyResponse {
        student_id: payload.student_id.trim().to_string(),
        name: html::strip_markup(payload.name.trim()),
        age: payload.age,
        gender: payload.gender,
        class: html::strip_markup(payload.class.trim()),
        answers,
        created_at: None,
    };

    db::upsert_response(&pool, &response).await.map_err(|e| {
        tracing::error!("Failed to store survey response: {:?}", e);
        AppError::from(e)
    })?;

    tracing::info!("Recorded survey response for student {}", response.student_id);

    let feedback_url = link::feedback_url(&config.public_base_url, &response.student_id);
    let qr_svg = qr::svg_qr(&feedback_url)?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitSurveyResponse {
            student_id: response.student_id,
            feedback_url,
            qr_svg,
        }),
    ))
}

/// Serves the printed instrument for the form renderer: the five scale
/// labels plus every item in form order, and which item is the honesty check
/// so the form can preselect its third option.
pub async fn get_questionnaire() -> impl IntoResponse {
    let items: Vec<serde_json::Value> = questionnaire::items()
        .map(|(item, text)| serde_json::json!({ "item": item, "text": text }))
        .collect();

    Json(serde_json::json!({
        "scale": questionnaire::SCALE,
        "honesty_item": questionnaire::HONESTY_ITEM,
        "items": items,
    }))
}
