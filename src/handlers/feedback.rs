use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    db,
    error::AppError,
    models::survey::{FeedbackParams, FeedbackResponse},
    scoring,
};

/// Serves the personalized assessment for one student.
///
/// The assessment is recomputed from the stored answers on every view;
/// nothing is cached between requests.
pub async fn get_feedback(
    State(pool): State<SqlitePool>,
    Query(params): Query<FeedbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = params.student_id.trim();
    if student_id.is_empty() {
        return Err(AppError::Validation(
            "student_id must not be blank".to_string(),
        ));
    }

    let record = db::find_by_student_id(&pool, student_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up survey response: {:?}", e);
            AppError::from(e)
        })?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No survey response found for student id '{student_id}'. Please submit the questionnaire first."
            ))
        })?;

    let assessment = scoring::classify(&record.answers);

    Ok(Json(FeedbackResponse {
        student_id: record.student_id,
        name: record.name,
        age: record.age,
        gender: record.gender,
        class: record.class,
        submitted_at: record.created_at,
        assessment,
    }))
}
