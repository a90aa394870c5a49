// src/models/survey.rs

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::questionnaire::{AnswerSheet, Rating};
use crate::scoring::Assessment;

/// Gender as captured on the printed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Storage representation, matching the CHECK constraint on the table.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

/// Represents one row of the 'survey_responses' table.
///
/// The 90 answer columns are carried as a complete `AnswerSheet`; by the
/// time a value of this type exists, every defaulting rule has already
/// been applied.
#[derive(Debug, Clone)]
pub struct SurveyResponse {
    pub student_id: String,

    pub name: String,

    pub age: u8,

    pub gender: Gender,

    /// Class or cohort label, e.g. "CS-2024-3".
    pub class: String,

    pub answers: AnswerSheet,

    /// Set by the store on insert and refreshed on resubmission.
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for a survey submission.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitSurveyRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters."))]
    pub name: String,

    #[validate(range(min = 0, max = 120, message = "Age must be between 0 and 120."))]
    pub age: u8,

    pub gender: Gender,

    #[validate(length(min = 1, max = 50, message = "Class must be between 1 and 50 characters."))]
    pub class: String,

    /// The key every lookup and resubmission is matched on.
    #[validate(
        length(max = 50, message = "Student id must be at most 50 characters."),
        custom(function = validate_student_id)
    )]
    pub student_id: String,

    /// Answers keyed by printed item number. Items left off the form are
    /// filled with the documented defaults before storage.
    #[serde(default)]
    pub answers: HashMap<u8, Rating>,
}

/// Validates that a student id is not blank once trimmed.
fn validate_student_id(student_id: &str) -> Result<(), validator::ValidationError> {
    if student_id.trim().is_empty() {
        return Err(validator::ValidationError::new("student_id_must_not_be_blank"));
    }
    Ok(())
}

/// Returned after a successful submission: everything the form needs to
/// hand the respondent their personal feedback link.
#[derive(Debug, Serialize)]
pub struct SubmitSurveyResponse {
    pub student_id: String,
    pub feedback_url: String,
    /// Inline SVG QR code pointing at `feedback_url`.
    pub qr_svg: String,
}

/// Query parameters for the feedback lookup.
#[derive(Debug, Deserialize)]
pub struct FeedbackParams {
    pub student_id: String,
}

/// Personalized feedback payload for one stored response.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub student_id: String,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub class: String,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub assessment: Assessment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_round_trips_through_storage_form() {
        for gender in [Gender::Male, Gender::Female, Gender::Other] {
            assert_eq!(gender.as_str().parse::<Gender>().unwrap(), gender);
        }
        assert!("unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn test_blank_student_id_fails_validation() {
        let request = SubmitSurveyRequest {
            name: "Li Hua".to_string(),
            age: 20,
            gender: Gender::Female,
            class: "CS-2024-3".to_string(),
            student_id: "   ".to_string(),
            answers: HashMap::new(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_minimal_request_passes_validation() {
        let request = SubmitSurveyRequest {
            name: "Li Hua".to_string(),
            age: 20,
            gender: Gender::Female,
            class: "CS-2024-3".to_string(),
            student_id: "20240001".to_string(),
            answers: HashMap::new(),
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_answer_map_deserializes_numeric_keys() {
        let request: SubmitSurveyRequest = serde_json::from_str(
            r#"{
                "name": "Li Hua",
                "age": 20,
                "gender": "male",
                "class": "CS-2024-3",
                "student_id": "20240001",
                "answers": {"6": 3, "41": 3, "95": 5}
            }"#,
        )
        .unwrap();

        assert_eq!(request.answers.get(&6), Some(&Rating::Sometimes));
        assert_eq!(request.answers.get(&95), Some(&Rating::Always));
        assert_eq!(request.answers.len(), 3);
    }

    #[test]
    fn test_off_scale_answer_fails_deserialization() {
        let result: Result<SubmitSurveyRequest, _> = serde_json::from_str(
            r#"{
                "name": "Li Hua",
                "age": 20,
                "gender": "male",
                "class": "CS-2024-3",
                "student_id": "20240001",
                "answers": {"6": 6}
            }"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_answers_field_is_optional() {
        let request: SubmitSurveyRequest = serde_json::from_str(
            r#"{
                "name": "Li Hua",
                "age": 20,
                "gender": "other",
                "class": "CS-2024-3",
                "student_id": "20240001"
            }"#,
        )
        .unwrap();

        assert!(request.answers.is_empty());
    }
}
