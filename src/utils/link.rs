// src/utils/link.rs

use url::Url;

/// Builds the personalized feedback link for one student.
///
/// The student id travels as a query parameter, `?student_id=...`, with
/// percent-encoding handled by the url crate. The base URL is validated at
/// startup, so extending it here cannot fail.
pub fn feedback_url(public_base_url: &Url, student_id: &str) -> String {
    let mut url = public_base_url.clone();

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("feedback");
    }

    url.query_pairs_mut()
        .clear()
        .append_pair("student_id", student_id);

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_feedback_path_and_query() {
        let base = Url::parse("http://survey.example.edu").unwrap();

        assert_eq!(
            feedback_url(&base, "20240001"),
            "http://survey.example.edu/feedback?student_id=20240001"
        );
    }

    #[test]
    fn test_trailing_slash_does_not_double_up() {
        let base = Url::parse("http://survey.example.edu/").unwrap();

        assert_eq!(
            feedback_url(&base, "20240001"),
            "http://survey.example.edu/feedback?student_id=20240001"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let base = Url::parse("http://survey.example.edu/screening").unwrap();

        assert_eq!(
            feedback_url(&base, "20240001"),
            "http://survey.example.edu/screening/feedback?student_id=20240001"
        );
    }

    #[test]
    fn test_student_id_is_percent_encoded() {
        let base = Url::parse("http://survey.example.edu").unwrap();

        assert_eq!(
            feedback_url(&base, "2024 0001"),
            "http://survey.example.edu/feedback?student_id=2024+0001"
        );
    }
}
