use crate::models::Priority;

/// Maps a CVSS score to a priority bucket. A finding without a score is
/// treated as `Medium`, not as harmless. Out-of-range scores fall through the
/// same comparisons rather than erroring.
pub fn classify(cvss_score: Option<f32>) -> Priority {
    match cvss_score {
        None => Priority::Medium,
        Some(score) if score < 3.9 => Priority::Low,
        Some(score) if score < 6.9 => Priority::Medium,
        Some(score) if score < 8.9 => Priority::High,
        Some(_) => Priority::Critical,
    }
}
