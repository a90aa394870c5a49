// src/scoring.rs

use serde::Serialize;

use crate::questionnaire::{AnswerSheet, HONESTY_ITEM, ITEM_COUNT};

/// Number of items that contribute to the aggregate score.
/// The honesty-check item is on the form but never scored.
pub const SCORED_ITEM_COUNT: usize = ITEM_COUNT - 1;

/// Coarse triage tier derived from the average item score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Healthy,
    MildDistress,
    SignificantDistress,
}

impl SeverityTier {
    pub fn as_str(self) -> &'static str {
        match self {
            SeverityTier::Healthy => "healthy",
            SeverityTier::MildDistress => "mild_distress",
            SeverityTier::SignificantDistress => "significant_distress",
        }
    }
}

/// The scored outcome for one stored response.
///
/// Recomputed from the raw answers on every feedback view, never cached,
/// so a tweak to the thresholds takes effect for old submissions too.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// Sum of the scored items (89 items, each 1-5).
    pub total: u32,
    /// `total` averaged over the scored items.
    pub average: f64,
    pub tier: SeverityTier,
    /// Guidance lines rendered on the feedback page.
    pub guidance: &'static [&'static str],
}

/// Sums the scored items. The honesty-check item never contributes,
/// whatever it holds.
pub fn total_score(sheet: &AnswerSheet) -> u32 {
    sheet
        .iter()
        .filter(|&(item, _)| item != HONESTY_ITEM)
        .map(|(_, rating)| u32::from(rating.value()))
        .sum()
}

/// Average over `count` scored items. An empty scored set averages to 0.0
/// rather than dividing by zero.
fn average_of(total: u32, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    f64::from(total) / count as f64
}

/// Maps an average item score to its severity tier.
/// Lower bounds are inclusive: exactly 2.0 is mild, exactly 3.5 is significant.
pub fn tier_for(average: f64) -> SeverityTier {
    if average >= 3.5 {
        SeverityTier::SignificantDistress
    } else if average >= 2.0 {
        SeverityTier::MildDistress
    } else {
        SeverityTier::Healthy
    }
}

/// Scores a complete answer sheet.
pub fn classify(sheet: &AnswerSheet) -> Assessment {
    let total = total_score(sheet);
    let average = average_of(total, SCORED_ITEM_COUNT);
    let tier = tier_for(average);

    Assessment {
        total,
        average,
        tier,
        guidance: guidance_for(tier),
    }
}

fn guidance_for(tier: SeverityTier) -> &'static [&'static str] {
    match tier {
        SeverityTier::Healthy => &[
            "Your responses suggest your mental state is currently in good shape.",
            "Keep up your routine of regular sleep, exercise, and social contact.",
            "Re-take this self-check from time to time to stay aware of changes.",
        ],
        SeverityTier::MildDistress => &[
            "Your responses suggest a mild level of psychological distress.",
            "Keep a regular sleep schedule of 7 to 8 hours per night.",
            "Aim for aerobic exercise three or more times per week.",
            "Try mindfulness or breathing exercises when you feel tense.",
            "Consider booking a visit to the campus counseling center.",
        ],
        SeverityTier::SignificantDistress => &[
            "Your responses suggest a significant level of psychological distress.",
            "Please reach out to the campus counseling center as soon as you can.",
            "Stay in contact with people you trust rather than facing this alone.",
            "If you ever feel unsafe, contact a crisis hotline immediately.",
        ],
    }
}
