//! Fluency sub-scores derived from recognizer confidence and response latency.
//!
//! Pure function of the context; never looks at the strings.

use serde::{Deserialize, Serialize};

use crate::AssessmentContext;

/// Confidence above which speech counts as fully clear.
const CLEAR_CONFIDENCE: f32 = 0.8;
/// Answers faster than this are not penalized.
const TIMING_GRACE_MS: u64 = 3000;
/// Timing never scores below this.
const TIMING_FLOOR: f64 = 50.0;
/// Latency beyond which the answer is flagged as hesitant.
const HESITATION_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluencyScores {
    pub clarity: u8,
    pub timing: u8,
    pub hesitation_detected: bool,
}

impl FluencyScores {
    pub fn estimate(context: &AssessmentContext) -> Self {
        let confidence = context.effective_confidence();
        let clarity = if confidence > CLEAR_CONFIDENCE {
            100
        } else {
            crate::utils::clamp_score(confidence as f64 * 100.0)
        };

        let timing_ms = context.timing_ms;
        let timing = if timing_ms < TIMING_GRACE_MS {
            100
        } else {
            let penalty = (timing_ms - TIMING_GRACE_MS) as f64 / 100.0;
            crate::utils::clamp_score((100.0 - penalty).max(TIMING_FLOOR))
        };

        Self {
            clarity,
            timing,
            hesitation_detected: timing_ms > HESITATION_MS,
        }
    }
}
