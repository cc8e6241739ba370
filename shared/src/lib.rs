use serde::{Deserialize, Serialize};

pub mod bounds;
pub mod display;
pub mod resolver;

pub use bounds::{AREA_OF_INTEREST, BoundingBox, DEFAULT_SELECTION};
pub use display::{DisplayState, project};
pub use resolver::{InputSource, resolve};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Round both axes to 2 decimal places, the precision the analysis
    /// service works at.
    pub fn rounded(self) -> Self {
        Self {
            lat: (self.lat * 100.0).round() / 100.0,
            lon: (self.lon * 100.0).round() / 100.0,
        }
    }
}

/// Body sent to the analysis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinate> for AnalysisRequest {
    fn from(coord: Coordinate) -> Self {
        Self {
            latitude: coord.lat,
            longitude: coord.lon,
        }
    }
}

/// Success body returned by the analysis service. The percentage sits nested
/// under a field of the same name; that is the service's wire format, not ours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub deforestation_percentage: PercentageReading,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentageReading {
    pub deforestation_percentage: f64,
}

/// Outcome of one analysis trigger. Created fresh per trigger and superseded
/// by the next; error outcomes are data here, the display projection decides
/// what the user sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResult {
    Success { percentage: f64 },
    NotFound,
    ApiError { code: u16, detail: String },
    TransportError { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        let coord = Coordinate {
            lat: -3.90145,
            lon: -54.89999,
        };
        let rounded = coord.rounded();
        assert_eq!(rounded.lat, -3.9);
        assert_eq!(rounded.lon, -54.9);
    }

    #[test]
    fn analysis_result_round_trips_tagged() {
        let result = AnalysisResult::ApiError {
            code: 503,
            detail: "upstream unavailable".into(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"status\":\"api_error\""));
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn success_body_parses_nested_percentage() {
        let body = r#"{"deforestation_percentage":{"deforestation_percentage":-12.5}}"#;
        let parsed: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.deforestation_percentage.deforestation_percentage,
            -12.5
        );
    }

    #[test]
    fn success_body_rejects_non_numeric_percentage() {
        let body = r#"{"deforestation_percentage":{"deforestation_percentage":"n/a"}}"#;
        assert!(serde_json::from_str::<AnalysisResponse>(body).is_err());
    }
}
