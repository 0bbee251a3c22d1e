//! Prediction inputs and response interpretation.

use std::ops::RangeInclusive;

use serde::Serialize;
use serde_json::Value;

/// Response key carrying the predicted rainfall in millimetres.
pub const PREDICTION_KEY: &str = "Prediction";

/// The climatic parameters accepted by `/predict`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClimateField {
    CloudCover,
    Sunshine,
    GlobalRadiation,
    MaxTemp,
    MeanTemp,
    MinTemp,
    Pressure,
}

impl ClimateField {
    /// Form order.
    pub const ALL: [Self; 7] = [
        Self::CloudCover,
        Self::Sunshine,
        Self::GlobalRadiation,
        Self::MaxTemp,
        Self::MeanTemp,
        Self::MinTemp,
        Self::Pressure,
    ];

    /// JSON key sent to the service.
    pub fn key(self) -> &'static str {
        match self {
            Self::CloudCover => "cloud_cover",
            Self::Sunshine => "sunshine",
            Self::GlobalRadiation => "global_radiation",
            Self::MaxTemp => "max_temp",
            Self::MeanTemp => "mean_temp",
            Self::MinTemp => "min_temp",
            Self::Pressure => "pressure",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CloudCover => "Cloud Cover (oktas)",
            Self::Sunshine => "Sunshine (hours)",
            Self::GlobalRadiation => "Global Radiation (W/m2)",
            Self::MaxTemp => "Max Temperature (oC)",
            Self::MeanTemp => "Mean Temperature (oC)",
            Self::MinTemp => "Min Temperature (oC)",
            Self::Pressure => "Pressure (kPa)",
        }
    }

    /// Accepted values, inclusive.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Self::CloudCover => 0.0..=500.0,
            Self::Sunshine => 0.0..=24.0,
            Self::GlobalRadiation => 0.0..=200_000.0,
            Self::MaxTemp | Self::MeanTemp | Self::MinTemp => -50.0..=50.0,
            Self::Pressure => 0.0..=500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionInputError {
    #[error("{} must be a finite number", .field.label())]
    NotFinite { field: ClimateField },
    #[error("{} must be between {min} and {max} (got {value})", .field.label())]
    OutOfRange {
        field: ClimateField,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Body of a `/predict` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub cloud_cover: f64,
    pub sunshine: f64,
    pub global_radiation: f64,
    pub max_temp: f64,
    pub mean_temp: f64,
    pub min_temp: f64,
    pub pressure: f64,
}

impl PredictionRequest {
    pub fn value(&self, field: ClimateField) -> f64 {
        match field {
            ClimateField::CloudCover => self.cloud_cover,
            ClimateField::Sunshine => self.sunshine,
            ClimateField::GlobalRadiation => self.global_radiation,
            ClimateField::MaxTemp => self.max_temp,
            ClimateField::MeanTemp => self.mean_temp,
            ClimateField::MinTemp => self.min_temp,
            ClimateField::Pressure => self.pressure,
        }
    }

    pub fn value_mut(&mut self, field: ClimateField) -> &mut f64 {
        match field {
            ClimateField::CloudCover => &mut self.cloud_cover,
            ClimateField::Sunshine => &mut self.sunshine,
            ClimateField::GlobalRadiation => &mut self.global_radiation,
            ClimateField::MaxTemp => &mut self.max_temp,
            ClimateField::MeanTemp => &mut self.mean_temp,
            ClimateField::MinTemp => &mut self.min_temp,
            ClimateField::Pressure => &mut self.pressure,
        }
    }

    /// Check every field against its documented range, in form order.
    pub fn validate(&self) -> Result<(), PredictionInputError> {
        for field in ClimateField::ALL {
            let value = self.value(field);
            if !value.is_finite() {
                return Err(PredictionInputError::NotFinite { field });
            }
            let range = field.range();
            if !range.contains(&value) {
                return Err(PredictionInputError::OutOfRange {
                    field,
                    value,
                    min: *range.start(),
                    max: *range.end(),
                });
            }
        }
        Ok(())
    }
}

/// What a successful `/predict` response contained.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PredictionOutcome {
    Rainfall(f64),
    /// The call succeeded but carried no usable `Prediction` value.
    Missing,
}

impl PredictionOutcome {
    pub fn from_response(body: &Value) -> Self {
        match body.get(PREDICTION_KEY).and_then(Value::as_f64) {
            Some(mm) if mm.is_finite() => Self::Rainfall(mm),
            _ => Self::Missing,
        }
    }

    /// Message shown to the user for this outcome.
    pub fn message(self) -> String {
        match self {
            Self::Rainfall(mm) => format!("The predicted rainfall is {mm:.1}mm"),
            Self::Missing => "Could not retrieve a valid prediction from the API".to_string(),
        }
    }
}
