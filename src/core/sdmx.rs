//! Reader for SDMX-ML 2.1 generic data messages as served by the ECB.
//!
//! Only the observation level is read. Elements are matched by local name, so the
//! `message:`/`generic:` prefixes the service uses do not matter.

use crate::domain::Observation;
use crate::utils::error::{RateError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GenericData {
    #[serde(rename = "DataSet")]
    data_set: DataSet,
}

#[derive(Debug, Deserialize)]
struct DataSet {
    #[serde(rename = "Series", default)]
    series: Vec<Series>,
}

#[derive(Debug, Deserialize)]
struct Series {
    #[serde(rename = "Obs", default)]
    observations: Vec<Obs>,
}

#[derive(Debug, Deserialize)]
struct Obs {
    #[serde(rename = "ObsDimension")]
    dimension: Option<ValueAttribute>,
    #[serde(rename = "ObsValue")]
    value: Option<ValueAttribute>,
}

#[derive(Debug, Deserialize)]
struct ValueAttribute {
    value: String,
}

/// Extracts `(date, rate)` pairs in document order.
///
/// Observations without both a dimension and a value are skipped, as are the `NaN`
/// placeholders the service emits for days without a fixing.
pub fn parse_observations(body: &str) -> Result<Vec<Observation>> {
    let message: GenericData =
        serde_xml_rs::from_str(body).map_err(|e| RateError::Parse {
            message: e.to_string(),
        })?;

    let mut observations = Vec::new();
    for obs in message
        .data_set
        .series
        .into_iter()
        .flat_map(|series| series.observations)
    {
        let (Some(dimension), Some(value)) = (obs.dimension, obs.value) else {
            continue;
        };

        let rate: f64 = value.value.trim().parse().map_err(|_| RateError::Parse {
            message: format!(
                "observation {} has non-numeric value '{}'",
                dimension.value, value.value
            ),
        })?;

        if !rate.is_finite() {
            tracing::debug!("Skipping {} without a published rate", dimension.value);
            continue;
        }

        observations.push(Observation::new(dimension.value, rate));
    }

    Ok(observations)
}
