use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};
use sqlx::FromRow;

// Database entity models
/// One station's recorded precipitation and temperature for one date.
///
/// Dates keep the dataset's ISO-8601 text form; TEXT ordering matches
/// chronological ordering, so range filters happen directly in SQL.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Measurement {
    pub station_id: String,
    pub date: String,
    pub precipitation: Option<f64>,
    pub temperature: Option<f64>,
}

/// A physical weather-recording site. Routes only ever use `station_id`;
/// the rest is descriptive metadata carried along from the dataset.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Station {
    pub station_id: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

// API response DTOs
/// Aggregate over temperature observations for a date range.
///
/// Serializes as the fixed 3-element array `[min, max, avg]` rather than an
/// object; all three are `null` when no rows matched the range.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

impl Serialize for TemperatureStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut row = serializer.serialize_tuple(3)?;
        row.serialize_element(&self.min)?;
        row.serialize_element(&self.max)?;
        row.serialize_element(&self.avg)?;
        row.end()
    }
}
