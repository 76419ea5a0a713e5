use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::db::{DbError, MeasurementRepository, StationRepository, TemperatureStats};

/// Query facade over the two dataset tables.
///
/// Everything here is read-only; the dataset never changes underneath the
/// process, so repeated calls with the same arguments return the same data.
#[derive(Clone)]
pub struct ClimateService {
    measurement_repo: MeasurementRepository,
    station_repo: StationRepository,
}

impl ClimateService {
    pub fn new(measurement_repo: MeasurementRepository, station_repo: StationRepository) -> Self {
        Self {
            measurement_repo,
            station_repo,
        }
    }

    /// Precipitation by date over the final year of the dataset.
    ///
    /// When two measurements share a date the row encountered later wins.
    /// Keys come out in ascending date order.
    pub async fn precipitation_last_year(&self) -> Result<BTreeMap<String, Option<f64>>, DbError> {
        let measurements = self
            .measurement_repo
            .find_since(Self::one_year_window_start())
            .await?;

        Ok(measurements
            .into_iter()
            .map(|m| (m.date, m.precipitation))
            .collect())
    }

    /// Identifier of every station in the dataset, in storage order.
    pub async fn station_ids(&self) -> Result<Vec<String>, DbError> {
        let stations = self.station_repo.find_all().await?;

        Ok(stations.into_iter().map(|s| s.station_id).collect())
    }

    /// Temperature observations by date over the final year, restricted to
    /// the station with the most measurement rows.
    ///
    /// Comes back empty when the dataset holds no measurements at all.
    pub async fn temperature_observations_last_year(
        &self,
    ) -> Result<BTreeMap<String, Option<f64>>, DbError> {
        let Some(station_id) = self.measurement_repo.most_active_station().await? else {
            return Ok(BTreeMap::new());
        };

        let measurements = self
            .measurement_repo
            .find_for_station_since(&station_id, Self::one_year_window_start())
            .await?;

        Ok(measurements
            .into_iter()
            .map(|m| (m.date, m.temperature))
            .collect())
    }

    /// Min, max and average temperature from `start` onward, bounded above
    /// by `end` when given (both ends inclusive). The bounds are raw route
    /// input and are handed to the query untouched.
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, DbError> {
        self.measurement_repo.temperature_stats(start, end).await
    }

    // Business logic helpers (private)

    /// Latest date present in the dataset. Fixed by the dataset itself, not
    /// wall-clock time; the one-year routes anchor on it.
    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 8, 23).unwrap()
    }

    fn one_year_window_start() -> NaiveDate {
        Self::reference_date() - Duration::days(365)
    }
}
