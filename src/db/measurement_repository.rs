use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::db::{DbError, Measurement, TemperatureStats};

#[derive(Clone)]
pub struct MeasurementRepository {
    pool: SqlitePool,
}

impl MeasurementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All measurements on or after `cutoff`, in storage order.
    #[instrument(skip(self))]
    pub async fn find_since(&self, cutoff: NaiveDate) -> Result<Vec<Measurement>, DbError> {
        debug!("Querying measurements since {}", cutoff);

        let measurements = sqlx::query_as::<_, Measurement>(
            r#"
            SELECT station AS station_id, date, prcp AS precipitation, tobs AS temperature
            FROM measurement
            WHERE date >= ?1
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} measurements", measurements.len());
        Ok(measurements)
    }

    /// Measurements for one station on or after `cutoff`, in storage order.
    #[instrument(skip(self), fields(station_id = %station_id))]
    pub async fn find_for_station_since(
        &self,
        station_id: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<Measurement>, DbError> {
        debug!("Querying measurements for station since {}", cutoff);

        let measurements = sqlx::query_as::<_, Measurement>(
            r#"
            SELECT station AS station_id, date, prcp AS precipitation, tobs AS temperature
            FROM measurement
            WHERE station = ?1 AND date >= ?2
            "#,
        )
        .bind(station_id)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} measurements", measurements.len());
        Ok(measurements)
    }

    /// Station id with the most measurement rows.
    ///
    /// `None` only when the measurement table is empty. Ties fall to
    /// whichever station the grouping yields first.
    #[instrument(skip(self))]
    pub async fn most_active_station(&self) -> Result<Option<String>, DbError> {
        debug!("Querying for most active station");

        let station = sqlx::query_scalar::<_, String>(
            r#"
            SELECT station
            FROM measurement
            GROUP BY station
            ORDER BY COUNT(station) DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        match &station {
            Some(station) => debug!("Most active station is {}", station),
            None => debug!("No measurements in dataset"),
        }

        Ok(station)
    }

    /// Min, max and average of temperature observations for dates in
    /// `[start, end]`, unbounded above when `end` is `None`.
    ///
    /// Bounds are compared as text against the stored dates, so an
    /// unparseable bound selects nothing and the aggregates come back NULL
    /// rather than failing.
    #[instrument(skip(self))]
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, DbError> {
        debug!("Querying temperature stats from {} to {:?}", start, end);

        let stats = match end {
            Some(end) => {
                sqlx::query_as::<_, TemperatureStats>(
                    r#"
                    SELECT MIN(tobs) AS "min", MAX(tobs) AS "max", AVG(tobs) AS "avg"
                    FROM measurement
                    WHERE date >= ?1 AND date <= ?2
                    "#,
                )
                .bind(start)
                .bind(end)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, TemperatureStats>(
                    r#"
                    SELECT MIN(tobs) AS "min", MAX(tobs) AS "max", AVG(tobs) AS "avg"
                    FROM measurement
                    WHERE date >= ?1
                    "#,
                )
                .bind(start)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(stats)
    }
}
