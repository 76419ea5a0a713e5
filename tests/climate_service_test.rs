// Tests for ClimateService orchestration over the repositories

use hawaii_climate_service::db::{MeasurementRepository, StationRepository};
use hawaii_climate_service::services::ClimateService;

mod climate_service_fixtures {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    pub async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        sqlx::query(
            r#"
            CREATE TABLE measurement (
                id INTEGER PRIMARY KEY,
                station TEXT,
                date TEXT,
                prcp REAL,
                tobs REAL
            )
            "#,
        )
        .execute(&pool)
        .await
        .expect("Failed to create measurement table");

        sqlx::query(
            r#"
            CREATE TABLE station (
                id INTEGER PRIMARY KEY,
                station TEXT,
                name TEXT,
                latitude REAL,
                longitude REAL,
                elevation REAL
            )
            "#,
        )
        .execute(&pool)
        .await
        .expect("Failed to create station table");

        pool
    }

    pub async fn insert_measurement(
        pool: &SqlitePool,
        station_id: &str,
        date: &str,
        prcp: Option<f64>,
        tobs: Option<f64>,
    ) {
        sqlx::query(
            r#"
            INSERT INTO measurement (station, date, prcp, tobs)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(station_id)
        .bind(date)
        .bind(prcp)
        .bind(tobs)
        .execute(pool)
        .await
        .expect("Failed to insert measurement");
    }

    pub async fn insert_station(pool: &SqlitePool, station_id: &str, name: &str) {
        sqlx::query("INSERT INTO station (station, name) VALUES (?1, ?2)")
            .bind(station_id)
            .bind(name)
            .execute(pool)
            .await
            .expect("Failed to insert station");
    }

    pub fn build_service(pool: SqlitePool) -> super::ClimateService {
        let measurement_repo = super::MeasurementRepository::new(pool.clone());
        let station_repo = super::StationRepository::new(pool);
        super::ClimateService::new(measurement_repo, station_repo)
    }
}

#[tokio::test]
async fn test_precipitation_last_year_keeps_dates_sorted() {
    let pool = climate_service_fixtures::setup_test_db().await;
    climate_service_fixtures::insert_measurement(&pool, "USC00519281", "2017-08-23", Some(0.45), Some(76.0)).await;
    climate_service_fixtures::insert_measurement(&pool, "USC00519281", "2016-08-23", Some(0.7), Some(74.0)).await;
    climate_service_fixtures::insert_measurement(&pool, "USC00519281", "2017-01-15", Some(0.02), Some(68.0)).await;

    let service = climate_service_fixtures::build_service(pool);
    let precipitation = service.precipitation_last_year().await.unwrap();

    let dates: Vec<&String> = precipitation.keys().collect();
    assert_eq!(dates, vec!["2016-08-23", "2017-01-15", "2017-08-23"]);
}

#[tokio::test]
async fn test_precipitation_last_year_excludes_the_prior_year() {
    let pool = climate_service_fixtures::setup_test_db().await;
    climate_service_fixtures::insert_measurement(&pool, "USC00519281", "2016-08-22", Some(0.7), Some(74.0)).await;
    climate_service_fixtures::insert_measurement(&pool, "USC00519281", "2016-08-23", Some(0.05), Some(74.0)).await;

    let service = climate_service_fixtures::build_service(pool);
    let precipitation = service.precipitation_last_year().await.unwrap();

    assert_eq!(precipitation.len(), 1);
    assert_eq!(precipitation.get("2016-08-23"), Some(&Some(0.05)));
    assert!(!precipitation.contains_key("2016-08-22"));
}

#[tokio::test]
async fn test_station_ids_come_from_the_station_table() {
    let pool = climate_service_fixtures::setup_test_db().await;
    climate_service_fixtures::insert_station(&pool, "USC00519397", "WAIKIKI 717.2, HI US").await;
    climate_service_fixtures::insert_station(&pool, "USC00519281", "WAIHEE 837.5, HI US").await;
    // Measurements alone do not make a station
    climate_service_fixtures::insert_measurement(&pool, "USC00511918", "2017-01-01", Some(0.0), Some(72.0)).await;

    let service = climate_service_fixtures::build_service(pool);
    let station_ids = service.station_ids().await.unwrap();

    assert_eq!(station_ids, vec!["USC00519397", "USC00519281"]);
}

#[tokio::test]
async fn test_temperature_observations_follow_the_most_active_station() {
    let pool = climate_service_fixtures::setup_test_db().await;
    climate_service_fixtures::insert_measurement(&pool, "USC00519281", "2017-01-01", None, Some(66.0)).await;
    climate_service_fixtures::insert_measurement(&pool, "USC00519281", "2017-01-02", None, Some(67.0)).await;
    climate_service_fixtures::insert_measurement(&pool, "USC00519397", "2017-01-01", None, Some(80.0)).await;

    let service = climate_service_fixtures::build_service(pool);
    let observations = service.temperature_observations_last_year().await.unwrap();

    assert_eq!(observations.len(), 2);
    assert_eq!(observations.get("2017-01-01"), Some(&Some(66.0)));
    assert_eq!(observations.get("2017-01-02"), Some(&Some(67.0)));
}

#[tokio::test]
async fn test_temperature_observations_on_an_empty_dataset() {
    let pool = climate_service_fixtures::setup_test_db().await;

    let service = climate_service_fixtures::build_service(pool);
    let observations = service.temperature_observations_last_year().await.unwrap();

    assert!(observations.is_empty());
}

#[tokio::test]
async fn test_temperature_stats_forwards_both_bounds() {
    let pool = climate_service_fixtures::setup_test_db().await;
    climate_service_fixtures::insert_measurement(&pool, "USC00519281", "2017-01-01", None, Some(65.0)).await;
    climate_service_fixtures::insert_measurement(&pool, "USC00519281", "2017-02-01", None, Some(71.0)).await;
    climate_service_fixtures::insert_measurement(&pool, "USC00519281", "2017-03-01", None, Some(89.0)).await;

    let service = climate_service_fixtures::build_service(pool);

    let open_ended = service.temperature_stats("2017-01-01", None).await.unwrap();
    assert_eq!(open_ended.max, Some(89.0));

    let bounded = service
        .temperature_stats("2017-01-01", Some("2017-02-01"))
        .await
        .unwrap();
    assert_eq!(bounded.min, Some(65.0));
    assert_eq!(bounded.max, Some(71.0));
    assert_eq!(bounded.avg, Some(68.0));
}
