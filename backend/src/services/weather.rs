//! Forecast generation for the protected endpoint

use chrono::{DateTime, Duration, Utc};
use jwt_auth_shared::types::WeatherForecast;
use rand::Rng;

pub const FORECAST_DAYS: i64 = 5;
const MIN_TEMPERATURE_C: i32 = -20;
const MAX_TEMPERATURE_C: i32 = 55;

pub struct WeatherService;

impl WeatherService {
    /// Five daily forecasts starting the day after `today`
    pub fn forecast(today: DateTime<Utc>) -> Vec<WeatherForecast> {
        Self::forecast_with(&mut rand::thread_rng(), today)
    }

    pub fn forecast_with<R: Rng>(rng: &mut R, today: DateTime<Utc>) -> Vec<WeatherForecast> {
        (1..=FORECAST_DAYS)
            .map(|day| {
                WeatherForecast::new(
                    today + Duration::days(day),
                    rng.gen_range(MIN_TEMPERATURE_C..MAX_TEMPERATURE_C),
                )
            })
            .collect()
    }
}
