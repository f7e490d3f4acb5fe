//! Business logic services

pub mod user;
pub mod weather;

pub use user::UserService;
pub use weather::WeatherService;
