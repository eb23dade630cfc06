pub mod client;
pub mod error;
pub mod model;

pub use client::UserRegistrationApi;
pub use error::UserRegistrationError;
pub use model::{NewUser, Statistics, StatisticsQuery, Status, StatusChange, User};
