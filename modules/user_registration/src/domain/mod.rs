pub mod error;
pub mod repo;
pub mod service;
pub mod statistics;
pub mod status;
pub mod validation;
