pub mod authentication;
pub mod configuration;
pub mod crud;
pub mod domain;
pub mod repository;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod utils;
