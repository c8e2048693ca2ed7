pub mod active_client;
pub mod auth;
pub mod campaign;
pub mod contract;
pub mod potential_client;
pub mod service;
pub mod statistics;
