// Library half of the console binary; also the surface the integration tests drive.
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod entities;
pub mod logging;
pub mod relationship;
pub mod render;
pub mod routes;
pub mod screens;
pub mod store;
