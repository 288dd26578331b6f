//! Tennis player records ranked by points, served over HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod rank;
pub mod routes;
pub mod service;

pub use routes::router;
pub use service::{PlayerError, PlayerService};
