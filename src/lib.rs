pub mod advice;
pub mod api;
pub mod config;
pub mod error;
pub mod host;
pub mod models;
pub mod snapshot;
pub mod state;
pub mod web;
pub mod workers;
