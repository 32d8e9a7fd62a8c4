//! HTTP handlers: public HTML pages, admin JSON API, health.

pub mod admin;
pub mod catalog;
pub mod detail;
pub mod health;
pub mod pages;

pub use health::health_routes;
