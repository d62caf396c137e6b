#![doc = "The `projectforge` library crate."]
#![doc = ""]
#![doc = "Domain models, bearer-token authentication, routing configuration and error"]
#![doc = "handling for the projectforge API. The binary (`main.rs`) wires them into an"]
#![doc = "actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;

pub use crate::config::Config;
pub use crate::error::AppError;
