//! classboard - a small school portal over flat files
//!
//! - [`table`]: delimiter-separated record tables
//! - [`auth`]: accounts, password digests and cookie sessions
//! - [`contact`]: the public contact form and its inbox
//! - [`students`]: the student CRUD and read-only school records
//! - [`http_server`]: axum routes and HTML pages
//! - [`cli`]: `init` and `serve`

pub mod auth;
pub mod cli;
pub mod config;
pub mod contact;
pub mod http_server;
pub mod json_store;
pub mod students;
pub mod table;
