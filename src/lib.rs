#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(
    clippy::single_match_else,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod controllers;
pub mod data;
pub mod error;
pub mod gateway;
pub mod maud_conveniences;
pub mod reply;
pub mod routes;
pub mod state;
pub mod views;
