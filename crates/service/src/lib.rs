//! HTTP front end for the estimation engine

pub mod api;
pub mod config;
