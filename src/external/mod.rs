//! Clients for talking to external services

pub mod client;
