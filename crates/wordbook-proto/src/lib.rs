//! Shared pieces of wordbook: the dictionary service contract, its HTTP
//! client, configuration and platform paths.

pub mod client;
pub mod config;
pub mod platform;
pub mod protocol;
