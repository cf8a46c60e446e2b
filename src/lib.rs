//! SkillBridge client library
//!
//! Session storage, the API gateway and facades, route guarding, screen
//! state and rendering for the `skillbridge` command-line client.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod notifications;
pub mod output;
pub mod routes;
pub mod session;
pub mod theme;
pub mod views;
