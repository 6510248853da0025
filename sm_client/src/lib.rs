//! Internal modules for the slot machine client.
//!
//! This library provides input parsing, configuration and the terminal
//! game loop used by the sm_client binary.

pub mod commands;
pub mod config;
pub mod terminal;
