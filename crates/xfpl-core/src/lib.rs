// Shared domain types and configuration for the xFPL workspace.

pub mod config;
pub mod player;
