// src/lib.rs

pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod enrollment;
pub mod query;
pub mod registry;
pub mod server;
