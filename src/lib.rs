//! Courseboard - typed data access for a course catalog and review site
//!
//! This library provides configuration loading, the record types stored in
//! the hosted database, and read-only repositories over its REST endpoint.

pub mod config;
pub mod db;
pub mod models;
