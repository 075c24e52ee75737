//! Database layer
//!
//! Access to the hosted database through its REST endpoint.
//!
//! # Architecture
//!
//! Configuration produces either a [`SupabaseClient`] directly (strict: a
//! missing credential is an error) or a [`DataSource`] (lenient: a missing
//! credential is recorded and surfaces as [`DbError::NotConfigured`] on use).
//! Repositories take an explicit client; there is no process-wide handle.
//!
//! # Usage
//!
//! ```ignore
//! use courseboard::config::Config;
//! use courseboard::db::{DataSource, repositories::{CourseRepository, RestCourseRepository}};
//!
//! let config = Config::from_env();
//! let source = DataSource::from_config(&config.database);
//! let courses = RestCourseRepository::new(source.client()?.clone());
//! let featured = courses.list_featured(6).await?;
//! ```

pub mod client;
pub mod error;
pub mod query;
pub mod repositories;
pub mod source;

pub use client::SupabaseClient;
pub use error::DbError;
pub use query::{Order, Query};
pub use source::DataSource;
