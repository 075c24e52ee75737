//! College repository
//!
//! Read access to the `colleges` table.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::db::query::{Order, Query};
use crate::db::SupabaseClient;
use crate::models::College;

const TABLE: &str = "colleges";

/// College repository trait
#[async_trait]
pub trait CollegeRepository: Send + Sync {
    /// List all colleges by name
    async fn list(&self) -> Result<Vec<College>>;

    /// List featured colleges by name
    async fn list_featured(&self) -> Result<Vec<College>>;

    /// Get college by slug
    async fn get_by_slug(&self, slug: &str) -> Result<Option<College>>;
}

/// REST-backed college repository
pub struct RestCollegeRepository {
    client: SupabaseClient,
}

impl RestCollegeRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(client: SupabaseClient) -> Arc<dyn CollegeRepository> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl CollegeRepository for RestCollegeRepository {
    async fn list(&self) -> Result<Vec<College>> {
        let query = Query::table(TABLE)
            .order("name", Order::Asc)
            .order("id", Order::Asc);
        self.client
            .select_all(&query)
            .await
            .context("Failed to list colleges")
    }

    async fn list_featured(&self) -> Result<Vec<College>> {
        let query = Query::table(TABLE)
            .eq("featured", true)
            .order("name", Order::Asc)
            .order("id", Order::Asc);
        self.client
            .select_all(&query)
            .await
            .context("Failed to list featured colleges")
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<College>> {
        let query = Query::table(TABLE).eq("slug", slug);
        self.client
            .select_one(&query)
            .await
            .with_context(|| format!("Failed to get college by slug: {}", slug))
    }
}
