//! Course category repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::db::query::{Order, Query};
use crate::db::SupabaseClient;
use crate::models::CourseCategory;

const TABLE: &str = "course_categories";

/// Category repository trait
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories by name
    async fn list(&self) -> Result<Vec<CourseCategory>>;

    /// Get category by slug
    async fn get_by_slug(&self, slug: &str) -> Result<Option<CourseCategory>>;
}

/// REST-backed category repository
pub struct RestCategoryRepository {
    client: SupabaseClient,
}

impl RestCategoryRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    pub fn boxed(client: SupabaseClient) -> Arc<dyn CategoryRepository> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl CategoryRepository for RestCategoryRepository {
    async fn list(&self) -> Result<Vec<CourseCategory>> {
        let query = Query::table(TABLE)
            .order("name", Order::Asc)
            .order("id", Order::Asc);
        self.client
            .select_all(&query)
            .await
            .context("Failed to list course categories")
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<CourseCategory>> {
        let query = Query::table(TABLE).eq("slug", slug);
        self.client
            .select_one(&query)
            .await
            .with_context(|| format!("Failed to get course category by slug: {}", slug))
    }
}
