//! Course repository
//!
//! Read access to the `courses` table. Every query embeds the course's
//! college and category so listing pages can render without extra requests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::query::{Order, Query};
use crate::db::SupabaseClient;
use crate::models::{Course, ListParams, PagedResult};

const TABLE: &str = "courses";

/// Columns selected for every course query
const COURSE_SELECT: &str = "*,colleges(*),course_categories(*)";

/// Course repository trait
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// List courses newest first with pagination
    async fn list(&self, params: &ListParams) -> Result<PagedResult<Course>>;

    /// List up to `limit` featured courses, newest first
    async fn list_featured(&self, limit: u64) -> Result<Vec<Course>>;

    /// Get course by slug
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Course>>;

    /// List courses offered by a college, by title
    async fn list_by_college(&self, college_id: Uuid) -> Result<Vec<Course>>;

    /// List courses in a category, by title
    async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Course>>;
}

/// REST-backed course repository
pub struct RestCourseRepository {
    client: SupabaseClient,
}

impl RestCourseRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    pub fn boxed(client: SupabaseClient) -> Arc<dyn CourseRepository> {
        Arc::new(Self::new(client))
    }

    fn base_query() -> Query {
        Query::table(TABLE).select(COURSE_SELECT)
    }
}

#[async_trait]
impl CourseRepository for RestCourseRepository {
    async fn list(&self, params: &ListParams) -> Result<PagedResult<Course>> {
        let total = self
            .client
            .count(&Query::table(TABLE).select("id"))
            .await
            .context("Failed to count courses")?;

        let query = Self::base_query()
            .order("created_at", Order::Desc)
            .order("id", Order::Asc)
            .limit(params.limit())
            .offset(params.offset());
        let items = self
            .client
            .select(&query)
            .await
            .with_context(|| format!("Failed to list courses (page {})", params.page))?;

        Ok(PagedResult::new(items, total, params))
    }

    async fn list_featured(&self, limit: u64) -> Result<Vec<Course>> {
        let query = Self::base_query()
            .eq("featured", true)
            .order("created_at", Order::Desc)
            .order("id", Order::Asc)
            .limit(limit);
        self.client
            .select(&query)
            .await
            .context("Failed to list featured courses")
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Course>> {
        let query = Self::base_query().eq("slug", slug);
        self.client
            .select_one(&query)
            .await
            .with_context(|| format!("Failed to get course by slug: {}", slug))
    }

    async fn list_by_college(&self, college_id: Uuid) -> Result<Vec<Course>> {
        let query = Self::base_query()
            .eq("college_id", college_id)
            .order("title", Order::Asc)
            .order("id", Order::Asc);
        self.client
            .select_all(&query)
            .await
            .with_context(|| format!("Failed to list courses for college: {}", college_id))
    }

    async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Course>> {
        let query = Self::base_query()
            .eq("category_id", category_id)
            .order("title", Order::Asc)
            .order("id", Order::Asc);
        self.client
            .select_all(&query)
            .await
            .with_context(|| format!("Failed to list courses for category: {}", category_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::client::test_support::spawn_test_server;
    use crate::models::fixtures::{course_json, course_with_relations_json};
    use axum::extract::RawQuery;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    const SELECT: &str = "select=*,colleges(*),course_categories(*)";
    const COLLEGE_ID: &str = "6f1c7a52-3c0e-4a8e-9d0a-2b5c1f0e9a11";
    const CATEGORY_ID: &str = "0b7e4c1d-8f5a-4b2e-a6d3-9c1e2f3a4b5c";

    fn rows_for(query: &str) -> Vec<Value> {
        let college = format!("{}&college_id=eq.{}&order=title.asc,id.asc&limit=1000&offset=0", SELECT, COLLEGE_ID);
        let category = format!("{}&category_id=eq.{}&order=title.asc,id.asc&limit=1000&offset=0", SELECT, CATEGORY_ID);
        let featured = format!("{}&featured=eq.true&order=created_at.desc,id.asc&limit=4", SELECT);
        let by_slug = format!("{}&slug=eq.intro-to-rust&limit=1", SELECT);
        let page_two = format!("{}&order=created_at.desc,id.asc&limit=2&offset=2", SELECT);

        if query == college || query == category || query == by_slug {
            vec![course_with_relations_json()]
        } else if query == featured {
            let mut row = course_with_relations_json();
            row["featured"] = json!(true);
            vec![row]
        } else if query == page_two {
            vec![course_with_relations_json(), course_json()]
        } else {
            vec![]
        }
    }

    async fn setup_test_repo() -> RestCourseRepository {
        let router = Router::new().route(
            "/rest/v1/courses",
            get(|RawQuery(query): RawQuery| async move {
                let query = query.unwrap_or_default();
                if query == "select=id&limit=0" {
                    return ([("content-range", "*/5".to_string())], Json(json!([])));
                }
                let rows = rows_for(&query);
                let range = format!("*/{}", rows.len());
                ([("content-range", range)], Json(json!(rows)))
            }),
        );
        RestCourseRepository::new(spawn_test_server(router).await)
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let repo = setup_test_repo().await;

        let page = repo.list(&ListParams::new(2, 2)).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.items[0].college.is_some());
        assert!(page.items[1].college.is_none());
    }

    #[tokio::test]
    async fn test_list_featured() {
        let repo = setup_test_repo().await;
        let courses = repo.list_featured(4).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert!(courses[0].featured);
    }

    #[tokio::test]
    async fn test_get_by_slug_embeds_relations() {
        let repo = setup_test_repo().await;

        let course = repo.get_by_slug("intro-to-rust").await.unwrap().unwrap();
        assert_eq!(course.college_name(), Some("Northfield College"));
        assert!(course.category.is_some());

        assert!(repo.get_by_slug("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_college_and_category() {
        let repo = setup_test_repo().await;

        let by_college = repo
            .list_by_college(Uuid::parse_str(COLLEGE_ID).unwrap())
            .await
            .unwrap();
        assert_eq!(by_college.len(), 1);

        let by_category = repo
            .list_by_category(Uuid::parse_str(CATEGORY_ID).unwrap())
            .await
            .unwrap();
        assert_eq!(by_category.len(), 1);

        let none = repo.list_by_category(Uuid::new_v4()).await.unwrap();
        assert!(none.is_empty());
    }
}
