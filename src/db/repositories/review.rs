//! Review repository
//!
//! Read access to `course_reviews` and `review_helpful_votes`. Only approved
//! reviews are ever returned for display.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::query::{Order, Query};
use crate::db::SupabaseClient;
use crate::models::{CourseReview, ReviewHelpfulVote, ReviewStatus, ReviewSummary};

const REVIEWS: &str = "course_reviews";
const VOTES: &str = "review_helpful_votes";

/// Review repository trait
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// List approved reviews for a course, newest first
    async fn list_approved_for_course(&self, course_id: Uuid) -> Result<Vec<CourseReview>>;

    /// Rating summary over a course's approved reviews
    async fn summary_for_course(&self, course_id: Uuid) -> Result<ReviewSummary>;

    /// List helpfulness votes cast on a review
    async fn votes_for_review(&self, review_id: Uuid) -> Result<Vec<ReviewHelpfulVote>>;
}

/// REST-backed review repository
pub struct RestReviewRepository {
    client: SupabaseClient,
}

impl RestReviewRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    pub fn boxed(client: SupabaseClient) -> Arc<dyn ReviewRepository> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl ReviewRepository for RestReviewRepository {
    async fn list_approved_for_course(&self, course_id: Uuid) -> Result<Vec<CourseReview>> {
        let query = Query::table(REVIEWS)
            .eq("course_id", course_id)
            .eq("status", ReviewStatus::Approved)
            .order("created_at", Order::Desc)
            .order("id", Order::Asc);
        self.client
            .select_all(&query)
            .await
            .with_context(|| format!("Failed to list reviews for course: {}", course_id))
    }

    async fn summary_for_course(&self, course_id: Uuid) -> Result<ReviewSummary> {
        let reviews = self.list_approved_for_course(course_id).await?;
        let summary = ReviewSummary::from_reviews(&reviews);
        tracing::debug!(
            course_id = %course_id,
            count = summary.count,
            "Computed review summary"
        );
        Ok(summary)
    }

    async fn votes_for_review(&self, review_id: Uuid) -> Result<Vec<ReviewHelpfulVote>> {
        let query = Query::table(VOTES)
            .eq("review_id", review_id)
            .order("created_at", Order::Asc)
            .order("id", Order::Asc);
        self.client
            .select_all(&query)
            .await
            .with_context(|| format!("Failed to list votes for review: {}", review_id))
    }
}
