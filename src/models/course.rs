//! Course model
//!
//! A course offered by a college. When fetched with embedded relations the
//! row also carries its college and category under the `colleges` and
//! `course_categories` keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{College, CourseCategory};

/// Course entity as stored in the `courses` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    /// Unique identifier
    pub id: Uuid,
    /// Offering college
    pub college_id: Uuid,
    /// Category, if the course has been categorized
    pub category_id: Option<Uuid>,
    pub title: String,
    /// URL-friendly slug
    pub slug: String,
    pub description: String,
    /// One-line teaser shown in listings
    pub short_description: String,
    /// Enrollment page on the college site
    pub course_url: Option<String>,
    pub image_url: Option<String>,
    /// Free-text duration, e.g. "6 weeks"
    pub duration: String,
    /// Free-text level, e.g. "Beginner"
    pub level: String,
    /// Free-text price, e.g. "Free" or "$49"
    pub price: String,
    pub certificate_available: bool,
    pub credits: Option<String>,
    pub featured: bool,
    pub views_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Embedded college (present only when the query joins it)
    #[serde(rename = "colleges", default, skip_serializing_if = "Option::is_none")]
    pub college: Option<College>,
    /// Embedded category (present only when the query joins it)
    #[serde(
        rename = "course_categories",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<CourseCategory>,
}

impl Course {
    /// Check if the free-text price denotes a free course
    pub fn is_free(&self) -> bool {
        let price = self.price.trim();
        price.is_empty() || price == "0" || price.eq_ignore_ascii_case("free")
    }

    /// Name of the embedded college, if it was joined
    pub fn college_name(&self) -> Option<&str> {
        self.college.as_ref().map(|c| c.name.as_str())
    }
}
