//! Course category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Course category as stored in the `course_categories` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseCategory {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Icon identifier used by the site theme
    pub icon: String,
    pub created_at: DateTime<Utc>,
}
