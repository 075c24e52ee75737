//! Course review model
//!
//! Reviews are submitted by site visitors and moderated externally. Only
//! approved reviews are shown on course pages.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Moderation status of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
    Spam,
}

impl Default for ReviewStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::Spam => write!(f, "spam"),
        }
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "spam" => Ok(Self::Spam),
            _ => Err(format!("Invalid review status: {}", s)),
        }
    }
}

/// Course review entity as stored in the `course_reviews` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseReview {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    /// Star rating, 1 to 5 (enforced by the database)
    pub rating: i32,
    pub review_title: String,
    pub review_text: String,
    pub verified_enrollment: bool,
    /// Calendar date of enrollment; timestamp values are cut to their date
    #[serde(default, deserialize_with = "deserialize_enrollment_date")]
    pub enrollment_date: Option<NaiveDate>,
    pub helpful_count: i64,
    pub not_helpful_count: i64,
    pub status: ReviewStatus,
    /// Moderator identity
    pub moderated_by: Option<String>,
    pub moderated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Accept a `date` column (`2024-02-15`) as well as a timestamp
/// (`2024-02-15T00:00:00+00:00`, with or without offset)
fn deserialize_enrollment_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|value| {
        parse_enrollment_date(&value)
            .ok_or_else(|| de::Error::custom(format!("invalid enrollment_date: {}", value)))
    })
    .transpose()
}

fn parse_enrollment_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

impl CourseReview {
    /// Check if the review is visible on the site
    pub fn is_published(&self) -> bool {
        self.status == ReviewStatus::Approved
    }

    /// Total helpful and not-helpful votes
    pub fn total_votes(&self) -> i64 {
        self.helpful_count + self.not_helpful_count
    }

    /// Share of votes that marked the review helpful, if any votes exist
    pub fn helpfulness_ratio(&self) -> Option<f64> {
        let total = self.total_votes();
        if total <= 0 {
            return None;
        }
        Some(self.helpful_count as f64 / total as f64)
    }
}

/// Aggregate rating for a course, computed from its approved reviews
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Number of approved reviews with a rating in 1..=5
    pub count: u32,
    /// Mean rating, `None` when there are no counted reviews
    pub average_rating: Option<f64>,
    /// Review count per star, index 0 is one star
    pub distribution: [u32; 5],
}

impl ReviewSummary {
    /// Build a summary from reviews; only approved reviews are counted
    pub fn from_reviews<'a, I>(reviews: I) -> Self
    where
        I: IntoIterator<Item = &'a CourseReview>,
    {
        let mut summary = Self::default();
        let mut total: i64 = 0;

        for review in reviews {
            if !review.is_published() || !(1..=5).contains(&review.rating) {
                continue;
            }
            summary.distribution[(review.rating - 1) as usize] += 1;
            summary.count += 1;
            total += review.rating as i64;
        }

        if summary.count > 0 {
            summary.average_rating = Some(total as f64 / summary.count as f64);
        }
        summary
    }
}
