//! College model
//!
//! A college (or other institution) that offers courses in the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// College entity as stored in the `colleges` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct College {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// URL-friendly slug (unique)
    pub slug: String,
    /// Long-form description
    pub description: String,
    /// Logo image URL
    pub logo_url: Option<String>,
    /// Official website URL
    pub website_url: Option<String>,
    /// Accreditation text
    pub accreditation: String,
    /// Country the college is based in
    pub country: String,
    /// Highlighted on the home page
    pub featured: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl College {
    /// Check if the college has a non-blank logo URL
    pub fn has_logo(&self) -> bool {
        self.logo_url
            .as_deref()
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }
}
