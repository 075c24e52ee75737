//! Review helpfulness vote model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a helpfulness vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteType {
    Helpful,
    NotHelpful,
}

impl std::fmt::Display for VoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Helpful => write!(f, "helpful"),
            Self::NotHelpful => write!(f, "not_helpful"),
        }
    }
}

impl std::str::FromStr for VoteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "helpful" => Ok(Self::Helpful),
            "not_helpful" => Ok(Self::NotHelpful),
            _ => Err(format!("Invalid vote type: {}", s)),
        }
    }
}

/// Vote entity as stored in the `review_helpful_votes` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewHelpfulVote {
    pub id: Uuid,
    pub review_id: Uuid,
    /// Anonymous voter fingerprint
    pub user_identifier: String,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{json, Value};

    pub(crate) fn vote_json() -> Value {
        json!({
            "id": "d00d0000-0000-4000-8000-0000000000aa",
            "review_id": "c0ffee00-0000-4000-8000-000000000001",
            "user_identifier": "fp-8c2e",
            "vote_type": "not_helpful",
            "created_at": "2024-03-06T11:15:00Z"
        })
    }

    #[test]
    fn test_vote_deserializes_from_row() {
        let vote: ReviewHelpfulVote = serde_json::from_value(vote_json()).unwrap();
        assert_eq!(vote.vote_type, VoteType::NotHelpful);
        assert_eq!(vote.user_identifier, "fp-8c2e");
    }

    #[test]
    fn test_vote_missing_required_field_is_rejected() {
        let mut row = vote_json();
        row.as_object_mut().unwrap().remove("vote_type");

        let err = serde_json::from_value::<ReviewHelpfulVote>(row).unwrap_err();
        assert!(err.to_string().contains("missing field `vote_type`"));
    }

    #[test]
    fn test_vote_type_rejects_unknown_value() {
        let mut row = vote_json();
        row["vote_type"] = json!("unhelpful");
        assert!(serde_json::from_value::<ReviewHelpfulVote>(row).is_err());
    }

    #[test]
    fn test_vote_type_display_and_parse() {
        assert_eq!(VoteType::NotHelpful.to_string(), "not_helpful");
        assert_eq!("Helpful".parse::<VoteType>(), Ok(VoteType::Helpful));
        assert!("meh".parse::<VoteType>().is_err());
        assert_eq!(
            serde_json::to_value(VoteType::NotHelpful).unwrap(),
            json!("not_helpful")
        );
    }
}
