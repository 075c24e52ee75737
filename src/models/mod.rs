//! Data models
//!
//! Typed mirrors of the rows stored in the hosted database:
//! - Catalog entities (College, CourseCategory, Course)
//! - Review entities (CourseReview, ReviewHelpfulVote)
//! - Read-side helpers (ReviewSummary, pagination)
//!
//! Rows are created and moderated outside this crate; these types only
//! describe their shape so query results are checked on decode.

mod category;
mod college;
mod course;
mod pagination;
mod review;
mod vote;

pub use category::CourseCategory;
pub use college::College;
pub use course::Course;
pub use pagination::{ListParams, PagedResult};
pub use review::{CourseReview, ReviewStatus, ReviewSummary};
pub use vote::{ReviewHelpfulVote, VoteType};

#[cfg(test)]
pub(crate) mod fixtures {
    //! Sample rows shared by model and repository tests

    pub(crate) use super::category::tests::category_json;
    pub(crate) use super::college::tests::college_json;
    pub(crate) use super::course::tests::{course_json, course_with_relations_json};
    pub(crate) use super::review::tests::review_json;
    pub(crate) use super::vote::tests::vote_json;
}
