//! Database repositories
//!
//! Read-only repositories over the hosted database's REST endpoint.
//! Each repository handles queries for a specific entity.

pub mod category;
pub mod college;
pub mod course;
pub mod review;

pub use category::{CategoryRepository, RestCategoryRepository};
pub use college::{CollegeRepository, RestCollegeRepository};
pub use course::{CourseRepository, RestCourseRepository};
pub use review::{RestReviewRepository, ReviewRepository};
