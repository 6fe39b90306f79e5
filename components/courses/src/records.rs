//! Course and lesson records as sent by the API.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Course difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Entry-level material
    Beginner,
    /// Assumes prior experience
    Intermediate,
    /// Expert-level material
    Advanced,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Beginner => f.write_str("BEGINNER"),
            Category::Intermediate => f.write_str("INTERMEDIATE"),
            Category::Advanced => f.write_str("ADVANCED"),
        }
    }
}

/// Display titles of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseTitles {
    /// Short title shown on cards
    pub description: String,
    /// Longer summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
}

/// A course. Identity is by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    /// Course id
    pub id: u32,
    /// Position in the catalogue
    pub seq_no: u32,
    /// Display titles
    pub titles: CourseTitles,
    /// Card image
    pub icon_url: String,
    /// Small icon used in list views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_list_icon: Option<String>,
    /// Difficulty
    pub category: Category,
    /// Number of lessons
    #[serde(default)]
    pub lessons_count: u32,
    /// Whether the course is currently promoted
    #[serde(default)]
    pub promo: bool,
}

impl CourseRecord {
    /// Orders courses by catalogue position.
    pub fn cmp_by_seq_no(a: &CourseRecord, b: &CourseRecord) -> Ordering {
        a.seq_no.cmp(&b.seq_no)
    }
}

/// A lesson belonging to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRecord {
    /// Lesson id
    pub id: u32,
    /// Lesson title
    pub description: String,
    /// Running time, e.g. `"4:17"`
    pub duration: String,
    /// Position within the course
    pub seq_no: u32,
    /// Owning course
    pub course_id: u32,
}

/// The `{payload: [...]}` wrapper list endpoints respond with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Records in server order
    pub payload: Vec<T>,
}
