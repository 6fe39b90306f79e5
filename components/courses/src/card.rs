//! Card projection of course records for list views.

use crate::records::{Category, CourseRecord};

/// Fields a course card binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCard {
    /// Course id
    pub id: u32,
    /// `titles.description` of the record
    pub title: String,
    /// `iconUrl` of the record
    pub icon_url: String,
    /// Difficulty
    pub category: Category,
}

impl From<&CourseRecord> for CourseCard {
    fn from(course: &CourseRecord) -> Self {
        Self {
            id: course.id,
            title: course.titles.description.clone(),
            icon_url: course.icon_url.clone(),
            category: course.category,
        }
    }
}

/// One card per record, in record order.
pub fn course_cards(courses: &[CourseRecord]) -> Vec<CourseCard> {
    courses.iter().map(CourseCard::from).collect()
}

/// Records in `category`, keeping their order.
pub fn filter_by_category(courses: &[CourseRecord], category: Category) -> Vec<CourseRecord> {
    courses
        .iter()
        .filter(|c| c.category == category)
        .cloned()
        .collect()
}
