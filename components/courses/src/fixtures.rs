//! Sample catalogue data for tests and demos.
//!
//! Mirrors what the API server seeds: twelve courses and a handful of lessons
//! per course. Course 12 is the "Angular Testing Course".

use crate::records::{Category, CourseRecord, CourseTitles, LessonRecord};
use serde::Serialize;
use serde_json::{json, Map, Value};

fn course(
    id: u32,
    seq_no: u32,
    description: &str,
    long_description: &str,
    icon: &str,
    category: Category,
    lessons_count: u32,
) -> CourseRecord {
    CourseRecord {
        id,
        seq_no,
        titles: CourseTitles {
            description: description.to_string(),
            long_description: Some(long_description.to_string()),
        },
        icon_url: format!("https://static.course-catalog.dev/images/{}.png", icon),
        course_list_icon: Some(format!(
            "https://static.course-catalog.dev/icons/{}-small.png",
            icon
        )),
        category,
        lessons_count,
        promo: false,
    }
}

/// All courses, ordered by id.
pub fn courses() -> Vec<CourseRecord> {
    vec![
        course(1, 4, "Serverless Angular with Firebase Course", "Serveless Angular with Firestore and Firebase Storage", "serverless-angular", Category::Intermediate, 10),
        course(2, 2, "Angular Core Deep Dive", "A detailed walk-through of the most important part of Angular - the Core and Common modules", "angular-core", Category::Beginner, 10),
        course(3, 3, "RxJs In Practice Course", "Understand the RxJs Observable pattern, learn the RxJs Operators via practical examples", "rxjs-in-practice", Category::Beginner, 10),
        course(4, 5, "NgRx In Depth", "Learn the modern Ngrx Ecosystem, including NgRx Data, Store, Effects, Router Store, Ngrx Entity, and Dev Tools.", "ngrx-in-depth", Category::Advanced, 10),
        course(5, 11, "Angular for Beginners", "Establish a solid layer of fundamentals, learn what's under the hood of Angular", "angular-for-beginners", Category::Beginner, 10),
        course(6, 6, "Angular Security Course - Web Security Fundamentals", "Learn Web Security Fundamentals and apply them to defend an Angular / Node Application from multiple types of attacks.", "angular-security", Category::Advanced, 11),
        course(7, 7, "Angular PWA - Progressive Web Apps Course", "Learn Angular Progressive Web Applications, build the future of the Web Today.", "angular-pwa", Category::Advanced, 8),
        course(8, 8, "Angular Advanced Library Laboratory: Build Your Own Library", "Learn Advanced Angular functionality typically used in Library Development. Advanced Components, Directives, Testing, Npm", "angular-advanced-library", Category::Advanced, 8),
        course(9, 9, "The Complete Typescript Course", "Complete Guide to Typescript From Scratch: Learn the language in-depth and use it to build a Node REST API.", "typescript-complete", Category::Beginner, 8),
        course(10, 10, "Rxjs and Reactive Patterns Angular Architecture Course", "Learn the core RxJs Observable Pattern as well and many other Design Patterns for building Reactive Angular Applications.", "rxjs-reactive-patterns", Category::Beginner, 8),
        course(11, 1, "Angular Material Course", "Build Applications with the official Angular Widget Library", "angular-material", Category::Beginner, 8),
        course(12, 0, "Angular Testing Course", "In-depth guide to Unit Testing and E2E Testing of Angular Applications", "angular-testing", Category::Beginner, 10),
    ]
}

/// The course with `id`, if any.
pub fn find_course(id: u32) -> Option<CourseRecord> {
    courses().into_iter().find(|c| c.id == id)
}

/// Courses ordered by catalogue position, as a list view shows them.
pub fn setup_courses() -> Vec<CourseRecord> {
    sort_courses_by_seq_no(courses())
}

/// Sorts `courses` by `seq_no`. Equal positions keep their relative order.
pub fn sort_courses_by_seq_no(mut courses: Vec<CourseRecord>) -> Vec<CourseRecord> {
    courses.sort_by(CourseRecord::cmp_by_seq_no);
    courses
}

fn lesson(id: u32, course_id: u32, seq_no: u32, description: &str, duration: &str) -> LessonRecord {
    LessonRecord {
        id,
        description: description.to_string(),
        duration: duration.to_string(),
        seq_no,
        course_id,
    }
}

/// All lessons, ordered by id.
pub fn lessons() -> Vec<LessonRecord> {
    vec![
        lesson(1, 12, 1, "Angular Testing Course - Helicopter View", "5:38"),
        lesson(2, 12, 2, "Setting up the Angular Testing Environment", "3:47"),
        lesson(3, 12, 3, "Writing Your First Jasmine Test", "6:02"),
        lesson(4, 12, 4, "Jasmine Spies and Test Doubles", "4:55"),
        lesson(5, 12, 5, "Testing Angular Services with Dependencies", "7:19"),
        lesson(6, 12, 6, "Testing HTTP Services with a Testing Backend", "8:41"),
        lesson(7, 12, 7, "Presentational Component Testing", "6:30"),
        lesson(8, 12, 8, "Testing Asynchronous Code with Virtual Time", "9:12"),
        lesson(9, 12, 9, "Microtasks versus Timers", "5:03"),
        lesson(10, 12, 10, "End to End Testing Overview", "4:26"),
        lesson(11, 2, 1, "Angular Core Deep Dive - Introduction", "2:41"),
        lesson(12, 2, 2, "Components and Templates", "6:14"),
        lesson(13, 2, 3, "Structural Directives", "5:58"),
        lesson(14, 3, 1, "RxJs In Practice - Course Overview", "3:09"),
        lesson(15, 3, 2, "Streams and Observables", "7:45"),
        lesson(16, 11, 1, "Angular Material - Installation and Setup", "4:02"),
    ]
}

/// Lessons of `course_id`, ordered by sequence number.
pub fn find_lessons_for_course(course_id: u32) -> Vec<LessonRecord> {
    let mut lessons: Vec<_> = lessons()
        .into_iter()
        .filter(|l| l.course_id == course_id)
        .collect();
    lessons.sort_by_key(|l| l.seq_no);
    lessons
}

/// Wraps records in the `{payload: [...]}` envelope list endpoints use.
pub fn payload<T: Serialize>(records: &[T]) -> Value {
    json!({ "payload": records })
}

/// Applies `changes` over `record` the way the server does on PUT: each
/// top-level key in `changes` replaces the record's value wholesale.
pub fn merge_changes(
    record: &CourseRecord,
    changes: &Value,
) -> Result<CourseRecord, serde_json::Error> {
    let mut merged: Map<String, Value> = match serde_json::to_value(record)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Value::Object(changes) = changes {
        for (key, value) in changes {
            merged.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(Value::Object(merged))
}
