//! Typed client for the courses and lessons API.
//!
//! [`CoursesService`] issues requests through any [`http_client::HttpBackend`]
//! and decodes the answers into [`CourseRecord`] and [`LessonRecord`].
//! Every call returns a pending [`async_runtime::Promise`].
//!
//! # Examples
//!
//! ```
//! use async_runtime::VirtualScheduler;
//! use courses::{fixtures, CoursesService};
//! use http_client::testing::MockTransport;
//!
//! let scheduler = VirtualScheduler::new();
//! let transport = MockTransport::new(&scheduler);
//! let service = CoursesService::new(transport.clone());
//!
//! let course = service.find_course_by_id(12);
//! let course_12 = fixtures::find_course(12).unwrap();
//! transport
//!     .expect_one("/api/courses/12")
//!     .unwrap()
//!     .flush(serde_json::to_value(&course_12).unwrap())
//!     .unwrap();
//!
//! let course = course.result().unwrap().unwrap();
//! assert_eq!(course.titles.description, "Angular Testing Course");
//! transport.verify().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod card;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod records;
pub mod service;

pub use card::{course_cards, filter_by_category, CourseCard};
pub use config::ClientConfig;
pub use error::CourseError;
pub use records::{Category, CourseRecord, CourseTitles, Envelope, LessonRecord};
pub use service::{CoursesService, LessonQuery, SortOrder};
