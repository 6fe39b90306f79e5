//! Typed client for the courses and lessons API.

use crate::config::ClientConfig;
use crate::error::CourseError;
use crate::records::{CourseRecord, Envelope, LessonRecord};
use async_runtime::Promise;
use core_types::{HttpErrorResponse, HttpParams, HttpRequest, HttpResponse};
use http_client::HttpBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Lesson sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending by sequence number
    #[default]
    Asc,
    /// Descending by sequence number
    Desc,
}

impl SortOrder {
    /// Query-string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter and paging options for [`CoursesService::find_lessons`].
///
/// An unset page size falls back to
/// [`ClientConfig::default_page_size`].
///
/// # Examples
///
/// ```
/// use courses::{LessonQuery, SortOrder};
///
/// let query = LessonQuery::new().filter("intro").sort_order(SortOrder::Desc).page_size(5);
/// assert_eq!(query.page_number, 0);
/// assert_eq!(query.page_size, Some(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonQuery {
    /// Text the lesson description must contain
    pub filter: String,
    /// Sort direction
    pub sort_order: SortOrder,
    /// Zero-based page index
    pub page_number: u32,
    /// Lessons per page
    pub page_size: Option<u32>,
}

impl LessonQuery {
    /// Empty filter, ascending, first page, default page size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description filter.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Sets the sort direction.
    pub fn sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Sets the page index.
    pub fn page_number(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Client for the courses API.
///
/// Every method returns immediately with a pending [`Promise`]; it settles
/// once the backend answers. Failures always carry the response status and
/// reason phrase.
pub struct CoursesService<B> {
    backend: B,
    config: ClientConfig,
}

impl<B: HttpBackend> CoursesService<B> {
    /// Creates a client with the default configuration.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, ClientConfig::default())
    }

    /// Creates a client with `config`.
    pub fn with_config(backend: B, config: ClientConfig) -> Self {
        Self { backend, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET /api/courses`: every course, in server order.
    pub fn find_all_courses(&self) -> Promise<Vec<CourseRecord>, CourseError> {
        let request = HttpRequest::get(self.config.endpoint("courses"));
        let url = request.url_with_params();
        debug!(%url, "finding all courses");
        self.backend.send(request).map_result(move |outcome| {
            let response = outcome.map_err(http_error)?;
            decode::<Envelope<CourseRecord>>(&url, response).map(|envelope| envelope.payload)
        })
    }

    /// `GET /api/courses/{id}`.
    ///
    /// A 404 or an empty body fails with [`CourseError::NotFound`].
    pub fn find_course_by_id(&self, id: u32) -> Promise<CourseRecord, CourseError> {
        let request = HttpRequest::get(self.config.endpoint(&format!("courses/{}", id)));
        let url = request.url_with_params();
        debug!(id, "finding course");
        self.backend
            .send(request)
            .map_result(move |outcome| match outcome {
                Ok(response) if response.body.is_null() => Err(CourseError::NotFound {
                    id,
                    status: response.status,
                    message: "empty response body".to_string(),
                }),
                Ok(response) => decode(&url, response),
                Err(error) if error.is_not_found() => Err(CourseError::NotFound {
                    id,
                    status: error.status,
                    message: error.status_text,
                }),
                Err(error) => Err(http_error(error)),
            })
    }

    /// `PUT /api/courses/{id}` with `changes` as the body. Resolves with the
    /// merged record the server returns.
    ///
    /// Any non-2xx answer fails with [`CourseError::SaveFailed`].
    pub fn save_course<C>(&self, id: u32, changes: &C) -> Promise<CourseRecord, CourseError>
    where
        C: Serialize + ?Sized,
    {
        let body = match serde_json::to_value(changes) {
            Ok(body) => body,
            Err(err) => {
                return Promise::rejected(
                    self.backend.scheduler(),
                    CourseError::Encode {
                        id,
                        reason: err.to_string(),
                    },
                )
            }
        };
        let request = HttpRequest::put(self.config.endpoint(&format!("courses/{}", id)), body);
        let url = request.url_with_params();
        debug!(id, "saving course");
        self.backend
            .send(request)
            .map_result(move |outcome| match outcome {
                Ok(response) => decode(&url, response),
                Err(error) => Err(CourseError::SaveFailed {
                    id,
                    status: error.status,
                    message: error.status_text,
                }),
            })
    }

    /// `GET /api/lessons` for one page of a course's lessons.
    ///
    /// Sends `courseId`, `filter`, `sortOrder`, `pageNumber` and `pageSize`,
    /// in that order. Paging happens on the server.
    pub fn find_lessons(
        &self,
        course_id: u32,
        query: LessonQuery,
    ) -> Promise<Vec<LessonRecord>, CourseError> {
        let page_size = query.page_size.unwrap_or(self.config.default_page_size);
        let params = HttpParams::new()
            .set("courseId", course_id)
            .set("filter", query.filter)
            .set("sortOrder", query.sort_order)
            .set("pageNumber", query.page_number)
            .set("pageSize", page_size);
        let request = HttpRequest::get(self.config.endpoint("lessons")).with_params(params);
        let url = request.url_with_params();
        debug!(%url, "finding lessons");
        self.backend.send(request).map_result(move |outcome| {
            let response = outcome.map_err(http_error)?;
            decode::<Envelope<LessonRecord>>(&url, response).map(|envelope| envelope.payload)
        })
    }

    /// Every lesson of a course in one request.
    pub fn find_all_course_lessons(
        &self,
        course_id: u32,
    ) -> Promise<Vec<LessonRecord>, CourseError> {
        self.find_lessons(
            course_id,
            LessonQuery::new().page_size(self.config.all_lessons_page_size),
        )
    }
}

fn http_error(error: HttpErrorResponse) -> CourseError {
    CourseError::Http {
        url: error.url,
        status: error.status,
        message: error.status_text,
    }
}

fn decode<T: DeserializeOwned>(url: &str, response: HttpResponse) -> Result<T, CourseError> {
    serde_json::from_value(response.body).map_err(|err| CourseError::Decode {
        url: url.to_string(),
        reason: err.to_string(),
    })
}
