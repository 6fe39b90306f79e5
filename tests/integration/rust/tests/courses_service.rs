//! Courses service integration tests
//!
//! Drives the course client through the mock transport end to end and
//! verifies that no request is left unanswered.

use async_runtime::VirtualScheduler;
use core_types::{ErrorSpec, HttpMethod};
use courses::{fixtures, CourseError, CoursesService, LessonQuery};
use http_client::testing::{MockTransport, RequestMatcher};
use http_client::TransportError;
use integration_tests::init_test_logging;
use serde_json::json;

struct Harness {
    scheduler: VirtualScheduler,
    transport: MockTransport,
    service: CoursesService<MockTransport>,
}

impl Harness {
    fn new() -> Self {
        init_test_logging();
        let scheduler = VirtualScheduler::new();
        let transport = MockTransport::new(&scheduler);
        let service = CoursesService::new(transport.clone());
        Self {
            scheduler,
            transport,
            service,
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            self.transport.verify().unwrap();
        }
    }
}

#[test]
fn retrieves_all_courses() {
    let h = Harness::new();
    let courses = h.service.find_all_courses();

    let req = h.transport.expect_one("/api/courses").unwrap();
    assert_eq!(req.method(), HttpMethod::Get);
    req.flush(fixtures::payload(&fixtures::courses())).unwrap();

    let courses = courses.result().unwrap().unwrap();
    assert_eq!(courses.len(), 12);
    let ids: Vec<_> = courses.iter().map(|c| c.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    let course = courses.iter().find(|c| c.id == 12).unwrap();
    assert_eq!(course.titles.description, "Angular Testing Course");
}

#[test]
fn finds_course_by_id() {
    let h = Harness::new();
    let course = h.service.find_course_by_id(12);

    let req = h.transport.expect_one("/api/courses/12").unwrap();
    assert_eq!(req.method(), HttpMethod::Get);
    req.flush(serde_json::to_value(fixtures::find_course(12).unwrap()).unwrap())
        .unwrap();

    assert_eq!(course.result().unwrap().unwrap().id, 12);
}

#[test]
fn saves_course() {
    let h = Harness::new();
    let changes = json!({"titles": {"description": "Testing Course"}});
    let saved = h.service.save_course(12, &changes);

    let req = h.transport.expect_one("/api/courses/12").unwrap();
    assert_eq!(req.method(), HttpMethod::Put);
    assert_eq!(
        req.body().unwrap()["titles"]["description"],
        json!("Testing Course")
    );

    let merged = fixtures::merge_changes(&fixtures::find_course(12).unwrap(), &changes).unwrap();
    req.flush(serde_json::to_value(&merged).unwrap()).unwrap();

    let saved = saved.result().unwrap().unwrap();
    assert_eq!(saved.id, 12);
    assert_eq!(saved.titles.description, "Testing Course");
}

#[test]
fn save_failure_reports_status() {
    let h = Harness::new();
    let changes = json!({"titles": {"description": "Testing Course"}});
    let saved = h.service.save_course(12, &changes);

    h.transport
        .expect_one("/api/courses/12")
        .unwrap()
        .flush_error(ErrorSpec::new(500, "Internal Server Error"))
        .unwrap();

    let err = saved.result().unwrap().unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(matches!(err, CourseError::SaveFailed { id: 12, .. }));
}

#[test]
fn finds_a_page_of_lessons() {
    let h = Harness::new();
    let lessons = h.service.find_lessons(12, LessonQuery::new().page_size(3));

    let req = h
        .transport
        .expect_one(RequestMatcher::predicate("GET /api/lessons", |req| {
            req.url == "/api/lessons"
        }))
        .unwrap();
    assert_eq!(req.method(), HttpMethod::Get);
    let params = req.params();
    assert_eq!(params.get("courseId"), Some("12"));
    assert_eq!(params.get("filter"), Some(""));
    assert_eq!(params.get("sortOrder"), Some("asc"));
    assert_eq!(params.get("pageNumber"), Some("0"));
    assert_eq!(params.get("pageSize"), Some("3"));
    assert_eq!(params.len(), 5);

    let page: Vec<_> = fixtures::find_lessons_for_course(12)
        .into_iter()
        .take(3)
        .collect();
    req.flush(fixtures::payload(&page)).unwrap();

    assert_eq!(lessons.result().unwrap().unwrap().len(), 3);
}

#[test]
fn answers_follow_flush_order() {
    let h = Harness::new();
    let all = h.service.find_all_courses();
    let one = h.service.find_course_by_id(3);

    let req = h.transport.expect_one("/api/courses/3").unwrap();
    req.flush(serde_json::to_value(fixtures::find_course(3).unwrap()).unwrap())
        .unwrap();
    assert!(all.is_pending());
    assert_eq!(one.result().unwrap().unwrap().id, 3);

    h.transport
        .expect_one("/api/courses")
        .unwrap()
        .flush(fixtures::payload(&fixtures::courses()))
        .unwrap();
    assert_eq!(all.result().unwrap().unwrap().len(), 12);
    assert!(!h.scheduler.has_pending_work());
}

#[test]
fn verify_names_unanswered_request() {
    init_test_logging();
    let scheduler = VirtualScheduler::new();
    let transport = MockTransport::new(&scheduler);
    let service = CoursesService::new(transport.clone());

    let _ = service.find_course_by_id(5);
    match transport.verify() {
        Err(TransportError::UnsatisfiedRequests { requests }) => {
            assert_eq!(requests, vec!["GET /api/courses/5".to_string()]);
        }
        other => panic!("expected unsatisfied requests, got {:?}", other),
    }
}

#[test]
fn flushing_twice_is_rejected() {
    let h = Harness::new();
    let _ = h.service.find_course_by_id(1);

    let req = h.transport.expect_one("/api/courses/1").unwrap();
    req.flush(serde_json::to_value(fixtures::find_course(1).unwrap()).unwrap())
        .unwrap();
    assert!(matches!(
        req.flush(json!(null)),
        Err(TransportError::UnknownRequest { .. })
    ));
}
