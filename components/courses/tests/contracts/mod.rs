//! Contract test runner for courses
