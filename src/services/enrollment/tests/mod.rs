//! Unit tests for the enrollment service
