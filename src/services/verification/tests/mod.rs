//! Unit tests for the verification service
