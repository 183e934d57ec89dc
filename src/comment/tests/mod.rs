//! Unit tests for the comment module.
