//! Integration tests for the live summary pipeline.
