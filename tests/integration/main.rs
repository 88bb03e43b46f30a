//! Integration tests for the page analyzer
//!
//! These tests use wiremock to serve target pages and link endpoints and
//! run full analyses against them.

mod link_check_tests;
