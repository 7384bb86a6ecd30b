//! HTTP integration tests, run against a live server with `cargo test -- --ignored`

mod api_tests;
