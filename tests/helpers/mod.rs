// Test Helper Modules
//
// Shared fixtures for the unit and integration suites.
//
// Usage (from a test target):
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code)]


pub use test_data::*;
