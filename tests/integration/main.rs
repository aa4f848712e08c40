//! Integration tests for the dump loader

mod load_tests;
