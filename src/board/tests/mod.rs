//! Unit tests for the board module.

mod support;

mod domain_tests;
mod selection_tests;
