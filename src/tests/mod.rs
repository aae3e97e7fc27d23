//! Page-level tests run against the in-memory document.

mod page_tests;
