//! Integration tests for the index pipeline and link discovery
//!
//! These tests write crawler-style page directories into temp dirs and run
//! the full build / serialize / reload cycle end-to-end.

mod links;
mod round_trip;
