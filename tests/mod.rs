//! Test suite for daylog
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
