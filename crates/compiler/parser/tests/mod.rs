//! Integration tests for the Move parser.

pub mod common;
