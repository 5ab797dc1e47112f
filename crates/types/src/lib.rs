//! Foundation types for the GraphQL field finder.
//!
//! This crate provides shared types used across the finder crates.
//! It has zero external dependencies, making it suitable as a foundation layer.
//!
//! # Type Categories
//!
//! - **File types**: [`Language`]
//! - **Position types**: [`Position`], [`Range`]

mod file;
mod position;

pub use file::Language;
pub use position::{Position, Range};
