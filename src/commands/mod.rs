//! Handlers a UI shell invokes
//!
//! Each handler loads the whole collection it needs, applies one core
//! operation, and (for edits) writes the whole collection back. Errors come
//! back as display strings.

pub mod insights;
pub mod logs;
pub mod plan;
