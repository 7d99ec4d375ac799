//! Route constraints.
//!
//! # Data Flow
//! ```text
//! Incoming Request
//!     → axum::Router (path template match, method dispatch)
//!     → constraint.rs (route layer: check captured segments)
//!     → matcher.rs (evaluate one segment)
//!     → handler, or 404 as if the route never matched
//! ```
//!
//! # Design Decisions
//! - Constraints are attached when a route is registered, never checked in handlers
//! - No regex: segment patterns are plain byte predicates
//! - A failed constraint is indistinguishable from an unmatched path

pub mod constraint;
pub mod matcher;

pub use constraint::{constrain, PathConstraint};
pub use matcher::{DigitsMatcher, SegmentMatcher};
