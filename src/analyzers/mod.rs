//! Growth and correlation analytics.
//!
//! This module resolves valid comparison year ranges under missing data,
//! computes bounded growth ratios, aggregates multi-subject growth under a
//! configurable weighting, ranks districts, and classifies enrollment
//! variation ratios via threshold rules.

pub mod aggregate;
pub mod correlation;
pub mod growth;
pub mod query;
pub mod rank;
pub mod utility;
pub mod year_range;
