//! Request handlers, grouped by resource.

pub mod cases;
pub mod comments;
pub mod likes;
pub mod meta;
pub mod search;
pub mod stats;
pub mod visits;
