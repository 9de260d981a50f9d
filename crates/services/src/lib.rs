//! Use-case orchestration over the domain ports.
//!
//! Services validate input, enforce the domain invariants (slug uniqueness,
//! one like per IP) and leave persistence to the adapters behind the port
//! traits.

pub mod analytics;
pub mod cases;
pub mod engagement;
pub mod stats;

pub use analytics::AnalyticsService;
pub use cases::CaseService;
pub use engagement::{EngagementService, LikeStatus};
pub use stats::StatsService;
