//! Domain layer: the storage contract for URL mappings.
//!
//! A mapping pairs one full URL with one short code. Both sides are unique and
//! a mapping never changes once written. The traits here define that contract;
//! implementations live in [`crate::infrastructure`].
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on transport layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod repositories;
