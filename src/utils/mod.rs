//! Small helpers shared across layers.
//!
//! - [`db_error`] - Database error classification
//! - [`url_check`] - Input checks for submitted URLs

pub mod db_error;
pub mod url_check;
