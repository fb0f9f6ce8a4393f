//! Study Session Utility Functions
//!
//! ## Current API
//!
//! - Calculate SUS (System Usability Scale) scores
//! - Derive session identifiers
//!
pub mod session;
pub mod sus;
