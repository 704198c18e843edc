//! Card Boosts - team boost inference and catalog normalization
//!
//! Classifies how each card boosts its team, scales boost magnitudes by rank
//! and evolution stage, sums them over a roster, and keeps the card catalog's
//! Support records carrying explicit boost fields.

pub mod boost;
pub mod catalog;
pub mod core;
pub mod maintenance;
