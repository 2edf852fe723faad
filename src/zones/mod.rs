//! Card zones.
//!
//! ## Key Types
//!
//! - `Zone`: a card's location (hand, deck, used pile, board cell, or a
//!   champion's bound lists)
//! - `ZoneViolation`: a broken single-zone invariant

pub mod manager;

pub use manager::{check_single_zone, locate, zone_index, Zone, ZoneViolation};
