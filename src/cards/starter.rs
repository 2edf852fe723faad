//! Built-in starter catalog.

use super::card::Card;
use super::catalog::{cards_json_to_objects, CatalogError};
use super::pool::CardPool;
use crate::core::GuidAllocator;

/// Starter card templates, one per card name.
pub const STARTER_CATALOG_JSON: &str = include_str!("starter_cards.json");

/// One card per starter template.
pub fn starter_catalog(guids: &mut GuidAllocator) -> Result<Vec<Card>, CatalogError> {
    cards_json_to_objects(STARTER_CATALOG_JSON, guids)
}

/// A deck-builder pool holding `copies` of every starter card except the
/// crystal, which every game creates on its own.
pub fn starter_pool(guids: &mut GuidAllocator, copies: usize) -> Result<CardPool, CatalogError> {
    let mut pool = CardPool::new();
    for _ in 0..copies {
        for card in starter_catalog(guids)? {
            if !super::is_crystal(&card) {
                pool.put(card);
            }
        }
    }
    Ok(pool)
}
