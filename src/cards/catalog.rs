//! Catalog import: JSON card templates to typed `Card`s.
//!
//! ## Format
//!
//! The catalog is a JSON list. Each template carries a `type` discriminator
//! (`Champion`, `Crystal`, `Gear`, `Class`, `Action`, `Order`), a `name`, an
//! optional `image`, and the kind's fields in camelCase. Stat values use the
//! short names `str`, `dex`, `int` and `hp`.
//!
//! ```
//! use crystal_tactics::cards::cards_json_to_objects;
//! use crystal_tactics::core::GuidAllocator;
//!
//! let json = r#"[
//!     {"type": "Champion", "name": "Squire", "className": "Warrior",
//!      "str": 3, "dex": 2, "int": 1, "hp": 10},
//!     {"type": "Gear", "name": "Iron Sword", "bodyPart": "Hand",
//!      "category": "Sword", "str": 2}
//! ]"#;
//!
//! let mut guids = GuidAllocator::new();
//! let cards = cards_json_to_objects(json, &mut guids).unwrap();
//! assert_eq!(cards.len(), 2);
//! assert_eq!(cards[0].as_champion().unwrap().cal.strength, 3);
//! ```
//!
//! Each template becomes one physical card with a fresh guid. A deck that
//! runs three copies of a card lists its template three times.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::action::ActionCard;
use super::card::{Card, CardKind, CardType};
use super::champion::{Champion, Crystal, StatBlock};
use super::equipment::{BodyPart, ClassCard, Gear};
use super::order::OrderCard;
use crate::core::GuidAllocator;

/// Catalog import failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not a JSON list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("template {index} has no type")]
    MissingType { index: usize },

    #[error("template {index} has unknown type {type_name:?}")]
    UnknownType { index: usize, type_name: String },

    #[error("template {index} ({card_type}) is malformed: {source}")]
    Malformed {
        index: usize,
        card_type: CardType,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChampionTemplate {
    name: String,
    #[serde(default)]
    image: String,
    class_name: String,
    #[serde(flatten)]
    stats: StatBlock,
    #[serde(default)]
    learned_actions: Vec<String>,
}

#[derive(Deserialize)]
struct CrystalTemplate {
    name: String,
    #[serde(default)]
    image: String,
    hp: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GearTemplate {
    name: String,
    #[serde(default)]
    image: String,
    body_part: BodyPart,
    #[serde(default)]
    category: String,
    #[serde(flatten)]
    deltas: StatBlock,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassTemplate {
    name: String,
    #[serde(default)]
    image: String,
    class_name: String,
    required_class_name: String,
    #[serde(default)]
    learned_action: Option<String>,
    #[serde(flatten)]
    deltas: StatBlock,
}

#[derive(Deserialize)]
struct ActionTemplate {
    name: String,
    #[serde(default)]
    image: String,
    #[serde(flatten)]
    action: ActionCard,
}

#[derive(Deserialize)]
struct OrderTemplate {
    name: String,
    #[serde(default)]
    image: String,
    #[serde(flatten)]
    order: OrderCard,
}

/// Convert a JSON catalog into typed cards with fresh guids.
pub fn cards_json_to_objects(
    json: &str,
    guids: &mut GuidAllocator,
) -> Result<Vec<Card>, CatalogError> {
    let templates: Vec<Value> = serde_json::from_str(json)?;
    let mut cards = Vec::with_capacity(templates.len());

    for (index, template) in templates.into_iter().enumerate() {
        let type_name = template
            .get("type")
            .and_then(Value::as_str)
            .ok_or(CatalogError::MissingType { index })?;
        let card_type = CardType::from_str(type_name).map_err(|_| CatalogError::UnknownType {
            index,
            type_name: type_name.to_string(),
        })?;

        let (name, image, kind) = match card_type {
            CardType::Champion => {
                let t: ChampionTemplate = parse(index, card_type, template)?;
                let champion =
                    Champion::new(t.class_name, t.stats).with_learned_actions(t.learned_actions);
                (t.name, t.image, CardKind::Champion(champion))
            }
            CardType::Crystal => {
                let t: CrystalTemplate = parse(index, card_type, template)?;
                (t.name, t.image, CardKind::Crystal(Crystal::new(t.hp)))
            }
            CardType::Gear => {
                let t: GearTemplate = parse(index, card_type, template)?;
                let gear = Gear::new(t.body_part, t.category, t.deltas);
                (t.name, t.image, CardKind::Gear(gear))
            }
            CardType::Class => {
                let t: ClassTemplate = parse(index, card_type, template)?;
                let class = ClassCard {
                    class_name: t.class_name,
                    required_class_name: t.required_class_name,
                    deltas: t.deltas,
                    learned_action: t.learned_action,
                };
                (t.name, t.image, CardKind::Class(class))
            }
            CardType::Action => {
                let t: ActionTemplate = parse(index, card_type, template)?;
                (t.name, t.image, CardKind::Action(t.action))
            }
            CardType::Order => {
                let t: OrderTemplate = parse(index, card_type, template)?;
                (t.name, t.image, CardKind::Order(t.order))
            }
        };

        cards.push(Card::new(guids.alloc(), name, kind).with_image(image));
    }

    Ok(cards)
}

fn parse<T: DeserializeOwned>(
    index: usize,
    card_type: CardType,
    template: Value,
) -> Result<T, CatalogError> {
    serde_json::from_value(template).map_err(|source| CatalogError::Malformed {
        index,
        card_type,
        source,
    })
}
