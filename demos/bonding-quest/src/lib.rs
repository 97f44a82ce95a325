use wasm_bindgen::prelude::*;

// Rules and data
pub mod chemistry;
pub mod config;
pub mod elements;
pub mod locale;
pub mod naming;

// Game flow
pub mod animation;
pub mod audio;
pub mod session;

// Main game controller
pub mod game;

pub use game::BondingQuest;

use elements::Category;

quest_web::export_game!(BondingQuest, "bonding-quest", config);

/// Translate a UI key in the game's current language.
#[wasm_bindgen]
pub fn quest_translate(key: &str) -> String {
    with_runner(|r| r.game().translate(key))
}

/// Picker tiles as JSON. `category` is a legend code (0..=3); any other
/// value lists every category.
#[wasm_bindgen]
pub fn quest_elements_json(term: &str, category: i32) -> String {
    let category = u32::try_from(category).ok().and_then(Category::from_code);
    with_runner(|r| r.game().element_cards_json(term, category))
}

/// Category legend as JSON, in filter-code order.
#[wasm_bindgen]
pub fn quest_legend_json() -> String {
    with_runner(|r| r.game().legend_json())
}
