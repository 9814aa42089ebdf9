//! Result rendering: tables for humans, JSON for scripts.

use charsheet_core::{Character, Entry, EntryKind};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
    println!("{text}");
    Ok(())
}

pub fn character_table(characters: &[Character]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Nom", "Prénom", "Âge", "Race", "Rang", "Créé (ms)"]);
    for character in characters {
        table.add_row(vec![
            character.id.to_string(),
            character.last_name.clone(),
            character.name.clone(),
            character.age.to_string(),
            character.race.clone(),
            character.adventurer_rank.clone(),
            character.date_created.to_string(),
        ]);
    }
    table
}

pub fn character_sheet(character: &Character) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Champ", "Valeur"]);
    let rows: [(&str, String); 18] = [
        ("id", character.id.to_string()),
        ("last_name", character.last_name.clone()),
        ("name", character.name.clone()),
        ("age", character.age.to_string()),
        ("race", character.race.clone()),
        ("social_class", character.social_class.clone()),
        ("talent", character.talent.clone()),
        ("adventurer_rank", character.adventurer_rank.clone()),
        ("strength", character.strength.clone()),
        ("speed", character.speed.clone()),
        ("resistance", character.resistance.clone()),
        ("sword_style", character.sword_style.clone()),
        ("smith_rank", character.smith_rank.clone()),
        ("alchemy_rank", character.alchemy_rank.clone()),
        ("mana_reserve", character.mana_reserve.clone()),
        ("mana_zone", character.mana_zone.clone()),
        ("magic_mastery", character.magic_mastery.clone()),
        ("date_created", character.date_created.to_string()),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    table
}

pub fn entry_table<K: EntryKind>(entries: &[Entry<K>]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Nom", "Contenu", "Créé (ms)"]);
    for entry in entries {
        table.add_row(vec![
            entry.id.to_string(),
            entry.name.clone(),
            entry.content.clone(),
            entry.date_created.to_string(),
        ]);
    }
    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}
