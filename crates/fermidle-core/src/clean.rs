//! Import raw values from the curated values sheet.
//!
//! The sheet is tab-separated with one row per thing. The `thing` column names
//! the row and `tags` is ignored; every other column is a measurement. A cell
//! holds comma-separated entries shaped like `specifier: number unit (note)`,
//! e.g. `max depth: 10994 m (Challenger Deep)`. Only the number is required.

use std::collections::HashMap;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, info};

use crate::model::{Quantity, RawValue};

const THING_COLUMN: &str = "thing";
const TAGS_COLUMN: &str = "tags";

/// A sheet entry that could not be read as a value.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenEntry {
    pub thing: String,
    pub measurement: String,
    pub text: String,
}

/// Everything read from one values sheet.
#[derive(Debug, Default)]
pub struct ImportedValues {
    pub values: Vec<RawValue>,
    pub broken: Vec<BrokenEntry>,
}

/// One parsed cell entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Lowercased qualifier before the colon, empty when absent.
    pub specifier: String,
    pub quantity: Quantity,
    /// Text inside the trailing parentheses.
    pub note: String,
}

fn entry_regex() -> &'static Regex {
    static ENTRY: OnceLock<Regex> = OnceLock::new();
    ENTRY.get_or_init(|| {
        let number = r"-?(?:0|[1-9]\d*)(?:\.\d+)?(?:[eE][+-]?\d+)?";
        Regex::new(&format!(
            r"^(?:(.*):)?\s*({number}(?:-{number})*)\s*(\S*)\s*(\(.*\))?$"
        ))
        .expect("entry regex is valid")
    })
}

/// Parse one entry. Ranges like `3-5` and zero values are rejected.
pub fn parse_entry(text: &str) -> Option<Entry> {
    let caps = entry_regex().captures(text.trim())?;
    let number: f64 = caps[2].parse().ok()?;
    if number == 0.0 {
        return None;
    }
    let specifier = caps
        .get(1)
        .map(|m| m.as_str().trim().to_lowercase())
        .unwrap_or_default();
    let note = caps
        .get(4)
        .map(|m| {
            let s = m.as_str();
            s[1..s.len() - 1].trim().to_string()
        })
        .unwrap_or_default();
    Some(Entry {
        specifier,
        quantity: Quantity::new(number, &caps[3]),
        note,
    })
}

/// Name used until a curated one is merged in, e.g. "max depth of Pacific Ocean".
fn default_name(thing: &str, measurement: &str, specifier: &str) -> String {
    let what = if specifier.is_empty() {
        measurement
    } else {
        specifier
    };
    format!("{what} of {thing}")
}

/// Read a tab-separated values sheet.
pub fn parse_values(content: &str) -> Result<ImportedValues> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("failed to read values sheet header")?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let thing_col = headers
        .iter()
        .position(|h| h == THING_COLUMN)
        .context("values sheet has no 'thing' column")?;

    let generated = chrono::Utc::now().to_rfc3339();
    let mut imported = ImportedValues::default();

    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read values sheet row {}", row + 2))?;
        let thing = match record.get(thing_col).map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => continue,
        };

        for (col, measurement) in headers.iter().enumerate() {
            if col == thing_col || measurement == TAGS_COLUMN || measurement.is_empty() {
                continue;
            }
            let Some(cell) = record.get(col) else {
                continue;
            };
            for text in cell.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let Some(entry) = parse_entry(text) else {
                    debug!(%thing, %measurement, text, "unreadable entry");
                    imported.broken.push(BrokenEntry {
                        thing: thing.clone(),
                        measurement: measurement.clone(),
                        text: text.to_string(),
                    });
                    continue;
                };
                let mut value = RawValue::new(&thing, measurement, entry.quantity)
                    .named(default_name(&thing, measurement, &entry.specifier))
                    .with_specifier(entry.specifier);
                value.note = entry.note;
                value.generated = generated.clone();
                imported.values.push(value);
            }
        }
    }

    info!(
        values = imported.values.len(),
        broken = imported.broken.len(),
        "read values sheet"
    );
    Ok(imported)
}

/// Carry curation over from a previous values file, matching on
/// [`RawValue::key`]. Name, quality and generation time come from the old
/// entry; its image wins when it has one. Returns how many values matched.
pub fn merge_existing(values: &mut [RawValue], existing: &[RawValue]) -> usize {
    let by_key: HashMap<_, &RawValue> = existing.iter().map(|v| (v.key(), v)).collect();
    let mut merged = 0;
    for value in values.iter_mut() {
        let Some(old) = by_key.get(&value.key()) else {
            continue;
        };
        if !old.name.is_empty() {
            value.name = old.name.clone();
        }
        value.quality = old.quality;
        value.generated = old.generated.clone();
        if !old.image.is_empty() {
            value.image = old.image.clone();
        }
        merged += 1;
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "Thing\tLength\tMass\tTags\n\
        Eiffel tower\t330 m\t7.3e6 kg\tbuilding\n\
        Pacific Ocean\tmax depth: 10994 m (Challenger Deep), width: 19800 km\t\tocean\n\
        Golf ball\t0.0427 m\t45.9 g, about 3-4 g, heavy\t\n\
        \t5 m\t\t\n";

    fn find<'a>(values: &'a [RawValue], thing: &str, measurement: &str, specifier: &str) -> &'a RawValue {
        values
            .iter()
            .find(|v| v.thing == thing && v.measurement == measurement && v.specifier == specifier)
            .unwrap_or_else(|| panic!("no value for {thing}/{measurement}/{specifier}"))
    }

    #[test]
    fn entry_with_everything() {
        let entry = parse_entry("Max depth: 10994 m (Challenger Deep)").unwrap();
        assert_eq!(entry.specifier, "max depth");
        assert_eq!(entry.quantity, Quantity::new(10994.0, "m"));
        assert_eq!(entry.note, "Challenger Deep");
    }

    #[test]
    fn entry_with_number_only() {
        let entry = parse_entry("42").unwrap();
        assert_eq!(entry.specifier, "");
        assert_eq!(entry.quantity, Quantity::new(42.0, ""));
        assert_eq!(entry.note, "");
    }

    #[test]
    fn entry_forms() {
        assert_eq!(parse_entry("5.97e24 kg").unwrap().quantity, Quantity::new(5.97e24, "kg"));
        assert_eq!(parse_entry("330m").unwrap().quantity, Quantity::new(330.0, "m"));
        assert_eq!(parse_entry("-89.2 C").unwrap().quantity, Quantity::new(-89.2, "C"));
        assert_eq!(parse_entry("  12 km/h  ").unwrap().quantity.units, "km/h");
    }

    #[test]
    fn unreadable_entries() {
        for text in ["3-4 g", "0 m", "heavy", "about 5 m", "330 m tall", "05 m", ""] {
            assert!(parse_entry(text).is_none(), "{text:?} should not parse");
        }
    }

    #[test]
    fn sheet_columns_become_measurements() {
        let imported = parse_values(SHEET).unwrap();
        assert_eq!(imported.values.len(), 6);

        let tower = find(&imported.values, "Eiffel tower", "length", "");
        assert_eq!(tower.quantity, Quantity::new(330.0, "m"));
        assert_eq!(tower.name, "length of Eiffel tower");
        assert!(!tower.generated.is_empty());

        let depth = find(&imported.values, "Pacific Ocean", "length", "max depth");
        assert_eq!(depth.note, "Challenger Deep");
        assert_eq!(depth.name, "max depth of Pacific Ocean");
        find(&imported.values, "Pacific Ocean", "length", "width");
        find(&imported.values, "Golf ball", "mass", "");

        assert!(imported.values.iter().all(|v| v.measurement != "tags"));
        assert!(imported.values.iter().all(|v| !v.thing.is_empty()));
    }

    #[test]
    fn sheet_collects_broken_entries() {
        let imported = parse_values(SHEET).unwrap();
        let broken: Vec<&str> = imported.broken.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(broken, vec!["about 3-4 g", "heavy"]);
        assert_eq!(imported.broken[0].thing, "Golf ball");
        assert_eq!(imported.broken[0].measurement, "mass");
    }

    #[test]
    fn sheet_without_thing_column_fails() {
        let err = parse_values("Name\tLength\nEiffel tower\t330 m\n").unwrap_err();
        assert!(format!("{err:#}").contains("'thing' column"));
    }

    #[test]
    fn merge_keeps_curation() {
        let mut fresh = parse_values(SHEET).unwrap().values;
        let mut old_tower = RawValue::new("Eiffel tower", "length", Quantity::new(324.0, "m"))
            .named("height of the Eiffel tower");
        old_tower.quality = 0.9;
        old_tower.generated = "2023-01-01T00:00:00+00:00".into();
        old_tower.image = "eiffel.jpg".into();
        let mut old_ball = RawValue::new("Golf ball", "mass", Quantity::new(45.0, "g"));
        old_ball.quality = 0.4;
        let stale = RawValue::new("Moon", "mass", Quantity::new(7.3e22, "kg")).named("mass of the Moon");

        let merged = merge_existing(&mut fresh, &[old_tower, old_ball, stale]);
        assert_eq!(merged, 2);

        let tower = find(&fresh, "Eiffel tower", "length", "");
        assert_eq!(tower.name, "height of the Eiffel tower");
        assert_eq!(tower.quality, 0.9);
        assert_eq!(tower.generated, "2023-01-01T00:00:00+00:00");
        assert_eq!(tower.image, "eiffel.jpg");
        // The sheet's number wins over the old one.
        assert_eq!(tower.quantity.value, 330.0);

        let ball = find(&fresh, "Golf ball", "mass", "");
        assert_eq!(ball.name, "mass of Golf ball");
        assert_eq!(ball.quality, 0.4);

        assert!(fresh.iter().all(|v| v.thing != "Moon"));
    }

    #[test]
    fn merge_with_nothing_existing() {
        let mut fresh = parse_values(SHEET).unwrap().values;
        let before = fresh.clone();
        assert_eq!(merge_existing(&mut fresh, &[]), 0);
        assert_eq!(fresh, before);
    }
}
