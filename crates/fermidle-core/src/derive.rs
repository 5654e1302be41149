//! Derived values.
//!
//! Fills gaps in the raw values before generation: a thing with a mass and a
//! volume but no density gets one computed, and bare `min`/`max` specifiers
//! are qualified with their measurement so names stay unambiguous.

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{Quantity, RawValue};

/// Note attached to computed values.
pub const AUTO_NOTE: &str = "auto";

/// Apply every derivation and return the extended list.
///
/// Derived values are appended after the originals, grouped by thing.
pub fn derive_values(mut values: Vec<RawValue>) -> Vec<RawValue> {
    qualify_min_max(&mut values);

    let mut by_thing: BTreeMap<&str, Vec<&RawValue>> = BTreeMap::new();
    for value in &values {
        by_thing.entry(value.thing.as_str()).or_default().push(value);
    }

    let derived: Vec<RawValue> = by_thing
        .iter()
        .filter_map(|(thing, thing_values)| density(thing, thing_values))
        .collect();

    debug!(derived = derived.len(), "derived values");
    values.extend(derived);
    values
}

/// The unqualified value of a measurement, if the thing has one.
fn canonical<'a>(values: &[&'a RawValue], measurement: &str) -> Option<&'a RawValue> {
    values
        .iter()
        .find(|v| v.measurement == measurement && v.specifier.is_empty())
        .copied()
}

fn density(thing: &str, values: &[&RawValue]) -> Option<RawValue> {
    if values.iter().any(|v| v.measurement == "density") {
        return None;
    }
    let mass = canonical(values, "mass")?;
    let volume = canonical(values, "volume")?;
    if volume.quantity.value <= 0.0 {
        return None;
    }
    let units = format!("{}/{}", mass.quantity.units, volume.quantity.units);
    let mut value = RawValue::new(
        thing,
        "density",
        Quantity::new(mass.quantity.value / volume.quantity.value, units),
    )
    .named(format!("average density of {thing}"))
    .with_specifier("avg");
    value.note = AUTO_NOTE.to_string();
    Some(value)
}

fn qualify_min_max(values: &mut [RawValue]) {
    for value in values {
        if value.specifier == "min" || value.specifier == "max" {
            value.specifier = format!("{} {}", value.specifier, value.measurement);
        }
    }
}
