//! Inter-snapshot constructor count deltas.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::ConstructorCounts;

/// Signed per-name differences between two constructor count sets,
/// category by category.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorCountsDelta {
    pub threejs: BTreeMap<String, i64>,
    pub game: BTreeMap<String, i64>,
    pub misc: BTreeMap<String, i64>,
}

/// Computes `current − previous` per name, per category.
///
/// A name is kept when its delta is nonzero OR it is currently present
/// at a positive count — so the report shows live instances even when
/// unchanged, while names that dropped to zero disappear. With no
/// previous counts (first snapshot of a session) every current entry
/// appears with its full count as the delta.
pub fn constructor_delta(
    current: &ConstructorCounts,
    previous: Option<&ConstructorCounts>,
) -> ConstructorCountsDelta {
    ConstructorCountsDelta {
        threejs: category_delta(&current.threejs, previous.map(|p| &p.threejs)),
        game: category_delta(&current.game, previous.map(|p| &p.game)),
        misc: category_delta(&current.misc, previous.map(|p| &p.misc)),
    }
}

fn category_delta(
    current: &BTreeMap<String, u64>,
    previous: Option<&BTreeMap<String, u64>>,
) -> BTreeMap<String, i64> {
    let empty = BTreeMap::new();
    let previous = previous.unwrap_or(&empty);

    let keys: BTreeSet<&String> = current.keys().chain(previous.keys()).collect();

    let mut deltas = BTreeMap::new();
    for key in keys {
        let current_val = *current.get(key).unwrap_or(&0) as i64;
        let previous_val = *previous.get(key).unwrap_or(&0) as i64;
        let diff = current_val - previous_val;
        if diff != 0 || current_val > 0 {
            deltas.insert(key.clone(), diff);
        }
    }
    deltas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(threejs: &[(&str, u64)], game: &[(&str, u64)]) -> ConstructorCounts {
        ConstructorCounts {
            threejs: threejs.iter().map(|&(k, v)| (k.to_string(), v)).collect(),
            game: game.iter().map(|&(k, v)| (k.to_string(), v)).collect(),
            misc: BTreeMap::new(),
        }
    }

    #[test]
    fn growth_yields_positive_delta() {
        let current = counts(&[("Mesh", 5)], &[]);
        let previous = counts(&[("Mesh", 3)], &[]);
        let delta = constructor_delta(&current, Some(&previous));
        assert_eq!(delta.threejs["Mesh"], 2);
    }

    #[test]
    fn no_previous_means_delta_equals_current() {
        let current = counts(&[("Mesh", 5)], &[("PlayerController", 2)]);
        let delta = constructor_delta(&current, None);
        assert_eq!(delta.threejs["Mesh"], 5);
        assert_eq!(delta.game["PlayerController"], 2);
    }

    #[test]
    fn present_but_unchanged_entries_are_retained_at_zero() {
        let current = counts(&[("Mesh", 3)], &[]);
        let previous = counts(&[("Mesh", 3)], &[("Foo", 1)]);
        let delta = constructor_delta(&current, Some(&previous));
        // Mesh is unchanged but currently present, so it shows as 0.
        assert_eq!(delta.threejs["Mesh"], 0);
        // Foo dropped to zero and is absent from current: it shows its
        // negative delta, not an omission.
        assert_eq!(delta.game["Foo"], -1);
    }

    #[test]
    fn absent_on_both_sides_is_omitted() {
        let current = counts(&[], &[]);
        let previous = counts(&[], &[]);
        let delta = constructor_delta(&current, Some(&previous));
        assert!(delta.threejs.is_empty());
        assert!(delta.game.is_empty());
        assert!(delta.misc.is_empty());
    }

    #[test]
    fn inputs_are_not_mutated() {
        let current = counts(&[("Mesh", 1)], &[]);
        let previous = counts(&[("Mesh", 2)], &[]);
        let before = (current.clone(), previous.clone());
        let _ = constructor_delta(&current, Some(&previous));
        assert_eq!(before, (current, previous));
    }
}
