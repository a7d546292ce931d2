//! Presence-based merge helpers.
//!
//! Update payloads carry every attribute as `Option<T>`: `None` means the
//! field was absent from the request and the stored value is kept, `Some(v)`
//! overwrites it, even when `v` is `false`, `0` or an empty string.
//!
//! Nullable attributes need one more level to tell "absent" from an explicit
//! `null`. Annotate them with
//! `#[serde(default, deserialize_with = "crate::patch::present")]` and type
//! them `Option<Option<T>>`.

use serde::{Deserialize, Deserializer};

/// Deserializes a field that was present in the payload, wrapping it in `Some`
/// so that an explicit `null` becomes `Some(None)`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Overwrites `slot` when the caller supplied a value.
pub fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "present")]
        note: Option<Option<String>>,
        count: Option<u32>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.note, None);

        let cleared: Probe = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(cleared.note, Some(None));

        let set: Probe = serde_json::from_str(r#"{"note": "x"}"#).unwrap();
        assert_eq!(set.note, Some(Some("x".to_string())));
    }

    #[test]
    fn apply_keeps_falsy_values() {
        let probe: Probe = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        let mut stored = 12;
        apply(&mut stored, probe.count);
        assert_eq!(stored, 0);

        let mut untouched = 7;
        apply(&mut untouched, None);
        assert_eq!(untouched, 7);
    }
}
