//! Canonical JSON encoding used for transaction hashing.
//!
//! Rules:
//! - object keys sorted lexicographically by their UTF-8 bytes, at every level
//! - no insignificant whitespace
//! - strings escaped exactly as `serde_json` escapes them
//! - integers in plain decimal; floating point numbers are rejected
//!
//! Key order is imposed here rather than inherited from `serde_json::Map`.
//! The default `Map` already iterates sorted; the explicit sort matters once
//! any crate in the build enables `serde_json/preserve_order`.

use serde::Serialize;
use serde_json::Value;

use crate::error::TransactionError;

/// Canonicalize any serializable value.
pub fn canonicalize<T: Serialize + ?Sized>(value: &T) -> Result<String, TransactionError> {
    let value =
        serde_json::to_value(value).map_err(|e| TransactionError::Serialization(e.to_string()))?;
    canonicalize_value(&value)
}

/// Canonicalize an already-built JSON value.
pub fn canonicalize_value(value: &Value) -> Result<String, TransactionError> {
    let mut out = String::with_capacity(256);
    write_value(value, &mut out)?;
    Ok(out)
}

fn write_value(value: &Value, out: &mut String) -> Result<(), TransactionError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => {
            if n.is_f64() {
                return Err(TransactionError::NonCanonicalNumber(n.to_string()));
            }
            out.push_str(&n.to_string());
        }
        Value::String(s) => write_string(s, out)?,
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in sorted_entries(map.iter()).into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out)?;
                out.push(':');
                write_value(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

/// Object entries ordered by the UTF-8 bytes of their keys, whatever order
/// they arrive in.
fn sorted_entries<'a, K, I>(entries: I) -> Vec<(&'a K, &'a Value)>
where
    K: AsRef<str> + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a Value)>,
{
    let mut entries: Vec<_> = entries.into_iter().collect();
    entries.sort_by(|a, b| a.0.as_ref().as_bytes().cmp(b.0.as_ref().as_bytes()));
    entries
}

fn write_string(s: &str, out: &mut String) -> Result<(), TransactionError> {
    let escaped =
        serde_json::to_string(s).map_err(|e| TransactionError::Serialization(e.to_string()))?;
    out.push_str(&escaped);
    Ok(())
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Sorting does not depend on the order entries are handed over.
        #[test]
        fn any_permutation_sorts_the_same(
            keys in proptest::collection::btree_set("[a-zA-Z_é]{1,6}", 1..12),
            seed in any::<u64>(),
        ) {
            let value = Value::Null;
            let keys: Vec<String> = keys.into_iter().collect();
            let mut shuffled: Vec<&String> = keys.iter().collect();
            // Deterministic Fisher-Yates from the seed.
            let mut state = seed | 1;
            for i in (1..shuffled.len()).rev() {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                shuffled.swap(i, (state % (i as u64 + 1)) as usize);
            }

            let sorted: Vec<&String> = sorted_entries(shuffled.into_iter().map(|k| (k, &value)))
                .into_iter()
                .map(|(k, _)| k)
                .collect();
            let mut expected: Vec<&String> = keys.iter().collect();
            expected.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
            prop_assert_eq!(sorted, expected);
        }
    }
}
