//! Change recorder
//!
//! Runs a mutator against a copy of a root value and diffs the serialized
//! before/after trees into a forward [`Change`] and its rollback. The root is never
//! touched by a failing mutator.

use glyphcolor_model::{Change, ChangeOp, PathElement};
use serde::Serialize;
use serde_json::{Number, Value};

use crate::Result;

/// Forward and rollback change of one recorded edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord<D> {
    pub change: Change,
    pub rollback_change: Change,
    pub description: D,
}

impl<D> ChangeRecord<D> {
    /// False when the mutator produced no observable difference; both changes are
    /// empty then.
    pub fn has_change(&self) -> bool {
        !self.change.is_empty()
    }
}

/// A recorded edit together with the new value it produced.
#[derive(Debug, Clone)]
pub struct Recorded<T, D> {
    pub value: T,
    pub record: ChangeRecord<D>,
}

/// Records the changes `mutate` makes, without installing the result.
///
/// `mutate` receives a copy of `root`; the edited copy is returned in
/// [`Recorded::value`].
pub fn record<T, D, F>(root: &T, mutate: F) -> Result<Recorded<T, D>>
where
    T: Clone + Serialize,
    F: FnOnce(&mut T) -> Result<D>,
{
    let mut working = root.clone();
    let description = mutate(&mut working)?;

    let before = serde_json::to_value(root)?;
    let after = serde_json::to_value(&working)?;
    let (change, rollback_change) = diff(&before, &after);
    log::trace!("recorded {} change op(s)", change.ops().len());

    Ok(Recorded {
        value: working,
        record: ChangeRecord {
            change,
            rollback_change,
            description,
        },
    })
}

/// Records the changes `mutate` makes and installs the edited value into `root`.
pub fn record_changes<T, D, F>(root: &mut T, mutate: F) -> Result<ChangeRecord<D>>
where
    T: Clone + Serialize,
    F: FnOnce(&mut T) -> Result<D>,
{
    let recorded = record(&*root, mutate)?;
    if recorded.record.has_change() {
        *root = recorded.value;
    }
    Ok(recorded.record)
}

/// Diffs two trees into `(forward, rollback)`.
///
/// Objects are compared key by key and arrays of equal length element by element.
/// Every other difference becomes a whole-value set at that path.
pub fn diff(before: &Value, after: &Value) -> (Change, Change) {
    let mut forward = Vec::new();
    let mut rollback = Vec::new();
    let mut path = Vec::new();
    diff_into(&mut path, before, after, &mut forward, &mut rollback);
    rollback.reverse();
    (Change::new(forward), Change::new(rollback))
}

fn diff_into(path: &mut Vec<PathElement>, before: &Value, after: &Value, forward: &mut Vec<ChangeOp>, rollback: &mut Vec<ChangeOp>) {
    if before == after {
        return;
    }
    match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            for (key, old_value) in old {
                path.push(PathElement::Key(key.clone()));
                match new.get(key) {
                    Some(new_value) => diff_into(path, old_value, new_value, forward, rollback),
                    None => {
                        forward.push(ChangeOp::Delete { p: path.clone() });
                        rollback.push(ChangeOp::Set {
                            p: path.clone(),
                            v: old_value.clone(),
                        });
                    }
                }
                path.pop();
            }
            for (key, new_value) in new {
                if old.contains_key(key) {
                    continue;
                }
                path.push(PathElement::Key(key.clone()));
                forward.push(ChangeOp::Set {
                    p: path.clone(),
                    v: new_value.clone(),
                });
                rollback.push(ChangeOp::Delete { p: path.clone() });
                path.pop();
            }
        }
        (Value::Array(old), Value::Array(new)) if old.len() == new.len() => {
            for (i, (old_value, new_value)) in old.iter().zip(new).enumerate() {
                path.push(PathElement::Index(i));
                diff_into(path, old_value, new_value, forward, rollback);
                path.pop();
            }
        }
        (Value::Number(old), Value::Number(new)) if numbers_equal(old, new) => {}
        _ => {
            forward.push(ChangeOp::Set {
                p: path.clone(),
                v: after.clone(),
            });
            rollback.push(ChangeOp::Set {
                p: path.clone(),
                v: before.clone(),
            });
        }
    }
}

/// `0` and `0.0` are the same value. Integers are still compared exactly.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        a.as_f64() == b.as_f64()
    } else {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::EditError;

    #[test]
    fn test_identical_trees_produce_no_change() {
        let (forward, rollback) = diff(&json!({ "a": [1, 2] }), &json!({ "a": [1, 2] }));
        assert!(forward.is_empty());
        assert!(rollback.is_empty());
    }

    #[test]
    fn test_nested_value_change_is_addressed_by_path() {
        let (forward, rollback) = diff(&json!({ "a": { "b": [1, 2] } }), &json!({ "a": { "b": [1, 3] } }));
        assert_eq!(serde_json::to_value(&forward).unwrap(), json!([{ "f": "=", "p": ["a", "b", 1], "v": 3 }]));
        assert_eq!(serde_json::to_value(&rollback).unwrap(), json!([{ "f": "=", "p": ["a", "b", 1], "v": 2 }]));
    }

    #[test]
    fn test_added_and_removed_keys() {
        let before = json!({ "keep": 1, "gone": 2 });
        let after = json!({ "keep": 1, "new": 3 });
        let (forward, rollback) = diff(&before, &after);

        let mut tree = before.clone();
        forward.apply(&mut tree).unwrap();
        assert_eq!(tree, after);
        rollback.apply(&mut tree).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn test_integer_and_float_numbers_of_same_value_are_equal() {
        let (forward, rollback) = diff(&json!({ "c": [0, 0, 0, 1] }), &json!({ "c": [0.0, 0.0, 0.0, 1.0] }));
        assert!(forward.is_empty());
        assert!(rollback.is_empty());

        let (forward, _) = diff(&json!({ "c": [0, 1] }), &json!({ "c": [0.5, 1.0] }));
        assert_eq!(serde_json::to_value(&forward).unwrap(), json!([{ "f": "=", "p": ["c", 0], "v": 0.5 }]));
    }

    #[test]
    fn test_large_integers_are_compared_exactly() {
        let (forward, _) = diff(&json!({ "n": 9_007_199_254_740_993_u64 }), &json!({ "n": 9_007_199_254_740_992_u64 }));
        assert!(!forward.is_empty());
    }

    #[test]
    fn test_resized_array_is_replaced_whole() {
        let (forward, _) = diff(&json!({ "a": [1] }), &json!({ "a": [1, 2] }));
        assert_eq!(serde_json::to_value(&forward).unwrap(), json!([{ "f": "=", "p": ["a"], "v": [1, 2] }]));
    }

    #[test]
    fn test_record_changes_installs_value() {
        let mut root = json!({ "x": 1 });
        let record = record_changes(&mut root, |r| {
            r["x"] = json!(2);
            Ok("set x")
        })
        .unwrap();
        assert!(record.has_change());
        assert_eq!(record.description, "set x");
        assert_eq!(root, json!({ "x": 2 }));
    }

    #[test]
    fn test_failing_mutator_leaves_root_untouched() {
        let mut root = json!({ "x": 1 });
        let result: Result<ChangeRecord<()>> = record_changes(&mut root, |r| {
            r["x"] = json!(2);
            Err(EditError::generic("boom"))
        });
        assert!(result.is_err());
        assert_eq!(root, json!({ "x": 1 }));
    }
}
