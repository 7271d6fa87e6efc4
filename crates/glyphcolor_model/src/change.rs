//! Structural document changes.
//!
//! A [`Change`] is a list of operations, each addressed by a path of object keys and
//! array indices into the serialized document tree. Forward and rollback changes
//! share this representation, so the same code applies both.

use std::fmt::Display;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{ModelError, Result};

/// One step of a change path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathElement {
    Index(usize),
    Key(String),
}

impl Display for PathElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathElement::Index(i) => write!(f, "{i}"),
            PathElement::Key(k) => write!(f, "{k:?}"),
        }
    }
}

impl From<&str> for PathElement {
    fn from(value: &str) -> Self {
        PathElement::Key(value.to_string())
    }
}

impl From<String> for PathElement {
    fn from(value: String) -> Self {
        PathElement::Key(value)
    }
}

impl From<usize> for PathElement {
    fn from(value: usize) -> Self {
        PathElement::Index(value)
    }
}

fn format_path(path: &[PathElement]) -> String {
    let parts: Vec<String> = path.iter().map(|p| p.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// A single structural edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "f")]
pub enum ChangeOp {
    /// Replace or insert the value at `p`. An empty path replaces the root.
    #[serde(rename = "=")]
    Set { p: Vec<PathElement>, v: Value },
    /// Remove the object key or array element at `p`.
    #[serde(rename = "d")]
    Delete { p: Vec<PathElement> },
}

impl ChangeOp {
    pub fn path(&self) -> &[PathElement] {
        match self {
            ChangeOp::Set { p, .. } | ChangeOp::Delete { p } => p,
        }
    }

    fn prefixed(&self, prefix: &[PathElement]) -> ChangeOp {
        let join = |p: &[PathElement]| prefix.iter().chain(p.iter()).cloned().collect();
        match self {
            ChangeOp::Set { p, v } => ChangeOp::Set { p: join(p), v: v.clone() },
            ChangeOp::Delete { p } => ChangeOp::Delete { p: join(p) },
        }
    }

    fn apply(&self, root: &mut Value) -> Result<()> {
        match self {
            ChangeOp::Set { p, v } => {
                let Some((last, parent_path)) = p.split_last() else {
                    *root = v.clone();
                    return Ok(());
                };
                let parent = resolve_mut(root, parent_path)?;
                match (parent, last) {
                    (Value::Object(map), PathElement::Key(key)) => {
                        map.insert(key.clone(), v.clone());
                    }
                    (Value::Array(items), PathElement::Index(i)) if *i < items.len() => items[*i] = v.clone(),
                    (Value::Array(items), PathElement::Index(i)) if *i == items.len() => items.push(v.clone()),
                    _ => return Err(ModelError::invalid_path(format_path(p), "cannot set value here")),
                }
            }
            ChangeOp::Delete { p } => {
                let Some((last, parent_path)) = p.split_last() else {
                    return Err(ModelError::invalid_path(format_path(p), "cannot delete the root"));
                };
                let parent = resolve_mut(root, parent_path)?;
                match (parent, last) {
                    (Value::Object(map), PathElement::Key(key)) => {
                        if map.remove(key).is_none() {
                            return Err(ModelError::PathNotFound { path: format_path(p) });
                        }
                    }
                    (Value::Array(items), PathElement::Index(i)) if *i < items.len() => {
                        items.remove(*i);
                    }
                    _ => return Err(ModelError::PathNotFound { path: format_path(p) }),
                }
            }
        }
        Ok(())
    }
}

fn resolve_mut<'a>(root: &'a mut Value, path: &[PathElement]) -> Result<&'a mut Value> {
    let mut cur = root;
    for (depth, element) in path.iter().enumerate() {
        let next = match (cur, element) {
            (Value::Object(map), PathElement::Key(key)) => map.get_mut(key),
            (Value::Array(items), PathElement::Index(i)) => items.get_mut(*i),
            _ => None,
        };
        cur = next.ok_or_else(|| ModelError::PathNotFound {
            path: format_path(&path[..=depth]),
        })?;
    }
    Ok(cur)
}

/// An ordered list of [`ChangeOp`]s applied as one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Change {
    ops: Vec<ChangeOp>,
}

impl Change {
    pub fn new(ops: Vec<ChangeOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[ChangeOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The same change, addressed relative to a parent object at `prefix`.
    pub fn prefixed(&self, prefix: &[PathElement]) -> Change {
        Change {
            ops: self.ops.iter().map(|op| op.prefixed(prefix)).collect(),
        }
    }

    /// Concatenates two changes, `self` first.
    pub fn then(mut self, other: Change) -> Change {
        self.ops.extend(other.ops);
        self
    }

    /// Applies every op in order.
    ///
    /// The tree is modified in place; on error the ops before the failing one stay
    /// applied. Use [`Change::apply_to`] for all-or-nothing semantics.
    pub fn apply(&self, root: &mut Value) -> Result<()> {
        for op in &self.ops {
            op.apply(root)?;
        }
        Ok(())
    }

    /// Applies the change to a typed value through its serialized form.
    ///
    /// `target` is only replaced once every op applied and the result deserialized.
    pub fn apply_to<T: Serialize + DeserializeOwned>(&self, target: &mut T) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        let mut tree = serde_json::to_value(&*target)?;
        self.apply(&mut tree)?;
        *target = serde_json::from_value(tree)?;
        Ok(())
    }
}
