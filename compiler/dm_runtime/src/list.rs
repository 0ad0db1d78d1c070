//! List storage.
//!
//! A DM list is an ordered sequence that doubles as an associative map:
//! integer indices address the sequence (1-based), any other key addresses
//! the association. Assigning to a new key appends the key to the sequence,
//! so `for (k in L)` visits keys in insertion order.

use crate::errors::{RuntimeError, RuntimeResult};
use crate::value::DreamValue;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DreamList {
    values: Vec<DreamValue>,
    associative: FxHashMap<DreamValue, DreamValue>,
}

impl DreamList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: Vec<DreamValue>) -> Self {
        DreamList {
            values,
            associative: FxHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[DreamValue] {
        &self.values
    }

    pub fn is_associative(&self) -> bool {
        !self.associative.is_empty()
    }

    pub fn contains(&self, value: &DreamValue) -> bool {
        self.values.contains(value)
    }

    pub fn get_value(&self, index: &DreamValue) -> RuntimeResult<DreamValue> {
        if let Some(position) = self.position(index)? {
            return Ok(self.values[position].clone());
        }
        Ok(self.associative.get(index).cloned().unwrap_or_default())
    }

    pub fn set_value(&mut self, index: &DreamValue, value: DreamValue) -> RuntimeResult<()> {
        if let Some(position) = self.position(index)? {
            self.values[position] = value;
            return Ok(());
        }
        if !self.associative.contains_key(index) && !self.values.contains(index) {
            self.values.push(index.clone());
        }
        self.associative.insert(index.clone(), value);
        Ok(())
    }

    pub fn add_value(&mut self, value: DreamValue) {
        self.values.push(value);
    }

    /// Remove the first occurrence of `value` and its association.
    pub fn remove_value(&mut self, value: &DreamValue) -> bool {
        let Some(position) = self.values.iter().position(|entry| entry == value) else {
            return false;
        };
        self.values.remove(position);
        if !self.values.contains(value) {
            self.associative.remove(value);
        }
        true
    }

    /// Grow with nulls or truncate to `len` entries.
    pub fn resize(&mut self, len: usize) {
        self.values.resize(len, DreamValue::Null);
        let values = &self.values;
        self.associative.retain(|key, _| values.contains(key));
    }

    pub fn copy(&self) -> DreamList {
        self.clone()
    }

    /// Position in `values` for an integer index, `None` for associative keys.
    fn position(&self, index: &DreamValue) -> RuntimeResult<Option<usize>> {
        match index {
            DreamValue::Null => Err(RuntimeError::InvalidListIndex {
                index: index.to_string(),
            }),
            DreamValue::Integer(_) | DreamValue::Float(_) => {
                let Some(number) = index.as_list_index() else {
                    return Err(RuntimeError::InvalidListIndex {
                        index: index.to_string(),
                    });
                };
                match usize::try_from(number) {
                    Ok(position) if (1..=self.values.len()).contains(&position) => {
                        Ok(Some(position - 1))
                    }
                    _ => Err(RuntimeError::ListIndexOutOfRange {
                        index: number,
                        len: self.values.len(),
                    }),
                }
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests;
