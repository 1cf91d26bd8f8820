use serde::{Deserialize, Serialize};

use crate::types::KeyCode;

/// Largest number of keys a combo may hold.
pub const MAX_SEQUENCE_LEN: usize = 5;

/// Errors from building a key sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("key sequence must hold 1 to 5 keys, got {0}")]
    InvalidLength(usize),
}

/// A shortcut descriptor: up to five keys that must all be held at once.
///
/// Unused slots are always `KeyCode::UNKNOWN`, so the derived equality is
/// length-then-elementwise. Serialized as a plain list of key codes;
/// deserializing goes through [`KeySequence::try_new`], so the empty
/// sequence does not round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<KeyCode>", into = "Vec<KeyCode>")]
pub struct KeySequence {
    keys: [KeyCode; MAX_SEQUENCE_LEN],
    len: u8,
}

impl KeySequence {
    /// The empty (invalid) sequence.
    pub const EMPTY: KeySequence = KeySequence {
        keys: [KeyCode::UNKNOWN; MAX_SEQUENCE_LEN],
        len: 0,
    };

    /// Build a sequence, rejecting an empty slice or one longer than five keys.
    pub fn try_new(keys: &[KeyCode]) -> Result<Self, SequenceError> {
        if keys.is_empty() || keys.len() > MAX_SEQUENCE_LEN {
            return Err(SequenceError::InvalidLength(keys.len()));
        }
        let mut seq = Self::EMPTY;
        seq.keys[..keys.len()].copy_from_slice(keys);
        seq.len = keys.len() as u8;
        Ok(seq)
    }

    /// Build a sequence, falling back to [`KeySequence::EMPTY`] for an
    /// empty slice or one longer than five keys.
    pub fn new(keys: &[KeyCode]) -> Self {
        Self::try_new(keys).unwrap_or(Self::EMPTY)
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.keys[..self.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys().iter().copied()
    }

    pub fn contains(&self, key: KeyCode) -> bool {
        self.keys().contains(&key)
    }
}

impl Default for KeySequence {
    fn default() -> Self {
        Self::EMPTY
    }
}

macro_rules! impl_from_array {
    ($($n:literal),*) => {
        $(
            impl From<[KeyCode; $n]> for KeySequence {
                fn from(keys: [KeyCode; $n]) -> Self {
                    Self::new(&keys)
                }
            }
        )*
    };
}

impl_from_array!(1, 2, 3, 4, 5);

impl TryFrom<&[KeyCode]> for KeySequence {
    type Error = SequenceError;

    fn try_from(keys: &[KeyCode]) -> Result<Self, Self::Error> {
        Self::try_new(keys)
    }
}

impl TryFrom<Vec<KeyCode>> for KeySequence {
    type Error = SequenceError;

    fn try_from(keys: Vec<KeyCode>) -> Result<Self, Self::Error> {
        Self::try_new(&keys)
    }
}

impl From<KeySequence> for Vec<KeyCode> {
    fn from(seq: KeySequence) -> Self {
        seq.keys().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(raw: &[i32]) -> Vec<KeyCode> {
        raw.iter().copied().map(KeyCode).collect()
    }

    #[test]
    fn equal_sequences_compare_equal() {
        let a = KeySequence::new(&codes(&[1, 2, 3]));
        let b = KeySequence::new(&codes(&[1, 2, 3]));
        assert_eq!(a, b);
    }

    #[test]
    fn prefix_is_not_equal() {
        let a = KeySequence::new(&codes(&[1, 2]));
        let b = KeySequence::new(&codes(&[1, 2, 3]));
        assert_ne!(a, b);
    }

    #[test]
    fn order_matters() {
        let a = KeySequence::new(&codes(&[1, 2]));
        let b = KeySequence::new(&codes(&[2, 1]));
        assert_ne!(a, b);
    }

    #[test]
    fn zero_keys_yields_empty_sequence() {
        let seq = KeySequence::new(&[]);
        assert!(seq.is_empty());
        assert_eq!(seq, KeySequence::EMPTY);
        assert_eq!(
            KeySequence::try_new(&[]),
            Err(SequenceError::InvalidLength(0))
        );
    }

    #[test]
    fn six_keys_yields_empty_sequence() {
        let six = codes(&[1, 2, 3, 4, 5, 6]);
        let seq = KeySequence::new(&six);
        assert!(seq.is_empty());
        assert_eq!(
            KeySequence::try_new(&six),
            Err(SequenceError::InvalidLength(6))
        );
    }

    #[test]
    fn five_keys_is_the_upper_bound() {
        let seq = KeySequence::new(&codes(&[1, 2, 3, 4, 5]));
        assert_eq!(seq.len(), 5);
        assert_eq!(seq.keys(), codes(&[1, 2, 3, 4, 5]).as_slice());
    }

    #[test]
    fn from_array_and_copy_semantics() {
        let a = KeySequence::from([KeyCode(341), KeyCode(90)]);
        let mut b = a;
        assert_eq!(a, b);
        b = KeySequence::from([KeyCode(341)]);
        assert_ne!(a, b);
        assert!(a.contains(KeyCode(90)));
        assert!(!b.contains(KeyCode(90)));
    }

    #[test]
    fn serializes_as_a_key_list() {
        let seq = KeySequence::from([KeyCode(341), KeyCode(81)]);
        assert_eq!(serde_json::to_string(&seq).unwrap(), "[341,81]");
        let back: KeySequence = serde_json::from_str("[341,81]").unwrap();
        assert_eq!(back, seq);
        assert_eq!(back.keys(), &[KeyCode(341), KeyCode(81)]);
    }

    #[test]
    fn deserializing_rejects_bad_lengths() {
        assert!(serde_json::from_str::<KeySequence>("[]").is_err());
        assert!(serde_json::from_str::<KeySequence>("[1,2,3,4,5,6]").is_err());
        // The in-memory layout is not accepted as input.
        let raw = r#"{"keys":[1,2,3,4,5],"len":9}"#;
        assert!(serde_json::from_str::<KeySequence>(raw).is_err());
    }

    #[test]
    fn deserialized_sequence_equals_constructed_one() {
        let back: KeySequence = serde_json::from_str("[1]").unwrap();
        assert_eq!(back, KeySequence::from([KeyCode(1)]));
        assert_eq!(back.len(), 1);
    }
}
