use crate::error::CoreError;
use jiff::Timestamp;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// Storage-assigned identifier of an [`Item`].
///
/// Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw integer value.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| CoreError::InvalidItemId(s.to_string()))
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A flat mapping from effect name to a signed numeric magnitude.
///
/// Integers and decimals keep their JSON representation, so an effect of
/// `{"HP": 40}` reads back as `40`, not `40.0`. Nested objects, arrays and
/// non-numeric values are rejected on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Effect(BTreeMap<String, Number>);

impl Effect {
    pub fn get(&self, name: &str) -> Option<&Number> {
        self.0.get(name)
    }

    /// Sets the magnitude of an effect, returning the previous one if any.
    pub fn insert(&mut self, name: impl Into<String>, magnitude: impl Into<Number>) -> Option<Number> {
        self.0.insert(name.into(), magnitude.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the effect map as JSON text, the form it takes in storage.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decodes an effect map from its JSON text storage form.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

impl<K, N> FromIterator<(K, N)> for Effect
where
    K: Into<String>,
    N: Into<Number>,
{
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, magnitude)| (name.into(), magnitude.into()))
                .collect(),
        )
    }
}

/// A persisted item record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub effect: Effect,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    /// Assigned once at creation and never changed by updates.
    pub created_at: Timestamp,
}

impl Item {
    /// Builds the entity for a freshly created record.
    pub fn new(id: ItemId, input: ItemInput, created_at: Timestamp) -> Self {
        Self {
            id,
            name: input.name,
            effect: input.effect,
            price: input.price,
            created_at,
        }
    }

    /// Replaces every mutable field with the values from `input`.
    ///
    /// `id` and `created_at` are left untouched; `effect` is replaced
    /// wholesale rather than merged.
    pub fn apply(&mut self, input: ItemInput) {
        self.name = input.name;
        self.effect = input.effect;
        self.price = input.price;
    }
}

/// Writes a whole price as a JSON integer so `50` is not echoed as `50.0`.
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let whole = price.fract() == 0.0 && *price >= i64::MIN as f64 && *price < i64::MAX as f64;
    if whole {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

/// The caller-supplied fields of an item, used for both create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInput {
    pub name: String,
    pub effect: Effect,
    pub price: f64,
}

impl ItemInput {
    pub fn new(name: impl Into<String>, effect: Effect, price: f64) -> Self {
        Self {
            name: name.into(),
            effect,
            price,
        }
    }
}
