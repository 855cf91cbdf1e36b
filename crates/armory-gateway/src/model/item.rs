use armory_core::{Effect, ItemInput};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /item` and `PUT /item/{id}`.
///
/// Fields are kept as raw JSON so that a wrong type is reported as a
/// validation failure with a useful message instead of a generic
/// deserialization error. Built only from a JSON object, never from a
/// positional array.
#[derive(Debug, Default)]
pub struct ItemRequest {
    pub name: Option<Value>,
    pub effect: Option<Value>,
    pub price: Option<Value>,
}

impl From<Map<String, Value>> for ItemRequest {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            name: fields.remove("name"),
            effect: fields.remove("effect"),
            price: fields.remove("price"),
        }
    }
}

impl ItemRequest {
    /// Checks the request shape and converts it into catalog input.
    ///
    /// `name` must be a non-empty string, `effect` a flat object of numbers
    /// and `price` a number (zero included).
    pub fn validate(self) -> Result<ItemInput, String> {
        let name = match self.name {
            Some(Value::String(name)) if !name.is_empty() => name,
            Some(Value::String(_)) => return Err("name must not be empty".to_string()),
            Some(_) => return Err("name must be a string".to_string()),
            None => return Err("name is required".to_string()),
        };

        let effect = match self.effect {
            Some(effect @ Value::Object(_)) => serde_json::from_value::<Effect>(effect)
                .map_err(|_| "effect values must all be numbers".to_string())?,
            Some(_) => return Err("effect must be an object".to_string()),
            None => return Err("effect is required".to_string()),
        };

        let price = match self.price {
            Some(Value::Number(price)) => price
                .as_f64()
                .ok_or_else(|| "price is out of range".to_string())?,
            Some(Value::Null) | None => return Err("price is required".to_string()),
            Some(_) => return Err("price must be a number".to_string()),
        };

        Ok(ItemInput::new(name, effect, price))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
