use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Key/value data handed to a page alongside its path and component.
pub type Context = Map<String, Value>;

/// Merges `overlay` on top of `base`.
///
/// Keys from `base` keep their position, keys only present in the overlay
/// are appended, and on conflict the overlay value wins.
pub fn merge<O: Serialize>(base: Context, overlay: &O) -> Result<Context> {
    let Value::Object(fields) = serde_json::to_value(overlay)? else {
        return Err(Error::InvalidConfiguration(
            "context overlay must serialize to an object".into(),
        ));
    };

    let mut merged = base;
    for (key, value) in fields {
        merged.insert(key, value);
    }
    Ok(merged)
}
