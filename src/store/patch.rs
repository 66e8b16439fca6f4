use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{
    entities::Identified,
    store::error::{StoreError, invalid_request},
};

/// Builds a merge-patch record holding the identifier of `after` plus every
/// field whose value differs from `before`. Unchanged fields come back as
/// `None` so the patch body leaves them alone.
///
/// Clearing a field cannot be expressed this way: the server ignores nulls.
pub fn changed_fields<T>(before: &T, after: &T) -> Result<T, StoreError>
where
    T: Identified + Serialize + DeserializeOwned,
{
    let kind = T::KIND;
    if after.id().is_none() {
        return Err(invalid_request(format!("{kind} patch requires an id")).with_entity(kind));
    }

    let before = to_object(before)?;
    let mut patch = Map::new();
    for (field, value) in to_object(after)? {
        if value.is_null() {
            continue;
        }
        if field == "id" || before.get(&field) != Some(&value) {
            patch.insert(field, value);
        }
    }

    serde_json::from_value(Value::Object(patch)).map_err(|err| {
        invalid_request(format!("failed to build {kind} patch: {err}")).with_entity(kind)
    })
}

fn to_object<T: Identified + Serialize>(record: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(invalid_request(format!(
            "{} did not encode as an object: {other}",
            T::KIND
        ))
        .with_entity(T::KIND)),
        Err(err) => Err(invalid_request(format!("failed to encode {}: {err}", T::KIND))
            .with_entity(T::KIND)),
    }
}
