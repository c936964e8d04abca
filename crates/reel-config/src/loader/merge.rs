//! JSON merge for layered configuration.

use serde_json::Value;

/// Merge `overlay` into `base`: objects merge key by key, anything else
/// (scalars, arrays such as `form.initial.cast`) is replaced.
pub(super) fn merge_json_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::merge_json_values;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_objects_merge_and_arrays_replace() {
        let mut base = json!({
            "publisher": { "kind": "mock", "mock": { "latency_ms": 10 } },
            "form": { "initial": { "cast": [{ "id": 1 }, { "id": 2 }] } },
        });
        let overlay = json!({
            "publisher": { "mock": { "fail": true } },
            "form": { "initial": { "cast": [{ "id": 3 }] } },
        });
        merge_json_values(&mut base, &overlay);
        assert_eq!(
            base,
            json!({
                "publisher": { "kind": "mock", "mock": { "latency_ms": 10, "fail": true } },
                "form": { "initial": { "cast": [{ "id": 3 }] } },
            })
        );
    }
}
