use reel_protocol::{Attributes, CastId, CastMember};
use serde_json::Value;

/// Attribute map with a single `name` entry.
pub fn attributes(name: &str) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert("name".to_string(), Value::String(name.to_string()));
    attributes
}

/// Cast member with the given id and `name`.
pub fn member(id: u64, name: &str) -> CastMember {
    CastMember::new(CastId(id), attributes(name))
}
