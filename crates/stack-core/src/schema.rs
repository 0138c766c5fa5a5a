//! JSON-Schema contract for the persisted descriptor
//!
//! The schema is generated from the registry rather than maintained by hand,
//! so regenerating after a catalog change keeps the published contract in
//! step with the options that actually exist.

use serde_json::{json, Map, Value};

use crate::category::Category;
use crate::registry::Registry;

/// Draft-07 schema describing the `tstack.json` descriptor
pub fn descriptor_schema(registry: &Registry) -> Value {
    let mut stack_properties = Map::new();
    let mut required = vec![Value::from("projectName")];

    stack_properties.insert("projectName".to_string(), json!({ "type": "string" }));

    for category in Category::ALL {
        let ids: Vec<&str> = registry
            .list_options(category)
            .iter()
            .map(|def| def.id)
            .collect();
        let property = if category.is_multi() {
            json!({
                "type": "array",
                "items": { "type": "string", "enum": ids },
                "minItems": 1,
                "uniqueItems": true,
            })
        } else {
            json!({ "type": "string", "enum": ids })
        };
        stack_properties.insert(category.as_str().to_string(), property);
        required.push(Value::from(category.as_str()));
    }

    for flag in ["git", "install"] {
        stack_properties.insert(flag.to_string(), json!({ "type": "boolean" }));
        required.push(Value::from(flag));
    }

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Better-T-Stack project descriptor",
        "type": "object",
        "properties": {
            "schemaVersion": { "type": "integer", "minimum": 1 },
            "toolVersion": { "type": "string" },
            "createdAt": { "type": "string", "format": "date-time" },
            "stack": {
                "type": "object",
                "properties": Value::Object(stack_properties),
                "required": required,
                "additionalProperties": false,
            },
        },
        "required": ["schemaVersion", "toolVersion", "createdAt", "stack"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_carries_every_category_enum() {
        let registry = Registry::builtin().unwrap();
        let schema = descriptor_schema(&registry);
        let properties = &schema["properties"]["stack"]["properties"];
        for category in Category::ALL {
            let property = &properties[category.as_str()];
            assert!(!property.is_null(), "missing {category}");
            let enum_values = if category.is_multi() {
                &property["items"]["enum"]
            } else {
                &property["enum"]
            };
            let count = enum_values.as_array().map(Vec::len).unwrap_or(0);
            assert_eq!(count, registry.list_options(category).len());
        }
    }

    #[test]
    fn a_written_descriptor_matches_the_schema_shape() {
        use crate::descriptor::ProjectDescriptor;
        use crate::resolver::{PartialStack, Resolution, Resolver};
        use crate::rules::RuleSet;

        let registry = Registry::builtin().unwrap();
        let rules = RuleSet::builtin(&registry).unwrap();
        let state = match Resolver::new(&registry, &rules)
            .resolve(&PartialStack::new())
            .unwrap()
        {
            Resolution::Resolved(state) => state,
            Resolution::Rejected(violations) => panic!("defaults rejected: {violations:?}"),
        };
        let descriptor = ProjectDescriptor::build(state, "0.1.0");
        let value: Value = serde_json::from_str(&descriptor.to_json().unwrap()).unwrap();

        let schema = descriptor_schema(&registry);
        let stack_required = schema["properties"]["stack"]["required"].as_array().unwrap();
        for field in stack_required {
            let name = field.as_str().unwrap();
            assert!(
                !value["stack"][name].is_null(),
                "descriptor is missing stack field '{name}'"
            );
        }
    }
}
