//! Core types for binding a type declaration into a project.
//!
//! Wire types keep the remote API's field names through serde renames;
//! Rust-side names follow the usual snake case.

use crate::error::BindTypeError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use typebind_core::RequestState;

/// Identifier of the project a type is bound into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectHash(String);

impl ProjectHash {
    /// Wrap a project hash.
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Borrow the raw hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a stored expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExprHash(String);

impl ExprHash {
    /// Wrap an expression hash.
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Borrow the raw hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExprHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a bind-type call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindTypeRequest {
    /// Project the declaration is bound into
    #[serde(rename = "btProjectHash")]
    pub project_hash: ProjectHash,

    /// Source text of the type declaration
    #[serde(rename = "btExpression")]
    pub expression: String,
}

/// Snapshot of a project after a successful bind.
///
/// Opaque to this crate: it is forwarded verbatim to whoever owns the
/// project. Fields not named here are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    /// Hash of the new project version
    #[serde(rename = "pdHash")]
    pub hash: ProjectHash,

    /// Expression bindings by name
    #[serde(rename = "pdBindings", default)]
    pub bindings: IndexMap<String, ExprHash>,

    /// Type bindings by name
    #[serde(rename = "pdTypeBindings", default)]
    pub type_bindings: IndexMap<String, ExprHash>,

    /// Every other field of the snapshot
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Code generated alongside a bound type (constructors, folds, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Codegen {
    /// Generated binding name → expression hash
    #[serde(rename = "edBindings", default)]
    pub bindings: IndexMap<String, String>,

    /// Generated binding name → type binding
    #[serde(rename = "edTypeBindings", default)]
    pub type_bindings: IndexMap<String, String>,
}

/// A typeclass instance derived for the bound type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typeclass {
    /// Typeclass name (e.g. `Functor`)
    #[serde(rename = "tcName")]
    pub name: String,

    /// Types the instance is defined for
    #[serde(rename = "tcTypes", default)]
    pub types: Vec<String>,

    /// Every other field of the instance
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Successful outcome of a bind-type call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindTypeResponse {
    /// The updated project
    #[serde(rename = "btProjectData")]
    pub project_data: ProjectData,

    /// Generated code, when the server produced any
    #[serde(rename = "btCodegen", default, skip_serializing_if = "Option::is_none")]
    pub codegen: Option<Codegen>,

    /// Typeclasses derived for the new type
    #[serde(rename = "btTypeclasses", default)]
    pub typeclasses: Vec<Typeclass>,

    /// Pretty-printed data type
    #[serde(rename = "btPrettyType")]
    pub pretty_type: String,
}

impl BindTypeResponse {
    /// Expression hashes of the generated bindings, in binding order.
    ///
    /// Empty when no code was generated. Duplicate hashes are kept.
    #[must_use]
    pub fn bound_expression_hashes(&self) -> Vec<ExprHash> {
        self.codegen
            .as_ref()
            .map(|codegen| codegen.bindings.values().map(ExprHash::new).collect())
            .unwrap_or_default()
    }

    /// Split into the project snapshot and the payload shown to the caller.
    #[must_use]
    pub fn into_parts(self) -> (ProjectData, AddType) {
        let Codegen {
            bindings,
            type_bindings,
        } = self.codegen.unwrap_or_default();

        let added = AddType {
            bindings,
            type_bindings,
            typeclasses: self.typeclasses,
            data_type_pretty: self.pretty_type,
        };

        (self.project_data, added)
    }
}

/// Structured rejection reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserErrorResponse {
    /// Machine-readable error code (e.g. `TYPE_ERROR`)
    pub code: String,

    /// Human-readable explanation
    pub message: String,
}

impl std::fmt::Display for UserErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Result of a completed bind, as presented to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddType {
    /// Generated binding name → expression hash
    pub bindings: IndexMap<String, String>,

    /// Generated binding name → type binding
    pub type_bindings: IndexMap<String, String>,

    /// Typeclasses derived for the new type
    pub typeclasses: Vec<Typeclass>,

    /// Pretty-printed data type
    pub data_type_pretty: String,
}

/// Lifecycle of one add-type request.
pub type AddTypeState = RequestState<BindTypeError, AddType>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;

    fn response(codegen: Option<Codegen>) -> BindTypeResponse {
        BindTypeResponse {
            project_data: ProjectData {
                hash: ProjectHash::new("p1"),
                bindings: IndexMap::new(),
                type_bindings: IndexMap::new(),
                extra: Map::new(),
            },
            codegen,
            typeclasses: vec![Typeclass {
                name: "Functor".to_string(),
                types: vec!["Maybe".to_string()],
                extra: Map::new(),
            }],
            pretty_type: "type Maybe a = Just a | Nothing".to_string(),
        }
    }

    #[test]
    fn test_hashes_follow_binding_order() {
        let codegen = Codegen {
            bindings: IndexMap::from([
                ("y".to_string(), "2".to_string()),
                ("x".to_string(), "1".to_string()),
            ]),
            type_bindings: IndexMap::new(),
        };

        let hashes = response(Some(codegen)).bound_expression_hashes();
        assert_eq!(hashes, vec![ExprHash::new("2"), ExprHash::new("1")]);
    }

    #[test]
    fn test_hashes_keep_duplicates() {
        let codegen = Codegen {
            bindings: IndexMap::from([
                ("a".to_string(), "h".to_string()),
                ("b".to_string(), "h".to_string()),
            ]),
            type_bindings: IndexMap::new(),
        };

        assert_eq!(response(Some(codegen)).bound_expression_hashes().len(), 2);
    }

    #[test]
    fn test_into_parts_without_codegen() {
        let (project, added) = response(None).into_parts();

        assert_eq!(project.hash, ProjectHash::new("p1"));
        assert!(added.bindings.is_empty());
        assert!(added.type_bindings.is_empty());
        assert_eq!(added.typeclasses.len(), 1);
        assert_eq!(added.data_type_pretty, "type Maybe a = Just a | Nothing");
    }

    #[test]
    fn test_response_wire_format() {
        let json = serde_json::json!({
            "btProjectData": {
                "pdHash": "abc",
                "pdBindings": { "id": "h1" },
                "pdTypeBindings": {}
            },
            "btCodegen": {
                "edBindings": { "fmap": "h2" },
                "edTypeBindings": { "Maybe": "h3" }
            },
            "btTypeclasses": [{ "tcName": "Functor", "tcTypes": ["Maybe"] }],
            "btPrettyType": "type Maybe a"
        });

        let parsed: BindTypeResponse = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.project_data.hash.as_str(), "abc");
        assert_eq!(parsed.project_data.bindings.get("id"), Some(&ExprHash::new("h1")));
        assert_eq!(parsed.bound_expression_hashes(), vec![ExprHash::new("h2")]);
    }

    #[test]
    fn test_project_data_keeps_unknown_fields() {
        let json = serde_json::json!({
            "pdHash": "abc",
            "pdBindings": { "id": "h1" },
            "pdTypeBindings": {},
            "pdVersions": { "id": ["h0", "h1"] }
        });

        let project: ProjectData = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(project.extra.get("pdVersions"), Some(&json["pdVersions"]));
        assert_eq!(serde_json::to_value(&project).unwrap(), json);
    }

    #[test]
    fn test_typeclass_keeps_unknown_fields() {
        let json = serde_json::json!({
            "tcName": "Functor",
            "tcTypes": ["Maybe"],
            "tcDerived": true
        });

        let typeclass: Typeclass = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(typeclass.extra.len(), 1);
        assert_eq!(serde_json::to_value(&typeclass).unwrap(), json);
    }

    #[test]
    fn test_codegen_maps_default_to_empty() {
        let json = serde_json::json!({
            "btProjectData": { "pdHash": "abc" },
            "btCodegen": {},
            "btTypeclasses": [],
            "btPrettyType": "type Unit"
        });

        let parsed: BindTypeResponse = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.codegen, Some(Codegen::default()));
        assert!(parsed.bound_expression_hashes().is_empty());
    }

    #[test]
    fn test_request_wire_format() {
        let request = BindTypeRequest {
            project_hash: ProjectHash::new("p1"),
            expression: "type Unit = Unit".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "btProjectHash": "p1", "btExpression": "type Unit = Unit" })
        );
    }

    #[test]
    fn test_add_type_field_names() {
        let value = serde_json::to_value(AddType::default()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();

        assert!(keys.contains(&"typeBindings".to_string()));
        assert!(keys.contains(&"dataTypePretty".to_string()));
    }
}
