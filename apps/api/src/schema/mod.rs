//! Declarative form schema: field name → constraint set, evaluated by one
//! generic validator over the JSON view of the form.
//!
//! The wizard only ever asks for a subset of top-level names (one step's
//! worth), so `validate` takes the names to check rather than the whole form.

pub mod resume;
pub mod rules;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub use resume::resume_schema;
pub use rules::{Constraint, Rule};

/// One inline error, addressed by a dotted path (`educationData.0.study`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// Constraints for a single scalar field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub constraints: Vec<Constraint>,
}

impl FieldSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            constraints: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.constraints.push(Constraint {
            rule,
            message: None,
        });
        self
    }

    /// Overrides the message of the most recently added rule.
    pub fn message(mut self, message: &str) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            last.message = Some(message.to_string());
        }
        self
    }

    pub fn required(self, message: &str) -> Self {
        self.rule(Rule::Required).message(message)
    }

    /// First failing constraint wins; one error per field.
    fn check(&self, path: &str, value: &Value) -> Option<FieldError> {
        self.constraints.iter().find_map(|c| {
            c.check(&self.name, value).err().map(|message| FieldError {
                path: path.to_string(),
                message,
            })
        })
    }
}

/// A repeated section whose items each carry their own field specs.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSpec {
    pub name: String,
    /// A required list must be present and hold at least one item.
    pub required: bool,
    pub item: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSchema {
    pub fields: Vec<FieldSpec>,
    pub lists: Vec<ListSpec>,
}

const REQUIRED_MESSAGE: &str = "Is a required field";

impl FormSchema {
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn list(mut self, name: &str, required: bool, item: Vec<FieldSpec>) -> Self {
        self.lists.push(ListSpec {
            name: name.to_string(),
            required,
            item,
        });
        self
    }

    /// Every top-level name the schema knows, fields first.
    pub fn names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .map(|f| f.name.as_str())
            .chain(self.lists.iter().map(|l| l.name.as_str()))
            .collect()
    }

    /// Validates only the named top-level fields and lists of `form`.
    /// Returns every failure found; an empty vector means the targets pass.
    pub fn validate(&self, form: &Value, targets: &[&str]) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for target in targets {
            if let Some(spec) = self.fields.iter().find(|f| f.name == *target) {
                let value = form.get(&spec.name).unwrap_or(&Value::Null);
                errors.extend(spec.check(&spec.name, value));
            } else if let Some(list) = self.lists.iter().find(|l| l.name == *target) {
                validate_list(list, form.get(&list.name), &mut errors);
            } else {
                debug!("Schema has no field named '{target}', skipping");
            }
        }

        errors
    }

    pub fn validate_all(&self, form: &Value) -> Vec<FieldError> {
        self.validate(form, &self.names())
    }
}

fn validate_list(list: &ListSpec, value: Option<&Value>, errors: &mut Vec<FieldError>) {
    let items = match value {
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(Value::Array(_)) | Some(Value::Null) | None => {
            if list.required {
                errors.push(FieldError {
                    path: list.name.clone(),
                    message: REQUIRED_MESSAGE.to_string(),
                });
            }
            return;
        }
        Some(_) => {
            errors.push(FieldError {
                path: list.name.clone(),
                message: format!("{} must be a list", list.name),
            });
            return;
        }
    };

    for (index, item) in items.iter().enumerate() {
        for spec in &list.item {
            let value = item.get(&spec.name).unwrap_or(&Value::Null);
            let path = format!("{}.{}.{}", list.name, index, spec.name);
            errors.extend(spec.check(&path, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> FormSchema {
        FormSchema::default()
            .field(
                FieldSpec::new("name")
                    .required(REQUIRED_MESSAGE)
                    .rule(Rule::MinLength(3)),
            )
            .field(FieldSpec::new("email").rule(Rule::Email))
            .list(
                "items",
                true,
                vec![FieldSpec::new("label").required(REQUIRED_MESSAGE)],
            )
            .list(
                "extras",
                false,
                vec![FieldSpec::new("label").required(REQUIRED_MESSAGE)],
            )
    }

    #[test]
    fn test_validates_only_targets() {
        let form = json!({ "name": "", "email": "bad", "items": [] });
        let errors = schema().validate(&form, &["email"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "email");
    }

    #[test]
    fn test_one_error_per_field() {
        let form = json!({ "name": "" });
        let errors = schema().validate(&form, &["name"]);
        assert_eq!(
            errors,
            vec![FieldError {
                path: "name".to_string(),
                message: REQUIRED_MESSAGE.to_string()
            }]
        );
    }

    #[test]
    fn test_list_item_paths() {
        let form = json!({ "items": [{ "label": "ok" }, { "label": "" }] });
        let errors = schema().validate(&form, &["items"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "items.1.label");
    }

    #[test]
    fn test_required_list_must_be_non_empty() {
        let errors = schema().validate(&json!({ "items": [] }), &["items"]);
        assert_eq!(errors[0].path, "items");
        let errors = schema().validate(&json!({}), &["items"]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_optional_list_may_be_empty_or_absent() {
        assert!(schema().validate(&json!({ "extras": [] }), &["extras"]).is_empty());
        assert!(schema().validate(&json!({}), &["extras"]).is_empty());
    }

    #[test]
    fn test_non_list_value_reported() {
        let errors = schema().validate(&json!({ "items": "nope" }), &["items"]);
        assert_eq!(errors[0].message, "items must be a list");
    }

    #[test]
    fn test_unknown_target_ignored() {
        assert!(schema().validate(&json!({}), &["photo"]).is_empty());
    }

    #[test]
    fn test_validate_all_covers_every_name() {
        let errors = schema().validate_all(&json!({ "name": "Ada", "email": "" }));
        // Only the required list is missing.
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "items");
    }
}
