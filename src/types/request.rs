//! Inbound form data and the form description sent to the presentation layer

use crate::schema::{self, FEATURE_NAMES, HIDDEN_DEFAULT, VISIBLE_FEATURES};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw form submission: feature name to the string the user (or a hidden
/// input) supplied. Nothing here is trusted until it passes the validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSubmission {
    fields: HashMap<String, String>,
}

impl FormSubmission {
    /// Create an empty submission
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a submission from the visible values only, pre-filling every
    /// hidden feature the way the rendered form's hidden inputs would.
    pub fn from_visible<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        values.into_iter().collect::<Self>().with_hidden_defaults()
    }

    /// Add a field to the submission
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Fill hidden features that are not already present with `"0"`.
    /// Values already supplied are left untouched.
    pub fn with_hidden_defaults(mut self) -> Self {
        for name in schema::hidden_features() {
            self.fields
                .entry(name.to_string())
                .or_insert_with(|| HIDDEN_DEFAULT.to_string());
        }
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Raw value for `name`, if the field was submitted at all
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormSubmission {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// A user-editable input on the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleField {
    /// Feature name, also the form field name
    pub name: String,
    /// Label to display next to the input
    pub label: String,
    /// Inclusive maximum accepted by the validator
    pub max: f64,
}

/// A hidden input carrying a fixed default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

/// Everything the presentation layer needs to render the empty form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDescriptor {
    pub visible: Vec<VisibleField>,
    pub hidden: Vec<HiddenField>,
}

impl FormDescriptor {
    pub fn new() -> Self {
        let visible = VISIBLE_FEATURES
            .iter()
            .filter_map(|name| {
                schema::max_value(name).map(|max| VisibleField {
                    name: name.to_string(),
                    label: schema::display_name(name),
                    max,
                })
            })
            .collect();

        let hidden = FEATURE_NAMES
            .iter()
            .filter(|name| !schema::is_visible(name))
            .map(|name| HiddenField {
                name: name.to_string(),
                value: HIDDEN_DEFAULT.to_string(),
            })
            .collect();

        Self { visible, hidden }
    }
}

impl Default for FormDescriptor {
    fn default() -> Self {
        Self::new()
    }
}
