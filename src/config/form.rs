//! Form layout, select options and client-side validation.

use crate::config::types::Payload;
use crate::error::ApiError;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Field name -> message.
pub type FieldErrors = HashMap<String, String>;

pub type OptionsLoader = Arc<dyn Fn() -> BoxFuture<'static, Result<Vec<SelectOption>, ApiError>> + Send + Sync>;
pub type FieldValidator = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;
pub type FormTransform = Arc<dyn Fn(Payload) -> Payload + Send + Sync>;
pub type FormValidator = Arc<dyn Fn(&Payload) -> Option<FieldErrors> + Send + Sync>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Password,
    Textarea,
    Select,
    Multiselect,
    Checkbox,
    Number {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        step: Option<f64>,
    },
    Custom { component: String },
}

impl FieldType {
    pub fn number(min: Option<f64>, max: Option<f64>) -> Self {
        FieldType::Number { min, max, step: None }
    }

    pub fn takes_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Multiselect)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Either a literal list or an async loader; dispatched on the variant.
#[derive(Clone)]
pub enum FieldOptions {
    Static(Vec<SelectOption>),
    Loader(OptionsLoader),
}

impl FieldOptions {
    pub async fn resolve(&self) -> Result<Vec<SelectOption>, ApiError> {
        match self {
            FieldOptions::Static(v) => Ok(v.clone()),
            FieldOptions::Loader(load) => load().await,
        }
    }
}

impl std::fmt::Debug for FieldOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldOptions::Static(v) => f.debug_tuple("Static").field(v).finish(),
            FieldOptions::Loader(_) => f.write_str("Loader(..)"),
        }
    }
}

#[derive(Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub validation: Option<FieldValidator>,
    pub options: Option<FieldOptions>,
}

impl FormField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        FormField {
            name: name.into(),
            label: label.into(),
            field_type,
            required: false,
            placeholder: None,
            help_text: None,
            validation: None,
            options: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, p: impl Into<String>) -> Self {
        self.placeholder = Some(p.into());
        self
    }

    pub fn help_text(mut self, h: impl Into<String>) -> Self {
        self.help_text = Some(h.into());
        self
    }

    pub fn options(mut self, options: FieldOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn validation<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.validation = Some(Arc::new(f));
        self
    }
}

#[derive(Clone)]
pub struct FormSection {
    pub title: String,
    pub columns: u8,
    pub fields: Vec<FormField>,
}

impl FormSection {
    pub fn new(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        FormSection {
            title: title.into(),
            columns: 1,
            fields,
        }
    }

    pub fn columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }
}

#[derive(Clone, Default)]
pub struct FormConfig {
    pub sections: Vec<FormSection>,
    pub default_values: Option<Payload>,
    pub transform_before_submit: Option<FormTransform>,
    pub validate: Option<FormValidator>,
}

impl FormConfig {
    pub fn new(sections: Vec<FormSection>) -> Self {
        FormConfig {
            sections,
            ..FormConfig::default()
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields().find(|f| f.name == name)
    }

    /// Initial form values: configured defaults or an empty object.
    pub fn initial_values(&self) -> Payload {
        self.default_values.clone().unwrap_or_default()
    }

    /// Required fields, per-field predicates, then the form-level validator.
    /// The first message per field wins.
    pub fn check(&self, values: &Payload) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for field in self.fields() {
            let value = values.get(&field.name).unwrap_or(&Value::Null);
            if field.required && is_blank(value) {
                errors.insert(field.name.clone(), format!("{} is required", field.label));
                continue;
            }
            if is_blank(value) {
                continue;
            }
            if let Some(msg) = field.validation.as_ref().and_then(|v| v(value)) {
                errors.insert(field.name.clone(), msg);
            }
        }
        if let Some(validate) = &self.validate {
            if let Some(extra) = validate(values) {
                for (k, v) in extra {
                    errors.entry(k).or_insert(v);
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Apply the pre-submit transform, if any.
    pub fn prepare_submit(&self, values: Payload) -> Payload {
        match &self.transform_before_submit {
            Some(t) => t(values),
            None => values,
        }
    }
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}
