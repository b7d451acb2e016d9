use crate::coerce::Coerce;
use std::fmt;

/// Semantic type a field's raw string is coerced into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    Duration,
}

impl FieldKind {
    /// Name used for this kind in coercion errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "int",
            Self::Boolean => "bool",
            Self::Duration => "Duration",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Where a field's raw value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueSource {
    Environment,
    File,
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "environment"),
            Self::File => write!(f, "file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Describes how one configuration field is looked up
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDescriptor {
    /// Environment variable / file key. Empty means the field is skipped
    pub key: &'static str,
    /// Default raw value, coerced like any other source
    pub default: Option<&'static str>,
    /// Human-readable description of what this field configures
    pub description: &'static str,
    /// Declared type of the field
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Descriptor for a field of type `T` looked up under `key`
    pub fn new<T: Coerce>(key: &'static str) -> Self {
        Self {
            key,
            default: None,
            description: "",
            kind: T::KIND,
        }
    }

    pub fn default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Fields without a lookup key are never resolved
    pub fn is_skipped(&self) -> bool {
        self.key.is_empty()
    }

    /// A field is required when it has no default to fall back on
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}
