//! Typed per-surface configuration.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ComposeError, ConfigError};

/// Finite-element idealisation of the wing structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FemModelType {
    /// Circular tube spar.
    Tube,
    /// Box beam with skins and spars.
    Wingbox,
}

impl FemModelType {
    /// Text used in surface configurations.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tube => "tube",
            Self::Wingbox => "wingbox",
        }
    }
}

impl FromStr for FemModelType {
    type Err = ComposeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "tube" => Ok(Self::Tube),
            "wingbox" => Ok(Self::Wingbox),
            other => Err(ComposeError::InvalidModelType {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FemModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default surface name when a configuration omits one.
fn default_name() -> String {
    "wing".to_string()
}

/// Structural description of one lifting surface.
///
/// `fem_model_type` is kept exactly as supplied and validated when the surface is composed.
/// A missing `use_composite` or `exact_failure_constraint` flag reads as `false`. Every other
/// key is carried through untouched for the numerical subsystems.
///
/// # Examples
/// ```
/// use wingfail::SurfaceConfig;
///
/// let config = SurfaceConfig::from_json_str(
///     r#"{"name": "wing", "fem_model_type": "wingbox", "useComposite": true, "span": 10.0}"#,
/// )
/// .expect("valid configuration");
/// assert!(config.uses_composite());
/// assert!(!config.exact_failure_constraint());
/// assert_eq!(config.field("span"), Some(&serde_json::json!(10.0)));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Surface name used in diagnostics.
    #[serde(default = "default_name")]
    name: String,
    /// Requested structural model.
    fem_model_type: String,
    /// Composite material flag, meaningful for wingbox models only.
    #[serde(default, alias = "useComposite", skip_serializing_if = "Option::is_none")]
    use_composite: Option<bool>,
    /// Exact per-element failure constraint flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exact_failure_constraint: Option<bool>,
    /// Geometry and material data consumed by the numerical subsystems.
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl SurfaceConfig {
    /// Create a configuration with both flags unset.
    #[must_use]
    pub fn new(name: impl Into<String>, fem_model_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fem_model_type: fem_model_type.into(),
            use_composite: None,
            exact_failure_constraint: None,
            fields: Map::new(),
        }
    }

    /// Tube spar surface.
    #[must_use]
    pub fn tube(name: impl Into<String>) -> Self {
        Self::new(name, FemModelType::Tube.as_str())
    }

    /// Wingbox surface.
    #[must_use]
    pub fn wingbox(name: impl Into<String>) -> Self {
        Self::new(name, FemModelType::Wingbox.as_str())
    }

    /// Set the composite material flag.
    #[must_use]
    pub fn with_composite(mut self, use_composite: bool) -> Self {
        self.use_composite = Some(use_composite);
        self
    }

    /// Set the exact failure constraint flag.
    #[must_use]
    pub fn with_exact_failure_constraint(mut self, exact: bool) -> Self {
        self.exact_failure_constraint = Some(exact);
        self
    }

    /// Attach a pass-through field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not a surface object.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and [`ConfigError::Parse`]
    /// when its contents are not a surface object.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Surface name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model type as supplied.
    #[must_use]
    pub fn fem_model_type(&self) -> &str {
        &self.fem_model_type
    }

    /// Validate and return the model type.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::InvalidModelType`] for anything but `tube` or `wingbox`.
    pub fn model_type(&self) -> Result<FemModelType, ComposeError> {
        self.fem_model_type.parse()
    }

    /// Whether the composite material path is requested.
    #[must_use]
    pub fn uses_composite(&self) -> bool {
        self.use_composite.unwrap_or(false)
    }

    /// Whether the composite flag was supplied at all.
    #[must_use]
    pub fn composite_flag(&self) -> Option<bool> {
        self.use_composite
    }

    /// Whether one failure constraint per element is requested.
    #[must_use]
    pub fn exact_failure_constraint(&self) -> bool {
        self.exact_failure_constraint.unwrap_or(false)
    }

    /// Look up a pass-through field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All pass-through fields in their original order.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
