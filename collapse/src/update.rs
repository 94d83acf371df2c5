//! Property updates fed to a wrapper instance.

use livedom::document::ROOT_ID;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CollapseError;

/// Pass-through properties for the wrapped component.
pub type Props = serde_json::Map<String, Value>;

/// One state change for a wrapper instance: `{ id, collapsed, ...rest }`.
///
/// Everything besides `id` and `collapsed` is flattened into `props` and
/// handed to the wrapped component untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(flatten)]
    pub props: Props,
}

impl PropertyUpdate {
    pub fn new(id: impl Into<String>, collapsed: bool) -> Self {
        Self {
            id: Some(id.into()),
            collapsed,
            props: Props::new(),
        }
    }

    /// An update with no id. Always rejected; useful for exercising
    /// contract checks.
    pub fn without_id(collapsed: bool) -> Self {
        Self {
            id: None,
            collapsed,
            props: Props::new(),
        }
    }

    /// Add a pass-through property.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Parse an update from a JSON object.
    pub fn from_json(value: Value) -> Result<Self, CollapseError> {
        if !value.is_object() {
            return Err(CollapseError::invalid("update must be a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| CollapseError::invalid(e.to_string()))
    }

    /// Check the caller contract and return the container id.
    pub fn validate(&self) -> Result<&str, CollapseError> {
        match self.id.as_deref() {
            None => Err(CollapseError::invalid("missing id")),
            Some("") => Err(CollapseError::invalid("empty id")),
            Some(ROOT_ID) => Err(CollapseError::invalid(format!(
                "id '{ROOT_ID}' is the document root"
            ))),
            Some(id) if id.chars().any(char::is_whitespace) => Err(CollapseError::invalid(
                format!("id '{id}' contains whitespace"),
            )),
            Some(id) => Ok(id),
        }
    }
}
