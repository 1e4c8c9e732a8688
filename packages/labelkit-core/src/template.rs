//! Named geometry templates: immutable built-ins plus user-saved customs.
//!
//! Custom templates are written through to the key-value store on every
//! change. A failed write is reported, and the in-memory registry keeps the
//! change for the rest of the session.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::LabelError;
use crate::geometry::{self, GeometryModel};
use crate::persistence::{load_json, KeyValueStore};

/// A template name as listed to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    pub name: String,
    pub builtin: bool,
}

/// Registry of built-in and custom templates.
#[derive(Debug)]
pub struct TemplateRegistry {
    custom: BTreeMap<String, GeometryModel>,
    store: Arc<dyn KeyValueStore>,
    store_key: String,
}

impl TemplateRegistry {
    /// Loads custom templates stored under `store_key`.
    ///
    /// Unreadable data and entries failing validation are dropped.
    pub fn open(store: Arc<dyn KeyValueStore>, store_key: impl Into<String>) -> Self {
        let store_key = store_key.into();
        let mut custom: BTreeMap<String, GeometryModel> =
            load_json(store.as_ref(), &store_key).unwrap_or_default();

        custom.retain(|name, model| match model.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Dropping stored template '{}': {}", name, e);
                false
            }
        });
        tracing::info!("Loaded {} custom templates", custom.len());

        Self {
            custom,
            store,
            store_key,
        }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        geometry::builtin(name.trim()).is_some()
    }

    /// Saves `model` under the trimmed `name`, replacing any custom
    /// template of that name.
    pub fn save(&mut self, name: &str, model: &GeometryModel) -> Result<(), LabelError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LabelError::BlankName);
        }
        if self.is_builtin(name) {
            return Err(LabelError::BuiltinTemplate {
                name: name.to_string(),
            });
        }
        model.validate()?;

        self.custom.insert(name.to_string(), model.clone());
        tracing::info!("Saved template '{}'", name);
        self.persist()
    }

    /// Removes the custom template with the trimmed `name`. Unknown names
    /// are ignored.
    pub fn delete(&mut self, name: &str) -> Result<(), LabelError> {
        let name = name.trim();
        if self.is_builtin(name) {
            return Err(LabelError::BuiltinTemplate {
                name: name.to_string(),
            });
        }
        if self.custom.remove(name).is_none() {
            return Ok(());
        }
        tracing::info!("Deleted template '{}'", name);
        self.persist()
    }

    /// Looks up a template by trimmed name; built-ins take precedence over
    /// customs.
    pub fn load(&self, name: &str) -> Option<GeometryModel> {
        let name = name.trim();
        geometry::builtin(name).or_else(|| self.custom.get(name).cloned())
    }

    /// Like [`load`](Self::load) but reports unknown names as an error.
    pub fn resolve(&self, name: &str) -> Result<GeometryModel, LabelError> {
        self.load(name).ok_or_else(|| LabelError::TemplateNotFound {
            name: name.to_string(),
        })
    }

    /// Built-ins in declaration order, then customs by name.
    pub fn list(&self) -> Vec<TemplateEntry> {
        geometry::builtin_keys()
            .map(|name| TemplateEntry {
                name: name.to_string(),
                builtin: true,
            })
            .chain(self.custom.keys().map(|name| TemplateEntry {
                name: name.clone(),
                builtin: false,
            }))
            .collect()
    }

    pub fn custom_count(&self) -> usize {
        self.custom.len()
    }

    fn persist(&self) -> Result<(), LabelError> {
        let json = serde_json::to_string(&self.custom).map_err(|e| {
            LabelError::write_failure(
                &self.store_key,
                LabelError::SerializationError(e.to_string()),
            )
        })?;
        self.store.set(&self.store_key, &json).map_err(|e| {
            tracing::warn!("Failed to persist templates: {}", e);
            LabelError::write_failure(&self.store_key, e)
        })
    }
}
