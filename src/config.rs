use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::model::{Entity, ModelKind, ModelSet, PickerValue};

/// Options a host passes when mounting a picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Currently selected value to highlight
    pub value: Option<PickerValue>,
    /// Selectable model kinds (never empty)
    pub models: ModelSet,
    /// Namespace to browse
    pub entity: Entity,
    pub show_search: bool,
    /// Whether the candidate list scrolls independently
    pub show_scroll: bool,
    pub keybindings: KeybindingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: char,
    pub search: char,
    pub open: char,
    pub parent: char,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            value: None,
            models: ModelSet::collections_only(),
            entity: Entity::default(),
            show_search: true,
            show_scroll: true,
            keybindings: KeybindingConfig::default(),
        }
    }
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: 'q',
            search: '/',
            open: 'l',
            parent: 'h',
        }
    }
}

impl PickerConfig {
    pub fn new(models: impl IntoIterator<Item = ModelKind>) -> Result<Self> {
        Ok(Self {
            models: ModelSet::new(models)?,
            ..Self::default()
        })
    }

    pub fn with_value(mut self, value: PickerValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = entity;
        self
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PickerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.models, ModelSet::collections_only());
        assert_eq!(config.entity, Entity::Collections);
        assert!(config.show_search);
        assert!(config.show_scroll);
        assert_eq!(config.keybindings.search, '/');
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "models": ["card", "dashboard"], "entity": "snippets", "value": {{ "id": 3, "model": "card" }} }}"#
        )
        .unwrap();

        let config = PickerConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.models.as_slice(), &[ModelKind::Card, ModelKind::Dashboard]);
        assert_eq!(config.entity, Entity::Snippets);
        assert_eq!(config.value, Some(PickerValue::new(ItemId::Id(3), ModelKind::Card)));
        assert!(config.show_search);
    }

    #[test]
    fn test_empty_models_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "models": [] }}"#).unwrap();
        assert!(PickerConfig::load_from_file(file.path()).is_err());
        assert!(PickerConfig::new(Vec::new()).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("picker.json");
        let config = PickerConfig::new([ModelKind::Collection])
            .unwrap()
            .with_value(PickerValue::root());
        config.save_to_file(&path).unwrap();
        assert_eq!(PickerConfig::load_from_file(&path).unwrap(), config);
    }
}
