use clap::{Args, Parser, Subcommand};

use crate::config::PickerConfig;
use crate::error::Result;
use crate::model::{Entity, ModelKind, ModelSet, PickerValue};

#[derive(Parser)]
#[command(name = "collection-picker")]
#[command(about = "Pick a collection or a saved item from a collection tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive picker (default)
    Run {
        #[command(flatten)]
        picker: PickerArgs,
    },
    /// Render one frame of the picker as text
    Screenshot {
        #[command(flatten)]
        picker: PickerArgs,
        /// Output file for the screenshot (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Terminal width for rendering
        #[arg(long, default_value = "80")]
        width: u16,
        /// Terminal height for rendering
        #[arg(long, default_value = "24")]
        height: u16,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PickerArgs {
    /// JSON catalog to browse (defaults to the built-in demo catalog)
    #[arg(long)]
    pub catalog: Option<String>,
    /// JSON picker configuration file
    #[arg(short, long)]
    pub config: Option<String>,
    /// Selectable models, comma separated
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub models: Vec<ModelKind>,
    /// Namespace to browse
    #[arg(short, long, value_enum)]
    pub entity: Option<Entity>,
    /// Current value as JSON, e.g. '{"id":null,"model":"collection"}'
    #[arg(long, value_parser = parse_value)]
    pub value: Option<PickerValue>,
    /// Hide the search toggle
    #[arg(long)]
    pub no_search: bool,
    /// Do not draw a scrollbar
    #[arg(long)]
    pub no_scroll: bool,
}

fn parse_value(s: &str) -> std::result::Result<PickerValue, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid value: {}", e))
}

impl PickerArgs {
    /// Config file first, then flags on top of it.
    pub fn to_config(&self) -> Result<PickerConfig> {
        let mut config = match &self.config {
            Some(path) => PickerConfig::load_from_file(path)?,
            None => PickerConfig::default(),
        };
        if !self.models.is_empty() {
            config.models = ModelSet::new(self.models.iter().copied())?;
        }
        if let Some(entity) = self.entity {
            config.entity = entity;
        }
        if let Some(value) = &self.value {
            config.value = Some(value.clone());
        }
        if self.no_search {
            config.show_search = false;
        }
        if self.no_scroll {
            config.show_scroll = false;
        }
        Ok(config)
    }
}
