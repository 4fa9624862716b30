use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use labyrinth_core::MazeLayout;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LayoutFormat {
    /// JSON for `.json` files, the text format otherwise
    #[default]
    Auto,
    Text,
    Json,
}

impl LayoutFormat {
    fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto if path.extension().is_some_and(|ext| ext == "json") => Self::Json,
            Self::Auto => Self::Text,
            explicit => explicit,
        }
    }
}

/// Reads a layout from `path`, or from stdin when `path` is `-`.
pub fn load_layout(path: &Path, format: LayoutFormat) -> Result<MazeLayout> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read maze from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read maze file {}", path.display()))?
    };

    log::debug!("Loaded {} bytes from {}", content.len(), path.display());
    parse_layout(&content, format.resolve(path))
        .with_context(|| format!("Invalid maze in {}", path.display()))
}

pub fn parse_layout(content: &str, format: LayoutFormat) -> Result<MazeLayout> {
    let layout: MazeLayout = match format {
        LayoutFormat::Json => serde_json::from_str(content)?,
        LayoutFormat::Text | LayoutFormat::Auto => content.parse()?,
    };
    Ok(layout)
}
