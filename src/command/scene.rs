use std::path::Path;

use anyhow::Context as _;

use crate::{
    command::{
        model::{Command, Directive, normalize_commands},
        symbols::SymbolTable,
    },
    foundation::error::{MdlError, MdlResult},
};

/// Parser output as stored on disk: the raw command list plus initial symbols.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SceneFile {
    pub commands: Vec<Command>,
    #[serde(default)]
    pub symbols: SymbolTable,
}

/// A normalized, ready-to-run scene.
#[derive(Clone, Debug)]
pub struct Scene {
    pub directives: Vec<Directive>,
    pub symbols: SymbolTable,
}

impl Scene {
    pub fn new(commands: &[Command], symbols: SymbolTable) -> MdlResult<Self> {
        Ok(Self {
            directives: normalize_commands(commands)?,
            symbols,
        })
    }

    pub fn from_file(file: &SceneFile) -> MdlResult<Self> {
        Self::new(&file.commands, file.symbols.clone())
    }

    pub fn from_json_str(json: &str) -> MdlResult<Self> {
        let file: SceneFile = serde_json::from_str(json)
            .map_err(|e| MdlError::serde(format!("parse scene JSON: {e}")))?;
        Self::from_file(&file)
    }

    pub fn from_json_path(path: &Path) -> MdlResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&json)
    }
}
