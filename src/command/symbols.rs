use std::collections::BTreeMap;

use crate::{
    foundation::error::{MdlError, MdlResult},
    render::shading::Reflectance,
};

/// A named entry produced by the parser.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Symbol {
    Knob { value: f64 },
    Constants(Reflectance),
}

/// Name to [`Symbol`] mapping shared by every frame of a run.
///
/// Knob entries are overwritten in place before each frame; everything else is read-only.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SymbolTable(BTreeMap<String, Symbol>);

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_knob(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.insert(name.into(), Symbol::Knob { value });
        self
    }

    pub fn with_constants(mut self, name: impl Into<String>, reflectance: Reflectance) -> Self {
        self.0.insert(name.into(), Symbol::Constants(reflectance));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.0.get(name)
    }

    pub fn knob(&self, name: &str) -> Option<f64> {
        match self.0.get(name)? {
            Symbol::Knob { value } => Some(*value),
            Symbol::Constants(_) => None,
        }
    }

    pub fn constants(&self, name: &str) -> Option<&Reflectance> {
        match self.0.get(name)? {
            Symbol::Constants(r) => Some(r),
            Symbol::Knob { .. } => None,
        }
    }

    /// Set (or create) a knob. Refuses to clobber a non-knob symbol of the same name.
    pub fn set_knob(&mut self, name: &str, value: f64) -> MdlResult<()> {
        match self.0.get_mut(name) {
            Some(Symbol::Knob { value: slot }) => *slot = value,
            Some(Symbol::Constants(_)) => {
                return Err(MdlError::validation(format!(
                    "symbol '{name}' is a constants set, not a knob"
                )));
            }
            None => {
                self.0.insert(name.to_string(), Symbol::Knob { value });
            }
        }
        Ok(())
    }

    /// Overwrite the knobs resolved for one frame; untouched knobs keep their value.
    pub fn merge_frame(&mut self, values: &BTreeMap<String, f64>) -> MdlResult<()> {
        for (name, value) in values {
            self.set_knob(name, *value)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/command/symbols.rs"]
mod tests;
