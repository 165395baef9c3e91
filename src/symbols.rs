use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AsmError;
use crate::memory::{Cell, Image};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Label,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub addr: u8,
    pub kind: SymbolKind,
}

/// A `name = value` declaration from the data section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDecl {
    pub value: u8,
    pub line: usize,
}

/// Unified name -> address table, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable(IndexMap<String, Symbol>);

impl SymbolTable {
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.0.get(name).copied()
    }

    pub fn addr(&self, name: &str) -> Option<u8> {
        self.get(name).map(|s| s.addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Symbol)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Appends every data declaration after the text section, in declaration
/// order, then merges the labels over them. A label shadows a data symbol
/// of the same name; the data cell is still placed.
pub fn build(
    image: &mut Image,
    data: &IndexMap<String, DataDecl>,
    labels: &IndexMap<String, u8>,
) -> Result<SymbolTable, AsmError> {
    let mut table = IndexMap::with_capacity(data.len() + labels.len());
    for (name, decl) in data {
        let addr = image
            .push(Cell::Resolved(decl.value))
            .map_err(|e| e.at(decl.line))?;
        debug!(name = name.as_str(), addr, value = decl.value, "placed data");
        table.insert(
            name.clone(),
            Symbol {
                addr,
                kind: SymbolKind::Data,
            },
        );
    }
    for (name, &addr) in labels {
        let prev = table.insert(
            name.clone(),
            Symbol {
                addr,
                kind: SymbolKind::Label,
            },
        );
        if let Some(Symbol {
            kind: SymbolKind::Data,
            addr: data_addr,
        }) = prev
        {
            warn!(
                name = name.as_str(),
                label = addr,
                data = data_addr,
                "label shadows data symbol"
            );
        }
    }
    Ok(SymbolTable(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn data_follows_text_and_labels_win() {
        let mut image = Image::new(8);
        image.push(Cell::Resolved(0x05)).unwrap();
        let mut data = IndexMap::new();
        data.insert("x".to_string(), DataDecl { value: 7, line: 3 });
        data.insert("y".to_string(), DataDecl { value: 9, line: 4 });
        let mut labels = IndexMap::new();
        labels.insert("y".to_string(), 0u8);

        let table = build(&mut image, &data, &labels).unwrap();
        assert_eq!(
            image.cells(),
            &[Cell::Resolved(5), Cell::Resolved(7), Cell::Resolved(9)]
        );
        assert_eq!(table.addr("x"), Some(1));
        assert_eq!(
            table.get("y"),
            Some(Symbol {
                addr: 0,
                kind: SymbolKind::Label
            })
        );
    }
}
