use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::memory::{Cell, Image};
use crate::symbols::SymbolTable;

/// Image and symbol table after both the text pass and data placement.
/// Only [`crate::assembler::Assembler::finish`] produces one.
#[derive(Debug, Clone)]
pub struct Layout {
    pub(crate) image: Image,
    pub(crate) symbols: SymbolTable,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Layout {
    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Non-fatal findings of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The cell at `addr` named a symbol nobody defined; it was set to 0.
    UndefinedSymbol { name: String, addr: u8 },
    /// An unknown mnemonic was encoded as `0x00` at `addr`.
    UnknownMnemonic { mnemonic: String, line: usize, addr: u8 },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UndefinedSymbol { name, addr } => {
                write!(f, "undefined symbol `{name}` referenced at {addr:#04x}")
            }
            Diagnostic::UnknownMnemonic {
                mnemonic,
                line,
                addr,
            } => write!(
                f,
                "line {line}: unknown mnemonic `{mnemonic}` encoded as nop at {addr:#04x}"
            ),
        }
    }
}

/// Fully resolved assembly output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub bytes: Vec<u8>,
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Rewrites every pending cell to its symbol's address. Undefined names
/// become 0 and are reported, never fatal.
pub fn relocate(layout: Layout) -> Program {
    let Layout {
        image,
        symbols,
        mut diagnostics,
    } = layout;
    let mut bytes = Vec::with_capacity(image.cursor());
    let mut resolved = 0usize;

    for (addr, cell) in image.into_cells().into_iter().enumerate() {
        let byte = match cell {
            Cell::Resolved(b) => b,
            Cell::Pending(name) => match symbols.addr(&name) {
                Some(v) => {
                    resolved += 1;
                    v
                }
                None => {
                    warn!(name = name.as_str(), addr, "undefined symbol");
                    diagnostics.push(Diagnostic::UndefinedSymbol {
                        name,
                        addr: addr as u8,
                    });
                    0
                }
            },
        };
        bytes.push(byte);
    }
    info!(len = bytes.len(), resolved, "relocation complete");

    Program {
        bytes,
        symbols,
        diagnostics,
    }
}
