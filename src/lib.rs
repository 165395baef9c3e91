pub mod assembler;
pub mod emit;
pub mod encoder;
pub mod error;
pub mod instructions;
pub mod line;
pub mod literal;
pub mod memory;
pub mod reg;
pub mod relocate;
pub mod symbols;

pub use assembler::{assemble, AsmConfig, Assembler};
pub use encoder::MnemonicPolicy;
pub use error::{AsmError, ErrorKind};
pub use memory::{Cell, Image, MEM_SIZE};
pub use relocate::{relocate, Diagnostic, Layout, Program};
pub use symbols::{Symbol, SymbolKind, SymbolTable};
