use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::encoder::{self, MnemonicPolicy};
use crate::error::{AsmError, ErrorKind};
use crate::instructions;
use crate::line::{self, Instr, Line, Section};
use crate::literal;
use crate::memory::{Image, MEM_SIZE};
use crate::relocate::{self, Diagnostic, Layout, Program};
use crate::symbols::{self, DataDecl};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AsmConfig {
    /// Memory size in cells; at most [`MEM_SIZE`].
    pub capacity: usize,
    pub unknown_mnemonic: MnemonicPolicy,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            capacity: MEM_SIZE,
            unknown_mnemonic: MnemonicPolicy::Reject,
        }
    }
}

impl AsmConfig {
    pub fn validate(&self) -> Result<(), AsmError> {
        if self.capacity > MEM_SIZE {
            return Err(AsmError::Config(format!(
                "capacity {} exceeds the {MEM_SIZE}-byte address space",
                self.capacity
            )));
        }
        Ok(())
    }
}

/// State of one assembly run: the image and its cursor, the labels seen so
/// far, the data declarations and the section in effect.
#[derive(Debug, Clone)]
pub struct Assembler {
    cfg: AsmConfig,
    image: Image,
    section: Option<Section>,
    labels: IndexMap<String, u8>,
    data: IndexMap<String, DataDecl>,
    diagnostics: Vec<Diagnostic>,
}

impl Assembler {
    pub fn new(cfg: AsmConfig) -> Result<Self, AsmError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            image: Image::new(cfg.capacity),
            section: None,
            labels: IndexMap::new(),
            data: IndexMap::new(),
            diagnostics: Vec::new(),
        })
    }

    pub fn section(&self) -> Option<Section> {
        self.section
    }

    /// Address the next instruction will be written at.
    pub fn cursor(&self) -> usize {
        self.image.cursor()
    }

    /// Classifies and processes one source line (`number` is 1-based).
    pub fn line(&mut self, number: usize, raw: &str) -> Result<(), AsmError> {
        let at = |kind: ErrorKind| kind.at(number);
        match line::classify(raw, self.section).map_err(at)? {
            Line::Empty => {}
            Line::Directive(section) => {
                debug!(line = number, ?section, "section");
                self.section = Some(section);
            }
            Line::Label { name, instr } => {
                self.label(name).map_err(at)?;
                if let Some(instr) = instr {
                    self.instr(number, &instr)?;
                }
            }
            Line::Data { name, value } => self.data(number, name, value).map_err(at)?,
            Line::Instr(instr) => self.instr(number, &instr)?,
        }
        Ok(())
    }

    fn label(&mut self, name: &str) -> Result<(), ErrorKind> {
        let cursor = self.image.cursor();
        if cursor >= self.image.capacity() {
            return Err(ErrorKind::ImageFull {
                capacity: self.image.capacity(),
            });
        }
        let addr = cursor as u8;
        if let Some(prev) = self.labels.insert(name.to_string(), addr) {
            warn!(name, prev, addr, "label redefined");
        }
        debug!(name, addr, "label");
        Ok(())
    }

    fn data(&mut self, number: usize, name: &str, value: &str) -> Result<(), ErrorKind> {
        let v = literal::parse_signed(value)
            .ok_or_else(|| ErrorKind::BadLiteral(value.to_string()))?;
        let (byte, truncated) = literal::to_byte(v);
        if truncated {
            warn!(name, value = v, byte, "data value truncated to one byte");
        }
        let decl = DataDecl {
            value: byte,
            line: number,
        };
        if let Some(prev) = self.data.insert(name.to_string(), decl) {
            warn!(name, prev = prev.value, value = byte, "data symbol redefined");
        }
        Ok(())
    }

    fn instr(&mut self, number: usize, instr: &Instr<'_>) -> Result<(), AsmError> {
        let addr = self.image.cursor();
        encoder::encode(&mut self.image, instr, self.cfg.unknown_mnemonic)
            .map_err(|kind| kind.at(number))?;
        if instructions::lookup(instr.mnemonic).is_none() {
            self.diagnostics.push(Diagnostic::UnknownMnemonic {
                mnemonic: instr.mnemonic.to_string(),
                line: number,
                addr: addr as u8,
            });
        }
        Ok(())
    }

    /// Ends the text pass: places the data section after the code and
    /// completes the symbol table.
    pub fn finish(mut self) -> Result<Layout, AsmError> {
        let text_len = self.image.cursor();
        let symbols = symbols::build(&mut self.image, &self.data, &self.labels)?;
        info!(
            text = text_len,
            data = self.image.cursor() - text_len,
            symbols = symbols.len(),
            "layout complete"
        );
        Ok(Layout {
            image: self.image,
            symbols,
            diagnostics: self.diagnostics,
        })
    }
}

/// Assembles a whole source text.
pub fn assemble(source: &str, cfg: &AsmConfig) -> Result<Program, AsmError> {
    let mut asm = Assembler::new(*cfg)?;
    for (idx, raw) in source.lines().enumerate() {
        asm.line(idx + 1, raw)?;
    }
    let layout = asm.finish()?;
    Ok(relocate::relocate(layout))
}
