use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ErrorKind;
use crate::instructions::{self, InstrDesc, Shape, REG_FIELD_MASK, REG_PAIR_MASK};
use crate::line::Instr;
use crate::literal;
use crate::memory::{Cell, Image};
use crate::reg::Reg;

/// Prefix marking an operand as a symbolic reference.
pub const RELOC_MARKER: char = '%';

/// What to do with a mnemonic missing from the instruction table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MnemonicPolicy {
    /// Fail the run.
    #[default]
    Reject,
    /// Encode a single `0x00` byte and warn.
    Nop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
    Reg(Reg),
    Ref(&'a str),
    Lit(i64),
}

impl<'a> Operand<'a> {
    /// Register name, `%name` reference, or numeric literal, in that order.
    /// A lone uppercase letter that names no register is an unknown register.
    pub fn parse(tok: &'a str) -> Result<Self, ErrorKind> {
        if let Some(r) = Reg::from_name(tok) {
            return Ok(Operand::Reg(r));
        }
        if let Some(name) = tok.strip_prefix(RELOC_MARKER) {
            return Ok(Operand::Ref(name));
        }
        if let Some(v) = literal::parse_signed(tok) {
            return Ok(Operand::Lit(v));
        }
        if looks_like_register(tok) {
            return Err(ErrorKind::UnknownRegister(tok.to_string()));
        }
        Err(ErrorKind::BadLiteral(tok.to_string()))
    }
}

fn looks_like_register(tok: &str) -> bool {
    let mut chars = tok.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}

/// Encodes one instruction at the image cursor and returns how many cells
/// were written.
pub fn encode(
    image: &mut Image,
    instr: &Instr<'_>,
    policy: MnemonicPolicy,
) -> Result<usize, ErrorKind> {
    let start = image.cursor();
    let Some(desc) = instructions::lookup(instr.mnemonic) else {
        return match policy {
            MnemonicPolicy::Reject => {
                Err(ErrorKind::UnknownMnemonic(instr.mnemonic.to_string()))
            }
            MnemonicPolicy::Nop => {
                warn!(
                    mnemonic = instr.mnemonic,
                    addr = start,
                    "unknown mnemonic encoded as nop"
                );
                image.push(Cell::Resolved(0))?;
                Ok(1)
            }
        };
    };

    let ops = &instr.operands;
    match desc.shape {
        Shape::Bare => {
            ignore(desc, start, ops);
            image.push(Cell::Resolved(desc.opcode))?;
        }
        Shape::Address => {
            image.push(Cell::Resolved(desc.opcode))?;
            if let Some((tok, rest)) = ops.split_first() {
                match address(desc, tok)? {
                    Some(cell) => {
                        image.push(cell)?;
                        ignore(desc, start, rest);
                    }
                    None => ignore(desc, start, ops),
                }
            }
        }
        Shape::Variadic => {
            image.push(Cell::Resolved(desc.opcode))?;
            for tok in ops {
                let cell = match Operand::parse(tok)? {
                    Operand::Reg(r) => Cell::Resolved(r.code()),
                    Operand::Ref(name) => pending(desc, tok, name)?,
                    Operand::Lit(v) => Cell::Resolved(byte(v, tok)),
                };
                image.push(cell)?;
            }
        }
        Shape::RegImm => {
            const EXPECTED: &str = "a register and an immediate";
            expect_at_most(desc, ops, 2)?;
            let r = register(desc, ops.first(), EXPECTED)?;
            let tok = ops.get(1).ok_or(ErrorKind::MissingOperand {
                mnemonic: desc.mnemonic,
                expected: EXPECTED,
            })?;
            let imm = literal::parse_signed(tok)
                .ok_or_else(|| ErrorKind::BadLiteral(tok.to_string()))?;
            image.push(Cell::Resolved((desc.opcode & REG_FIELD_MASK) | r.code()))?;
            image.push(Cell::Resolved(byte(imm, tok)))?;
        }
        Shape::Reg => {
            expect_at_most(desc, ops, 1)?;
            let r = register(desc, ops.first(), "a register")?;
            image.push(Cell::Resolved((desc.opcode & REG_FIELD_MASK) | r.code()))?;
        }
        Shape::RegPair => {
            const EXPECTED: &str = "a destination and a source register";
            let dst = register(desc, ops.first(), EXPECTED)?;
            let src = register(desc, ops.get(1), EXPECTED)?;
            let opcode = (desc.opcode & REG_PAIR_MASK) | (dst.code() << 3) | src.code();
            image.push(Cell::Resolved(opcode))?;
            // only a `%name` third operand adds a cell
            let extra = ops.get(2..).unwrap_or_default();
            if let Some((tok, rest)) = extra.split_first() {
                match tok.strip_prefix(RELOC_MARKER) {
                    Some(name) => {
                        image.push(pending(desc, tok, name)?)?;
                        ignore(desc, start, rest);
                    }
                    None => ignore(desc, start, extra),
                }
            }
        }
    }

    let len = image.cursor() - start;
    debug!(mnemonic = desc.mnemonic, addr = start, len, "encoded");
    Ok(len)
}

fn expect_at_most(desc: &InstrDesc, ops: &[&str], n: usize) -> Result<(), ErrorKind> {
    match ops.get(n) {
        Some(extra) => Err(ErrorKind::InvalidOperand {
            mnemonic: desc.mnemonic,
            operand: extra.to_string(),
        }),
        None => Ok(()),
    }
}

fn ignore(desc: &InstrDesc, addr: usize, ops: &[&str]) {
    if !ops.is_empty() {
        warn!(mnemonic = desc.mnemonic, addr, ignored = ?ops, "operands ignored");
    }
}

fn register(
    desc: &InstrDesc,
    tok: Option<&&str>,
    expected: &'static str,
) -> Result<Reg, ErrorKind> {
    let tok = tok.ok_or(ErrorKind::MissingOperand {
        mnemonic: desc.mnemonic,
        expected,
    })?;
    Reg::from_name(tok).ok_or_else(|| ErrorKind::UnknownRegister(tok.to_string()))
}

/// Branch target: a `%name` reference or a literal address. Anything else
/// yields `None` and is dropped by the caller.
fn address(desc: &InstrDesc, tok: &str) -> Result<Option<Cell>, ErrorKind> {
    if let Some(name) = tok.strip_prefix(RELOC_MARKER) {
        return pending(desc, tok, name).map(Some);
    }
    Ok(literal::parse_signed(tok).map(|v| Cell::Resolved(byte(v, tok))))
}

fn pending(desc: &InstrDesc, tok: &str, name: &str) -> Result<Cell, ErrorKind> {
    if name.is_empty() {
        return Err(ErrorKind::InvalidOperand {
            mnemonic: desc.mnemonic,
            operand: tok.to_string(),
        });
    }
    Ok(Cell::Pending(name.to_string()))
}

fn byte(v: i64, tok: &str) -> u8 {
    let (b, truncated) = literal::to_byte(v);
    if truncated {
        warn!(literal = tok, value = v, byte = b, "literal truncated to one byte");
    }
    b
}
