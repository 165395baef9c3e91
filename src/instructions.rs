use serde::{Deserialize, Serialize};

/// Operand layout an instruction is encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// Opcode byte only; operands are ignored.
    Bare,
    /// Opcode byte, then one optional address cell (`%label` or literal).
    Address,
    /// Opcode byte, then one cell per operand.
    Variadic,
    /// Register in the low three bits, then one immediate byte.
    RegImm,
    /// Register in the low three bits.
    Reg,
    /// Destination in bits 5..3, source in bits 2..0, optional address cell.
    RegPair,
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub shape: Shape,
}

/// Mask that clears the single register-select field (`ldi`, `push`, `pop`).
pub const REG_FIELD_MASK: u8 = 0b1111_1000;
/// Mask that clears both register fields of `mov`.
pub const REG_PAIR_MASK: u8 = 0b1100_0111;

const fn desc(mnemonic: &'static str, opcode: u8, shape: Shape) -> InstrDesc {
    InstrDesc {
        mnemonic,
        opcode,
        shape,
    }
}

pub const TABLE: &[InstrDesc] = &[
    desc("nop", 0x00, Shape::Bare),
    desc("call", 0b0000_0001, Shape::Address),
    desc("ret", 0b0000_0010, Shape::Bare),
    desc("lda", 0b1000_0111, Shape::Address),
    desc("out", 0b0000_0011, Shape::Bare),
    desc("in", 0b0000_0100, Shape::Bare),
    desc("hlt", 0b0000_0101, Shape::Bare),
    desc("cmp", 0b0000_0110, Shape::Variadic),
    desc("sta", 0b1011_1000, Shape::Address),
    desc("jmp", 0b0001_1000, Shape::Address),
    desc("jz", 0b0001_1001, Shape::Address),
    desc("jnz", 0b0001_1010, Shape::Address),
    // je/jne are aliases of jz/jnz
    desc("je", 0b0001_1001, Shape::Address),
    desc("jne", 0b0001_1010, Shape::Address),
    desc("jc", 0b0001_1011, Shape::Address),
    desc("jnc", 0b0001_1100, Shape::Address),
    desc("push", 0b0010_0000, Shape::Reg),
    desc("pop", 0b0010_1000, Shape::Reg),
    desc("add", 0b0100_0000, Shape::Variadic),
    desc("sub", 0b0100_1000, Shape::Variadic),
    desc("inc", 0b0101_0000, Shape::Bare),
    desc("dec", 0b0101_1000, Shape::Bare),
    desc("and", 0b0110_0000, Shape::Bare),
    desc("or", 0b0110_1000, Shape::Bare),
    desc("xor", 0b0111_0000, Shape::Bare),
    desc("adc", 0b0111_1000, Shape::Bare),
    desc("ldi", 0b0001_0000, Shape::RegImm),
    desc("mov", 0b1000_0000, Shape::RegPair),
];

pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonics_are_unique() {
        for (i, d) in TABLE.iter().enumerate() {
            assert!(
                TABLE[i + 1..].iter().all(|o| o.mnemonic != d.mnemonic),
                "duplicate mnemonic {}",
                d.mnemonic
            );
        }
    }

    #[test]
    fn register_field_is_clear_in_table() {
        for d in TABLE {
            match d.shape {
                Shape::Reg | Shape::RegImm => assert_eq!(d.opcode & !REG_FIELD_MASK, 0),
                Shape::RegPair => assert_eq!(d.opcode & !REG_PAIR_MASK, 0),
                _ => {}
            }
        }
    }
}
