use serde::{Deserialize, Serialize};

/// The eight general registers. `M` addresses memory through the CPU's
/// address latch but encodes like any other register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reg {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    M,
}

pub const REGISTERS: [(&str, Reg); 8] = [
    ("A", Reg::A),
    ("B", Reg::B),
    ("C", Reg::C),
    ("D", Reg::D),
    ("E", Reg::E),
    ("F", Reg::F),
    ("G", Reg::G),
    ("M", Reg::M),
];

impl Reg {
    /// Case-sensitive lookup by register name.
    pub fn from_name(name: &str) -> Option<Self> {
        REGISTERS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| *r)
    }

    /// 3-bit register-select code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_table_order() {
        for (i, (name, reg)) in REGISTERS.iter().enumerate() {
            assert_eq!(reg.code() as usize, i);
            assert_eq!(Reg::from_name(name), Some(*reg));
        }
        assert_eq!(Reg::from_name("a"), None);
        assert_eq!(Reg::from_name("X"), None);
    }
}
