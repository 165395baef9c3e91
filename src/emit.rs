use std::io::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::relocate::Program;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Space-separated two-digit lowercase hex, one line.
    #[default]
    Hex,
    /// Raw bytes.
    Bin,
    /// Bytes, symbols and diagnostics as a JSON object.
    Json,
}

pub fn fmt_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn write_program<W: Write>(out: &mut W, program: &Program, format: Format) -> Result<()> {
    match format {
        Format::Hex => writeln!(out, "{}", fmt_hex(&program.bytes))?,
        Format::Bin => out.write_all(&program.bytes)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, program)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_two_digit() {
        assert_eq!(fmt_hex(&[0x11, 0x05, 0xab, 0x00]), "11 05 ab 00");
        assert_eq!(fmt_hex(&[]), "");
    }
}
