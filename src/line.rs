use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

pub const COMMENT: char = ';';
pub const LABEL_SUFFIX: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Text,
    Data,
}

impl Section {
    fn from_directive(s: &str) -> Option<Self> {
        match s {
            ".text" => Some(Section::Text),
            ".data" => Some(Section::Data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instr<'a> {
    pub mnemonic: &'a str,
    pub operands: Vec<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Empty,
    Directive(Section),
    /// `name:`, optionally followed by an instruction on the same line.
    Label {
        name: &'a str,
        instr: Option<Instr<'a>>,
    },
    Data {
        name: &'a str,
        value: &'a str,
    },
    Instr(Instr<'a>),
}

/// Drops the comment and surrounding whitespace.
pub fn strip(raw: &str) -> &str {
    let code = match raw.find(COMMENT) {
        Some(p) => &raw[..p],
        None => raw,
    };
    code.trim()
}

/// Splits on whitespace and commas.
pub fn tokenize(code: &str) -> Vec<&str> {
    code.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect()
}

/// Classifies one raw source line given the section currently in effect.
pub fn classify(raw: &str, section: Option<Section>) -> Result<Line<'_>, ErrorKind> {
    let code = strip(raw);
    if code.is_empty() {
        return Ok(Line::Empty);
    }
    if let Some(s) = Section::from_directive(code) {
        return Ok(Line::Directive(s));
    }
    match section {
        None => Err(ErrorKind::NoSection),
        Some(Section::Data) => classify_data(code),
        Some(Section::Text) => classify_text(code),
    }
}

fn classify_data(code: &str) -> Result<Line<'_>, ErrorKind> {
    let malformed = || ErrorKind::MalformedData(code.to_string());
    let (name, value) = code.split_once('=').ok_or_else(malformed)?;
    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() || value.is_empty() || name.contains(char::is_whitespace) {
        return Err(malformed());
    }
    Ok(Line::Data { name, value })
}

fn classify_text(code: &str) -> Result<Line<'_>, ErrorKind> {
    let mut tokens = tokenize(code);
    // `code` is non-empty and trimmed, so there is at least one token
    let head = tokens.remove(0);
    if let Some(name) = head.strip_suffix(LABEL_SUFFIX) {
        if name.is_empty() {
            return Err(ErrorKind::EmptyLabel);
        }
        let instr = split_instr(tokens);
        return Ok(Line::Label { name, instr });
    }
    Ok(Line::Instr(Instr {
        mnemonic: head,
        operands: tokens,
    }))
}

fn split_instr(mut tokens: Vec<&str>) -> Option<Instr<'_>> {
    if tokens.is_empty() {
        return None;
    }
    let mnemonic = tokens.remove(0);
    Some(Instr {
        mnemonic,
        operands: tokens,
    })
}
