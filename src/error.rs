use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// A fatal problem with one source line (1-based).
    #[error("line {line}: {kind}")]
    Line { line: usize, kind: ErrorKind },
    #[error("invalid configuration: {0}")]
    Config(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("statement before any `.text` or `.data` directive")]
    NoSection,
    #[error("unknown register `{0}`")]
    UnknownRegister(String),
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("`{mnemonic}` expects {expected}")]
    MissingOperand {
        mnemonic: &'static str,
        expected: &'static str,
    },
    #[error("invalid operand `{operand}` for `{mnemonic}`")]
    InvalidOperand {
        mnemonic: &'static str,
        operand: String,
    },
    #[error("bad numeric literal `{0}`")]
    BadLiteral(String),
    #[error("label name is empty")]
    EmptyLabel,
    #[error("malformed data declaration `{0}` (expected `name = value`)")]
    MalformedData(String),
    #[error("program does not fit in {capacity} bytes of memory")]
    ImageFull { capacity: usize },
}

impl ErrorKind {
    pub fn at(self, line: usize) -> AsmError {
        AsmError::Line { line, kind: self }
    }
}

impl AsmError {
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            AsmError::Line { kind, .. } => Some(kind),
            AsmError::Config(_) => None,
        }
    }
}
