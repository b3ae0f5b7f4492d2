use thiserror::Error;

/// An assembly failure, tied to the source line that caused it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind} in `{text}`")]
pub struct AssemblerError {
    /// 1-based line number in the source text
    pub line: usize,
    /// The line's text, without its comment
    pub text: String,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("unsupported instruction `{0}`")]
    UnknownInstruction(String),

    #[error("`{mnemonic}` takes {expected} operand(s) but {found} were given")]
    OperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("operand {position} should be {expected}, found {found}")]
    InvalidOperand {
        position: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown register `{0}`")]
    UnknownRegister(String),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("{field} {value} is out of range ({min} to {max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("label `{0}` not found")]
    UndefinedLabel(String),

    #[error("label `{0}` is already defined")]
    DuplicateLabel(String),
}
