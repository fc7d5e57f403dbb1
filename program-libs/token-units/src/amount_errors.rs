use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Empty amount")]
    Empty,
    #[error("Invalid amount '{0}'")]
    Invalid(String),
    #[error("Negative amount '{0}'")]
    Negative(String),
    #[error("Amount '{input}' has more than {decimals} decimal places")]
    TooPrecise { input: String, decimals: u8 },
    #[error("Unsupported decimals {0}")]
    UnsupportedDecimals(u8),
    #[error("Amount overflow")]
    Overflow,
}
