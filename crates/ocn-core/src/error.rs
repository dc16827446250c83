use thiserror::Error;

pub type OcnResult<T> = Result<T, OcnError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcnError {
    #[error("Negative cost for {what}: {value}")]
    NegativeCost { what: &'static str, value: i64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
