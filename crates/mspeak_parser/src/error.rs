use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("could not tokenize input at: '{0}'")]
    Tokenize(String),
    #[error("expression nests {depth} levels deep (limit {max})")]
    TooDeeplyNested { depth: usize, max: usize },
    #[error("parsing ran out of time after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u64 },
}
