use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache snapshot could not be encoded or decoded: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("cache snapshot has an incompatible format (version {version})")]
    IncompatibleSnapshot { version: u32 },
}
