pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("scene layout requires at least one configured slot")]
    NoSlots,

    #[error("invalid tree config: {message}")]
    InvalidConfig { message: String },
}
