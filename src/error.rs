/// Errors raised by the shop and its runtimes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The shop was configured with values it can't run with.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A haircut routine failed or panicked.
    #[error("processing failed: {0}")]
    Processing(String),

    /// The OS refused to spawn a thread.
    #[error(transparent)]
    ThreadStart(#[from] std::io::Error),
}

impl Error {
    #[inline]
    pub(crate) fn config<T: ToString>(msg: T) -> Self {
        Self::InvalidConfiguration(msg.to_string())
    }

    /// Builds a [`Error::Processing`] from anything printable.
    #[inline]
    pub fn processing<T: ToString>(msg: T) -> Self {
        Self::Processing(msg.to_string())
    }
}
