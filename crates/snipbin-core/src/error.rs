use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("stored code is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("stored code is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("invalid snippet id: {0}")]
    InvalidId(#[from] uuid::Error),

    #[error("expiry of {seconds}s is out of range")]
    ExpiryOutOfRange { seconds: f64 },
}
