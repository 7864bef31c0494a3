//! Mapping of adapter failures onto gRPC status codes.

use thiserror::Error;
use tonic::{Code, Status};

use crate::application::services::{ErrorKind, ShortenerError};

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
}

impl From<RpcError> for Status {
    fn from(error: RpcError) -> Self {
        match error {
            RpcError::InvalidUrl(reason) => Status::new(Code::InvalidArgument, reason),
            RpcError::Shortener(source) => match source.kind() {
                ErrorKind::NotFound => Status::new(Code::NotFound, "short code not found"),
                _ => {
                    tracing::error!(error = %source, "gRPC request failed");
                    Status::new(Code::Internal, "internal error")
                }
            },
        }
    }
}
