//! gRPC adapter over [`ShortenerService`](crate::application::services::ShortenerService).
//!
//! Compiled only with the `grpc` feature.

mod error;
mod server;

pub use error::RpcError;
pub use server::ShortenerGrpcServer;

/// Types generated from `proto/shortener/v1/shortener.proto`.
pub mod proto {
    tonic::include_proto!("shortener.v1");
}
