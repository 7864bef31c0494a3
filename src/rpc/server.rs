//! `UrlShortener` service implementation.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use url::Url;

use super::error::RpcError;
use super::proto::url_shortener_server::UrlShortener;
use super::proto::{FullUrl, ShortUrl};
use crate::application::services::DynShortenerService;
use crate::utils::url_check::has_control_chars;

/// `shortener.v1.UrlShortener` backed by the shared shortener service.
pub struct ShortenerGrpcServer {
    shortener: Arc<DynShortenerService>,
}

impl ShortenerGrpcServer {
    pub fn new(shortener: Arc<DynShortenerService>) -> Self {
        Self { shortener }
    }
}

#[tonic::async_trait]
impl UrlShortener for ShortenerGrpcServer {
    async fn save(&self, request: Request<FullUrl>) -> Result<Response<ShortUrl>, Status> {
        let full_url = request.into_inner().url;
        Url::parse(&full_url).map_err(|e| RpcError::InvalidUrl(e.to_string()))?;
        if has_control_chars(&full_url) {
            return Err(RpcError::InvalidUrl("contains control characters".to_string()).into());
        }

        let code = self
            .shortener
            .get_short_code(&full_url)
            .await
            .map_err(RpcError::from)?;

        Ok(Response::new(ShortUrl { url: code }))
    }

    async fn redirect(&self, request: Request<ShortUrl>) -> Result<Response<FullUrl>, Status> {
        let code = request.into_inner().url;

        let full_url = self
            .shortener
            .get_full_url(&code)
            .await
            .map_err(RpcError::from)?;

        Ok(Response::new(FullUrl { url: full_url }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::ShortenerService;
    use crate::codegen::{CodeGenerator, IdSource, SequentialCodeGenerator};
    use crate::domain::repositories::{MockUrlRepository, StorageError, UrlRepository};
    use crate::infrastructure::memory::InMemoryUrlRepository;
    use tonic::Code;

    fn server_over(storage: Arc<dyn UrlRepository>) -> ShortenerGrpcServer {
        let codes: Arc<dyn CodeGenerator> =
            Arc::new(SequentialCodeGenerator::new(Arc::new(IdSource::new(0))));
        ShortenerGrpcServer::new(Arc::new(ShortenerService::new(storage, codes)))
    }

    fn server() -> ShortenerGrpcServer {
        server_over(Arc::new(InMemoryUrlRepository::new()))
    }

    #[tokio::test]
    async fn test_save_then_redirect() {
        let server = server();

        let short = server
            .save(Request::new(FullUrl {
                url: "https://example.com/grpc".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(short.url, "qqqqqqqqqq");

        let full = server
            .redirect(Request::new(short))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(full.url, "https://example.com/grpc");
    }

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let server = server();
        let request = || {
            Request::new(FullUrl {
                url: "https://example.com/same".to_string(),
            })
        };

        let first = server.save(request()).await.unwrap().into_inner();
        let second = server.save(request()).await.unwrap().into_inner();
        assert_eq!(first.url, second.url);
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_url() {
        let status = server()
            .save(Request::new(FullUrl {
                url: "not a url".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_save_rejects_control_chars() {
        let server = server();

        let status = server
            .save(Request::new(FullUrl {
                url: "https://example.com/\u{1}".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);

        let status = server
            .redirect(Request::new(ShortUrl {
                url: "qqqqqqqqqq".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_redirect_unknown_code() {
        let status = server()
            .redirect(Request::new(ShortUrl {
                url: "qqqqqqqqzz".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_backend_failure_is_internal() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_full_url()
            .returning(|_| Err(StorageError::Database(sqlx::Error::PoolTimedOut)));

        let status = server_over(Arc::new(repo))
            .redirect(Request::new(ShortUrl {
                url: "qqqqqqqqqw".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Internal);
    }
}
