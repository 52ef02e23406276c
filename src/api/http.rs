use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use super::CreditoApi;
use crate::config::{ApiConfig, TERM_PAGE, TERM_PAGE_SIZE, USER_AGENT};
use crate::error::AppError;
use crate::models::{Credito, PageResponse};

/// `CreditoApi` over HTTP against `<api-url>/api/v1/creditos`.
pub struct HttpCreditoApi {
    client: Client,
    base: Url,
}

impl HttpCreditoApi {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base: config.base_url()?,
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, AppError> {
        // URL parsing folds `.` and `..` away, even percent-encoded.
        if let Some(dots) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(AppError::InvalidUrl(format!("path segment {dots:?}")));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::InvalidUrl(self.base.to_string()))?
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn numero_url(&self, numero: &str) -> Result<Url, AppError> {
        self.url(&["numero", numero])
    }

    pub(crate) fn nfse_url(&self, nfse: &str) -> Result<Url, AppError> {
        self.url(&["nfse", nfse])
    }

    pub(crate) fn buscar_url(&self, termo: &str) -> Result<Url, AppError> {
        let mut url = self.url(&["buscar"])?;
        url.query_pairs_mut()
            .append_pair("termo", termo)
            .append_pair("page", &TERM_PAGE.to_string())
            .append_pair("size", &TERM_PAGE_SIZE.to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        tracing::debug!("GET {url}");
        let resp = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!("GET {url} -> HTTP {status}");
            return Err(AppError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CreditoApi for HttpCreditoApi {
    async fn lookup_by_credit_number(&self, numero: &str) -> Result<Credito, AppError> {
        self.get_json(self.numero_url(numero)?).await
    }

    async fn lookup_by_invoice_number(&self, nfse: &str) -> Result<Credito, AppError> {
        self.get_json(self.nfse_url(nfse)?).await
    }

    async fn search_by_term(&self, termo: &str) -> Result<PageResponse<Credito>, AppError> {
        self.get_json(self.buscar_url(termo)?).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::error::{ErrorKind, classify_error};
    use crate::search::{MSG_NOT_FOUND_INVOICE, SearchForm, SearchMode};

    /// Answers a single request on a loopback port with a canned response and
    /// hands back the request line.
    async fn serve_once(status: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            let request = String::from_utf8_lossy(&request).into_owned();
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{addr}"), handle)
    }

    fn local_api(api_url: String) -> HttpCreditoApi {
        HttpCreditoApi::new(&ApiConfig {
            api_url,
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap()
    }

    fn api() -> HttpCreditoApi {
        HttpCreditoApi::new(&ApiConfig {
            api_url: "http://fisco.example.com:8080".into(),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap()
    }

    #[test]
    fn test_lookup_urls() {
        let api = api();
        assert_eq!(
            api.numero_url("123456").unwrap().as_str(),
            "http://fisco.example.com:8080/api/v1/creditos/numero/123456"
        );
        assert_eq!(
            api.nfse_url("7891011").unwrap().as_str(),
            "http://fisco.example.com:8080/api/v1/creditos/nfse/7891011"
        );
    }

    #[test]
    fn test_lookup_url_encodes_segment() {
        let url = api().numero_url("12/34 5").unwrap();
        assert_eq!(url.path(), "/api/v1/creditos/numero/12%2F34%205");
    }

    #[test]
    fn test_lookup_url_rejects_dot_segments() {
        let api = api();
        for numero in [".", ".."] {
            assert!(matches!(
                api.numero_url(numero),
                Err(AppError::InvalidUrl(_))
            ));
            assert!(matches!(api.nfse_url(numero), Err(AppError::InvalidUrl(_))));
        }
        assert_eq!(
            api.numero_url("...").unwrap().path(),
            "/api/v1/creditos/numero/..."
        );
    }

    #[test]
    fn test_buscar_url_has_fixed_paging() {
        let url = api().buscar_url("7891011").unwrap();
        assert_eq!(url.path(), "/api/v1/creditos/buscar");
        assert_eq!(url.query(), Some("termo=7891011&page=0&size=100"));

        let pairs: Vec<(String, String)> = api()
            .buscar_url("nota fiscal & cia")
            .unwrap()
            .query_pairs()
            .into_owned()
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("termo".into(), "nota fiscal & cia".into()),
                ("page".into(), "0".into()),
                ("size".into(), "100".into()),
            ]
        );
    }

    #[test]
    fn test_request_is_get() {
        let api = api();
        let request = api
            .client
            .get(api.buscar_url("abc").unwrap())
            .build()
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert!(request.url().as_str().ends_with("/buscar?termo=abc&page=0&size=100"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_generic_error() {
        let api = HttpCreditoApi::new(&ApiConfig {
            // Port 9 (discard) on localhost is not expected to be listening.
            api_url: "http://127.0.0.1:9".into(),
            timeout: Some(Duration::from_secs(2)),
        })
        .unwrap();
        let err = api.lookup_by_credit_number("1").await.unwrap_err();
        assert_eq!(classify_error(&err), ErrorKind::Other);
    }

    #[tokio::test]
    async fn test_not_found_response_is_status_error() {
        let (url, server) = serve_once("404 Not Found", "").await;
        let err = local_api(url).lookup_by_credit_number("000").await.unwrap_err();

        assert!(matches!(err, AppError::Status { status: 404 }));
        assert_eq!(
            server.await.unwrap(),
            "GET /api/v1/creditos/numero/000 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_not_found_response_empties_form() {
        let (url, server) = serve_once("404 Not Found", "").await;
        let api = local_api(url);

        let mut form = SearchForm::new();
        form.mode = SearchMode::Invoice;
        form.term = " 0000 ".into();
        form.search(&api).await;

        assert!(!form.is_loading());
        assert!(form.results().is_empty());
        assert!(form.is_empty_result());
        assert_eq!(form.error(), MSG_NOT_FOUND_INVOICE);
        assert_eq!(server.await.unwrap(), "GET /api/v1/creditos/nfse/0000 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_server_error_response_is_generic() {
        let (url, server) = serve_once("500 Internal Server Error", "{}").await;
        let err = local_api(url).lookup_by_invoice_number("1").await.unwrap_err();
        assert!(matches!(err, AppError::Status { status: 500 }));
        assert_eq!(classify_error(&err), ErrorKind::Other);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_ok_response_is_decoded() {
        let body = r#"{"content":[{"id":1,"numeroCreditoConstituido":"123456","numeroNFSe":"7891011","dataConstituicao":"2024-02-25","valorISSQN":1500.75,"tipoCredito":"ISSQN","status":"ATIVO"}],"totalElements":1,"totalPages":1,"size":100,"number":0}"#;
        let (url, server) = serve_once("200 OK", body).await;
        let page = local_api(url).search_by_term("789").await.unwrap();

        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].numero_nfse, "7891011");
        assert_eq!(
            server.await.unwrap(),
            "GET /api/v1/creditos/buscar?termo=789&page=0&size=100 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let (url, server) = serve_once("200 OK", "<html>").await;
        let err = local_api(url).lookup_by_credit_number("1").await.unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
        server.await.unwrap();
    }
}
