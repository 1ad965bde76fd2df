//! HTTP implementation of the catalog client

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::{environments_query, plants_query, ListQuery, PlantCatalog, PLANTS_RESOURCE};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::models::{Environment, Plant, PlantId};
use crate::util::{compact_text, is_http_url};

/// Catalog client talking to the REST API over HTTP
#[derive(Clone)]
pub struct HttpCatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !is_http_url(&base_url) {
            return Err(Error::Config(format!(
                "catalog base URL must include http:// or https://: '{base_url}'"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the API root
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Run a list query and decode the JSON array it returns.
    pub async fn list<T: DeserializeOwned>(&self, query: &ListQuery) -> Result<Vec<T>> {
        self.get_json(&query.to_path()).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "Fetching from catalog");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "Catalog request failed");
            return Err(api_error(status, &body));
        }

        Ok(response.json::<T>().await?)
    }
}

impl PlantCatalog for HttpCatalogClient {
    async fn fetch_environments(&self) -> Result<Vec<Environment>> {
        self.list(&environments_query()).await
    }

    async fn fetch_plants(&self, page: u32, limit: u32) -> Result<Vec<Plant>> {
        let plants: Vec<Plant> = self.list(&plants_query(page, limit)).await?;
        tracing::debug!(page, count = plants.len(), "Fetched plant page");
        Ok(plants)
    }

    async fn fetch_plant(&self, id: &PlantId) -> Result<Plant> {
        match self.get_json(&format!("{PLANTS_RESOURCE}/{id}")).await {
            Err(Error::Api { status: 404, .. }) => Err(Error::NotFound(id.to_string())),
            other => other,
        }
    }
}

fn api_error(status: StatusCode, body: &str) -> Error {
    Error::Api {
        status: status.as_u16(),
        body: compact_text(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve a single canned response and hand back the request line.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            loop {
                let read = socket.read(&mut buffer).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..read]);
                if request.windows(4).any(|window| window == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (base_url, handle)
    }

    #[test]
    fn new_rejects_non_http_base_url() {
        assert!(HttpCatalogClient::new("localhost:3333", None).is_err());
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = HttpCatalogClient::new("http://localhost:3333/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3333");
        assert_eq!(
            client.endpoint("/plants_environments"),
            "http://localhost:3333/plants_environments"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fetch_plants_requests_sorted_page() {
        let body = r#"[{
            "id": 4,
            "name": "Imbé",
            "about": "Cresce bem em ambientes internos.",
            "water_tips": "Regue 2 vezes na semana.",
            "photo": "https://example.com/imbe.svg",
            "environments": ["living_room"],
            "frequency": { "times": 2, "repeat_every": "week" }
        }]"#;
        let (base_url, server) = serve_once("200 OK", body).await;
        let client = HttpCatalogClient::new(base_url, Some(Duration::from_secs(5))).unwrap();

        let plants = client.fetch_plants(2, 8).await.unwrap();
        let request_line = server.await.unwrap();

        assert_eq!(
            request_line,
            "GET /plants?_sort=name&_order=asc&_page=2&_limit=8 HTTP/1.1"
        );
        assert_eq!(plants.len(), 1);
        assert_eq!(plants[0].id.as_str(), "4");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fetch_environments_requests_title_order() {
        let body = r#"[{"key":"kitchen","title":"Cozinha"}]"#;
        let (base_url, server) = serve_once("200 OK", body).await;
        let client = HttpCatalogClient::new(base_url, None).unwrap();

        let environments = client.fetch_environments().await.unwrap();
        let request_line = server.await.unwrap();

        assert!(request_line.starts_with("GET /plants_environments?_sort=title&_order=asc "));
        assert_eq!(environments[0].key, "kitchen");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn non_success_status_is_an_api_error() {
        let (base_url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let client = HttpCatalogClient::new(base_url, None).unwrap();

        let error = client.fetch_environments().await.unwrap_err();
        server.await.unwrap();

        match error {
            Error::Api { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_plant_maps_to_not_found() {
        let (base_url, server) = serve_once("404 Not Found", "{}").await;
        let client = HttpCatalogClient::new(base_url, None).unwrap();

        let error = client.fetch_plant(&PlantId::from("99")).await.unwrap_err();
        let request_line = server.await.unwrap();

        assert!(request_line.starts_with("GET /plants/99 "));
        assert!(matches!(error, Error::NotFound(id) if id == "99"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn malformed_payload_is_an_error() {
        let (base_url, server) = serve_once("200 OK", r#"{"not":"an array"}"#).await;
        let client = HttpCatalogClient::new(base_url, None).unwrap();

        let result = client.fetch_plants(1, 8).await;
        server.await.unwrap();

        assert!(matches!(result, Err(Error::Http(_))));
    }
}
