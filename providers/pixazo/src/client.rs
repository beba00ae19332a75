use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vocab_config::image::ImageApiConfig;
use vocab_enrich::{EnrichError, ImageEnricher, ProviderMetadata, image_file_name};

#[derive(Clone)]
pub struct PixazoImageClient {
    client: reqwest::Client,
    api_url: String,
    subscription_key: String,
    num_steps: u32,
    seed: u64,
    width: u32,
    height: u32,
    output_dir: PathBuf,
}

impl PixazoImageClient {
    /// `output_dir` must already exist; downloads are written straight into it
    pub fn new(
        config: &ImageApiConfig,
        output_dir: PathBuf,
        timeout: Duration,
    ) -> Result<Self, EnrichError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(config, output_dir, client))
    }

    /// Build on top of an already configured HTTP client
    pub fn with_http_client(
        config: &ImageApiConfig,
        output_dir: PathBuf,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            subscription_key: config.subscription_key.clone(),
            num_steps: config.num_steps,
            seed: config.seed,
            width: config.width,
            height: config.height,
            output_dir,
        }
    }

    /// Local path an image for `name_hint` is stored at
    pub fn image_path(&self, name_hint: &str) -> PathBuf {
        self.output_dir.join(image_file_name(name_hint))
    }
}

#[async_trait]
impl ImageEnricher for PixazoImageClient {
    async fn generate(&self, prompt: &str) -> Result<String, EnrichError> {
        let request = GenerateRequest {
            prompt,
            num_steps: self.num_steps,
            seed: self.seed,
            height: self.height,
            width: self.width,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Cache-Control", "no-cache")
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnrichError::from_status(response.status()));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            EnrichError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        body.output
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(EnrichError::EmptyResponse)
    }

    async fn download(&self, locator: &str, name_hint: &str) -> Result<PathBuf, EnrichError> {
        let response = self.client.get(locator).send().await?;

        if !response.status().is_success() {
            return Err(EnrichError::from_status(response.status()));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(EnrichError::EmptyResponse);
        }

        let path = self.image_path(name_hint);
        tokio::fs::write(&path, &bytes).await?;
        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());

        Ok(path)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Pixazo".to_string(),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    num_steps: u32,
    seed: u64,
    height: u32,
    width: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    output: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve a single canned HTTP response on a local port
    async fn serve_once(status: &'static str, content_type: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;

            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}")
    }

    /// Drain headers and body so closing the socket doesn't reset the connection
    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&request);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= end + 4 + content_length {
                    return;
                }
            }
        }
    }

    fn config(api_url: String) -> ImageApiConfig {
        ImageApiConfig {
            subscription_key: "key".to_string(),
            api_url,
            num_steps: 4,
            seed: 15,
            width: 512,
            height: 512,
        }
    }

    fn client(api_url: String, dir: &Path) -> PixazoImageClient {
        let http = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        PixazoImageClient::with_http_client(&config(api_url), dir.to_path_buf(), http)
    }

    #[test]
    fn test_image_path_is_sanitized() {
        let client = client("http://localhost".into(), Path::new("output/media/images"));
        assert_eq!(
            client.image_path("don't"),
            PathBuf::from("output/media/images/don_t.png")
        );
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            prompt: "a red apple",
            num_steps: 4,
            seed: 15,
            height: 512,
            width: 512,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["prompt"], "a red apple");
        assert_eq!(value["num_steps"], 4);
        assert_eq!(value["width"], 512);
    }

    #[tokio::test]
    async fn test_generate_returns_output_url() {
        let body = br#"{"output": "https://cdn.example.com/apple.png"}"#.to_vec();
        let url = serve_once("200 OK", "application/json", body).await;
        let dir = tempfile::tempdir().unwrap();

        let locator = client(url, dir.path()).generate("a red apple").await.unwrap();
        assert_eq!(locator, "https://cdn.example.com/apple.png");
    }

    #[tokio::test]
    async fn test_generate_without_output_fails() {
        let url = serve_once("200 OK", "application/json", br#"{"status": "queued"}"#.to_vec()).await;
        let dir = tempfile::tempdir().unwrap();

        let result = client(url, dir.path()).generate("a red apple").await;
        assert!(matches!(result, Err(EnrichError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_generate_maps_auth_failure() {
        let url = serve_once("401 Unauthorized", "application/json", b"{}".to_vec()).await;
        let dir = tempfile::tempdir().unwrap();

        let result = client(url, dir.path()).generate("a red apple").await;
        assert!(matches!(result, Err(EnrichError::AuthenticationError)));
    }

    #[tokio::test]
    async fn test_download_writes_sanitized_file() {
        let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a];
        let url = serve_once("200 OK", "image/png", png.clone()).await;
        let dir = tempfile::tempdir().unwrap();

        let path = client("http://unused".into(), dir.path())
            .download(&format!("{url}/image.png"), "don't")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("don_t.png"));
        assert_eq!(std::fs::read(&path).unwrap(), png);
    }

    #[tokio::test]
    async fn test_download_failure_writes_nothing() {
        let url = serve_once("404 Not Found", "text/plain", b"gone".to_vec()).await;
        let dir = tempfile::tempdir().unwrap();

        let result = client("http://unused".into(), dir.path())
            .download(&url, "cat")
            .await;

        assert!(matches!(result, Err(EnrichError::ApiError(_))));
        assert!(!dir.path().join("cat.png").exists());
    }
}
