use std::{
    env,
    future::Future,
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};

use reqwest::{
    header::USER_AGENT,
    Client,
    Response,
};

use crate::core::{
    constants::RETRY_COUNT,
    ProfileError,
};

const CLIENT_USER_AGENT: &str = concat!("coffee-profiles/", env!("CARGO_PKG_VERSION"), " (+reqwest)");

/// Fetches the raw CSV text from a location.
pub trait TextFetcher: Send + Sync {
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, ProfileError>> + Send;

    /// Like [`TextFetcher::fetch_text`], reporting percent complete (0-100)
    /// while the body arrives. Implementations that cannot measure progress
    /// report 100 once the text is in hand.
    fn fetch_text_with_progress(
        &self,
        url: &str,
        on_progress: &(dyn Fn(u8) + Send + Sync),
    ) -> impl Future<Output = Result<String, ProfileError>> + Send {
        async move {
            let text = self.fetch_text(url).await?;
            on_progress(100);
            Ok(text)
        }
    }
}

/// Runs `fetch` with an upper bound on how long it may take.
pub async fn fetch_with_timeout<F>(
    fetch: F,
    timeout: Duration,
) -> Result<String, ProfileError>
where
    F: Future<Output = Result<String, ProfileError>>,
{
    match tokio::time::timeout(timeout, fetch).await {
        Ok(result) => result,
        Err(_) => Err(ProfileError::Timeout(timeout)),
    }
}

pub fn http_client(timeout: Duration) -> Result<Client, ProfileError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProfileError::Custom(format!("HTTP client build failed: {e}")))
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    retry_count: u32,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client, retry_count: RETRY_COUNT }
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    async fn get(&self, url: &str) -> Result<Response, ProfileError> {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;

            match self.client.get(url).header(USER_AGENT, CLIENT_USER_AGENT).send().await {
                Ok(resp) => {
                    ensure_success(&resp)?;
                    tracing::debug!("Response status {} from {}", resp.status(), url);
                    return Ok(resp);
                }
                Err(e) if attempts <= self.retry_count && (e.is_connect() || e.is_request()) => {
                    tracing::warn!("GET {url} failed (attempt {attempts}): {e}");
                    tokio::time::sleep(Duration::from_millis(250 * attempts as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl TextFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, ProfileError> {
        let text = decode_body(&self.get(url).await?.bytes().await?);
        tracing::debug!("Response size: {} bytes", text.len());
        Ok(text)
    }

    async fn fetch_text_with_progress(
        &self,
        url: &str,
        on_progress: &(dyn Fn(u8) + Send + Sync),
    ) -> Result<String, ProfileError> {
        let mut resp = self.get(url).await?;
        let total = resp.content_length().filter(|&len| len > 0);
        let mut body = Vec::new();

        while let Some(chunk) = resp.chunk().await? {
            body.extend_from_slice(&chunk);
            if let Some(total) = total {
                let percent = (body.len() as u64 * 100 / total).min(100);
                on_progress(percent as u8);
            }
        }

        on_progress(100);
        Ok(decode_body(&body))
    }
}

/// Reads CSV text from the local filesystem. Accepts plain paths and
/// `file://` URLs.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    search_dirs: Vec<PathBuf>,
}

impl FileFetcher {
    /// Relative paths are resolved against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self { search_dirs: vec![base_dir.into()] }
    }

    /// Relative paths are tried against each directory in turn. The first
    /// one holding the file wins.
    pub fn with_search_dirs<P: Into<PathBuf>>(dirs: impl IntoIterator<Item = P>) -> Self {
        Self { search_dirs: dirs.into_iter().map(Into::into).collect() }
    }

    /// Looks in the working directory, then next to the executable.
    pub fn installed() -> Self {
        let exe_dir = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self::with_search_dirs(env::current_dir().ok().into_iter().chain(exe_dir))
    }

    pub fn resolve(&self, url: &str) -> PathBuf {
        let path = PathBuf::from(url.strip_prefix("file://").unwrap_or(url));
        if path.is_absolute() {
            return path;
        }

        self.search_dirs
            .iter()
            .map(|dir| dir.join(&path))
            .find(|candidate| candidate.exists())
            .or_else(|| self.search_dirs.first().map(|dir| dir.join(&path)))
            .unwrap_or(path)
    }
}

impl TextFetcher for FileFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, ProfileError> {
        let path = self.resolve(url);
        tracing::debug!("Reading profiles from {}", path.display());
        Ok(decode_body(&tokio::fs::read(&path).await?))
    }
}

/// Picks HTTP or filesystem access from the shape of the URL.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    http: HttpFetcher,
    files: FileFetcher,
}

impl SourceFetcher {
    pub fn new(http: HttpFetcher, files: FileFetcher) -> Self {
        Self { http, files }
    }

    pub fn is_remote(url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }
}

impl TextFetcher for SourceFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, ProfileError> {
        if Self::is_remote(url) {
            self.http.fetch_text(url).await
        } else {
            self.files.fetch_text(url).await
        }
    }

    async fn fetch_text_with_progress(
        &self,
        url: &str,
        on_progress: &(dyn Fn(u8) + Send + Sync),
    ) -> Result<String, ProfileError> {
        if Self::is_remote(url) {
            self.http.fetch_text_with_progress(url, on_progress).await
        } else {
            self.files.fetch_text_with_progress(url, on_progress).await
        }
    }
}

/// Invalid UTF-8 becomes U+FFFD on every fetch path.
fn decode_body(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn ensure_success(resp: &Response) -> Result<(), ProfileError> {
    if !resp.status().is_success() {
        return Err(ProfileError::HttpStatus {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}
