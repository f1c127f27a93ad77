//! Page retrieval.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, error, info, warn};

use crate::document::HtmlNode;
use crate::error::{IngestError, Result};

/// Per-attempt HTTP timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The documentation portal rejects obviously scripted clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Source of parsed documentation pages.
///
/// Implementations own their retry policy; `None` means the page could not
/// be retrieved at all.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Option<HtmlNode>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// Pause after every successful fetch, and the backoff unit.
    pub base_delay: Duration,
    pub max_retries: u32,
    pub timeout: Duration,
    pub user_agent: String,
    /// Honour `HTTP_PROXY` and friends from the environment.
    pub system_proxy: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(1),
            max_retries: 3,
            timeout: REQUEST_TIMEOUT,
            user_agent: BROWSER_USER_AGENT.to_string(),
            system_proxy: true,
        }
    }
}

impl FetchSettings {
    /// Wait after failed attempt `attempt` (1-based): grows linearly.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Blocking HTTP page source with retries and a politeness pause.
pub struct HttpPageSource {
    client: Client,
    settings: FetchSettings,
}

impl HttpPageSource {
    pub fn new(settings: FetchSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone());
        if !settings.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(IngestError::Client)?;
        Ok(Self { client, settings })
    }

    fn get_text(&self, url: &str) -> Result<String> {
        self.client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(|source| IngestError::Fetch {
                url: url.to_string(),
                source,
            })
    }
}

impl PageSource for HttpPageSource {
    fn fetch(&self, url: &str) -> Option<HtmlNode> {
        let max_retries = self.settings.max_retries.max(1);
        for attempt in 1..=max_retries {
            if attempt == 1 {
                info!(url, "fetching page");
            } else {
                info!(url, attempt, max_retries, "fetching page");
            }
            match self.get_text(url) {
                Ok(body) => {
                    debug!(url, bytes = body.len(), "page fetched");
                    thread::sleep(self.settings.base_delay);
                    return Some(HtmlNode::parse_document(&body));
                }
                Err(err) => {
                    error!(url, attempt, max_retries, error = %err, "fetch attempt failed");
                    if attempt < max_retries {
                        let wait = self.settings.backoff(attempt);
                        info!(url, wait_secs = wait.as_secs_f64(), "retrying");
                        thread::sleep(wait);
                    }
                }
            }
        }
        warn!(url, max_retries, "giving up on page");
        None
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::document::DocNode;

    const PAGE: &str = "<html><body><p>Format: FUTURE_USE, Receive Time</p></body></html>";

    /// Local HTTP server answering the n-th connection with `statuses[n]`,
    /// repeating the last status after that. Returns the base URL and the
    /// connection counter.
    fn serve(statuses: Vec<u16>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/traffic-log-fields", listener.local_addr().unwrap());
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&connections);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let served = counter.fetch_add(1, Ordering::SeqCst);
                let status = statuses
                    .get(served)
                    .or(statuses.last())
                    .copied()
                    .unwrap_or(500);
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let body = if status == 200 { PAGE } else { "" };
                let response = format!(
                    "HTTP/1.1 {status} Status\r\nContent-Type: text/html\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        (url, connections)
    }

    fn quick_settings(max_retries: u32) -> FetchSettings {
        FetchSettings {
            base_delay: Duration::ZERO,
            max_retries,
            timeout: Duration::from_secs(5),
            system_proxy: false,
            ..FetchSettings::default()
        }
    }

    #[test]
    fn gives_up_after_max_retries() {
        let (url, connections) = serve(vec![500]);
        let source = HttpPageSource::new(quick_settings(2)).unwrap();
        assert!(source.fetch(&url).is_none());
        assert_eq!(connections.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn returns_page_on_success() {
        let (url, connections) = serve(vec![200]);
        let source = HttpPageSource::new(quick_settings(2)).unwrap();
        let page = source.fetch(&url).expect("page");
        assert!(page.text().contains("Format: FUTURE_USE, Receive Time"));
        assert_eq!(connections.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn retry_recovers_from_server_error() {
        let (url, connections) = serve(vec![500, 200]);
        let source = HttpPageSource::new(quick_settings(3)).unwrap();
        assert!(source.fetch(&url).is_some());
        assert_eq!(connections.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn backoff_is_linear_in_attempt() {
        let settings = FetchSettings {
            base_delay: Duration::from_millis(500),
            ..FetchSettings::default()
        };
        assert_eq!(settings.backoff(1), Duration::from_millis(500));
        assert_eq!(settings.backoff(3), Duration::from_millis(1500));
    }

    #[test]
    fn defaults() {
        let settings = FetchSettings::default();
        assert_eq!(settings.max_retries, 3);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(settings.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn client_builds() {
        let source = HttpPageSource::new(FetchSettings::default());
        assert!(source.is_ok());
    }
}
