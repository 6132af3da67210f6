use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Request as seen by [`StubBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string
    pub target: String,
    pub body: String,
}

#[derive(Debug, Clone)]
struct Route {
    method: &'static str,
    target: String,
    status: u16,
    body: String,
}

/// Minimal HTTP/1.1 backend answering canned JSON per method and target.
///
/// Each connection serves one request and is then closed. Unknown routes
/// get a 404.
pub struct StubBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    _server: JoinHandle<()>,
}

#[allow(dead_code)]
pub struct StubBackendBuilder {
    routes: Vec<Route>,
}

#[allow(dead_code)]
impl StubBackendBuilder {
    pub fn route(mut self, method: &'static str, target: &str, status: u16, body: &str) -> Self {
        self.routes.push(Route {
            method,
            target: target.to_string(),
            status,
            body: body.to_string(),
        });
        self
    }

    pub async fn start(self) -> Result<StubBackend> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind stub backend")?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(self.routes);

        let recorded = Arc::clone(&requests);
        let server = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let _ = serve(stream, &routes, &recorded).await;
                });
            }
        });

        Ok(StubBackend {
            base_url: format!("http://{}", addr),
            requests,
            _server: server,
        })
    }
}

#[allow(dead_code)]
impl StubBackend {
    pub fn builder() -> StubBackendBuilder {
        StubBackendBuilder { routes: Vec::new() }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self._server.abort();
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: &[Route],
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            anyhow::bail!("Connection closed before headers were complete");
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();
    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = (header_end + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    recorded.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        target: target.clone(),
        body,
    });

    let (status, body) = routes
        .iter()
        .find(|r| r.method == method && r.target == target)
        .map(|r| (r.status, r.body.clone()))
        .unwrap_or((404, String::new()));

    let response = if status == 204 {
        "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string()
    } else {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason(status),
            body.len(),
            body
        )
    };
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// Note JSON the way the backend sends it
#[allow(dead_code)]
pub fn note_json(id: i64, title: &str, content: &str) -> String {
    format!(
        r#"{{"id":{},"title":"{}","content":"{}","created":"2024-01-15T08:30:00Z","updated":"2024-01-15T08:30:00Z"}}"#,
        id, title, content
    )
}
