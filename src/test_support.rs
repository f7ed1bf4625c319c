use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub(crate) const RESPONSE_BODY: &str = "pong";

/// `RESPONSE_BODY` as a gzip member with a zeroed mtime.
const GZIP_RESPONSE_BODY: [u8; 24] = [
    31, 139, 8, 0, 0, 0, 0, 0, 2, 255, 43, 200, 207, 75, 7, 0, 79, 65, 88, 33, 4, 0, 0, 0,
];

#[derive(Debug, Clone, Copy)]
enum Reply {
    Plain,
    Gzip,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) method: String,
    pub(crate) target: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: String,
}

impl RecordedRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Loopback HTTP/1.1 server that answers `200 pong` and records requests.
pub(crate) struct TestServer {
    pub(crate) addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl TestServer {
    /// Binds a loopback listener, or returns `None` when sockets are not
    /// permitted in the current environment.
    pub(crate) async fn spawn_or_skip() -> Result<Option<Self>, String> {
        Self::spawn_with(Reply::Plain).await
    }

    /// Same as [`TestServer::spawn_or_skip`], but every response body is
    /// sent with `Content-Encoding: gzip`.
    pub(crate) async fn spawn_gzip_or_skip() -> Result<Option<Self>, String> {
        Self::spawn_with(Reply::Gzip).await
    }

    async fn spawn_with(reply: Reply) -> Result<Option<Self>, String> {
        let listener = match TcpListener::bind("127.0.0.1:0").await {
            Ok(listener) => listener,
            Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                eprintln!("Skipping network test: {}", err);
                return Ok(None);
            }
            Err(err) => return Err(format!("bind test server failed: {}", err)),
        };
        let addr = listener
            .local_addr()
            .map_err(|err| format!("server addr failed: {}", err))?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        let task = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    if let Some(request) = read_request(&mut stream).await {
                        recorded.lock().await.push(request);
                        respond(&mut stream, reply).await;
                    }
                });
            }
        });

        Ok(Some(Self {
            addr,
            requests,
            task,
        }))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub(crate) async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            return None;
        }
        buffer.extend_from_slice(chunk.get(..read)?);
        if let Some(pos) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(buffer.get(..head_end)?).into_owned();
    let mut lines = head.split("\r\n");
    let mut start = lines.next()?.split_whitespace();
    let method = start.next()?.to_owned();
    let target = start.next()?.to_owned();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
        .collect();

    let content_length: usize = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(0);
    let mut body = buffer.get(head_end.saturating_add(4)..)?.to_vec();
    while body.len() < content_length {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(chunk.get(..read)?);
    }

    Some(RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn respond(stream: &mut TcpStream, reply: Reply) {
    let (encoding, body): (&str, &[u8]) = match reply {
        Reply::Plain => ("", RESPONSE_BODY.as_bytes()),
        Reply::Gzip => ("Content-Encoding: gzip\r\n", &GZIP_RESPONSE_BODY),
    };
    let head = format!(
        "HTTP/1.1 200 OK\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n",
        encoding,
        body.len()
    );
    if stream.write_all(head.as_bytes()).await.is_err() {
        return;
    }
    if stream.write_all(body).await.is_err() {
        return;
    }
    if stream.flush().await.is_err() {
        return;
    }
    drop(stream.shutdown().await);
}

pub(crate) fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}
