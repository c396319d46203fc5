//! Mock auth/payment server for testing
//!
//! Simulates both services on one port, with the same routes and bodies as
//! the real ones:
//! - POST /auth_service/login returns { access_token, refresh_token }
//! - POST /auth_service/signup returns {}
//! - DELETE /auth_service/logout returns 200 with an arbitrary body
//! - POST /payment_service/buycurrency returns { balance }
//! - GET /payment_service/viewTrans?username=... returns [ {id, payer_us, ...} ]
//!
//! Failures answer with { "Error": "..." }. Every request is recorded so
//! tests can assert on method, path, headers, and body.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Mock server for the auth and payment services
pub struct MockServiceServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Behaviour of the mock services
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub username: String,
    pub password: String,
    pub access_token: String,
    pub refresh_token: String,
    /// Body of a successful `/buycurrency`
    pub balance_body: String,
    /// Body of a successful `/viewTrans`
    pub transactions_body: String,
    /// Body of a successful `/logout`
    pub logout_body: String,
    /// Answer failures with HTML instead of JSON
    pub html_errors: bool,
    /// Answer successful logins with a non-JSON body
    pub garbled_login: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            username: "alice".to_string(),
            password: "secret".to_string(),
            access_token: "A".to_string(),
            refresh_token: "B".to_string(),
            balance_body: r#"{"balance": 110}"#.to_string(),
            transactions_body: r#"[
                {"id": 1, "payer_us": "alice", "receiver_us": "bob", "amount": 10, "date": "2024-01-15T10:30:00Z"},
                {"id": 2, "payer_us": "carol", "receiver_us": "alice", "amount": 2.5, "date": "2024-01-16T08:00:00Z"}
            ]"#
            .to_string(),
            logout_body: String::new(),
            html_errors: false,
            garbled_login: false,
        }
    }
}

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string
    pub path: String,
    /// Header names are lowercase
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// Decoded form fields of an url-encoded body
    pub fn form(&self) -> HashMap<String, String> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }
}

impl MockServiceServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking so the accept loop can notice shutdown
        listener.set_nonblocking(true)?;

        let running_clone = Arc::clone(&running);
        let requests_clone = Arc::clone(&requests);
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = Arc::clone(&requests_clone);
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn auth_url(&self) -> String {
        format!("{}/auth_service", self.base_url())
    }

    pub fn payment_url(&self) -> String {
        format!("{}/payment_service", self.base_url())
    }

    /// Every request received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockServiceServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(
    mut stream: TcpStream,
    config: &MockConfig,
    log: &Arc<Mutex<Vec<RecordedRequest>>>,
) {
    // Accepted sockets inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);

    let request = match read_request(&mut stream) {
        Some(request) => request,
        None => {
            send_response(&mut stream, 400, "Bad Request", r#"{"Error": "Invalid request"}"#);
            return;
        }
    };

    if let Ok(mut requests) = log.lock() {
        requests.push(request.clone());
    }

    let (status, body) = route(&request, config);
    let body = if status >= 400 && config.html_errors {
        "<html><body>Internal Server Error</body></html>".to_string()
    } else {
        body
    };

    let status_text = match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Method Not Allowed",
    };
    send_response(&mut stream, status, status_text, &body);
}

fn route(request: &RecordedRequest, config: &MockConfig) -> (u16, String) {
    let path_without_query = request.path.split('?').next().unwrap_or("");
    let bearer = request
        .header("authorization")
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("");

    match (request.method.as_str(), path_without_query) {
        ("POST", "/auth_service/login") => {
            let form = request.form();
            let valid = form.get("username") == Some(&config.username)
                && form.get("password") == Some(&config.password);
            if !valid {
                (401, r#"{"Error": "Invalid credentials"}"#.to_string())
            } else if config.garbled_login {
                (200, "welcome!".to_string())
            } else {
                let body = serde_json::json!({
                    "access_token": config.access_token,
                    "refresh_token": config.refresh_token,
                });
                (200, body.to_string())
            }
        }
        ("POST", "/auth_service/signup") => {
            let form = request.form();
            let complete = ["username", "password", "email"]
                .iter()
                .all(|k| form.get(*k).map(|v| !v.is_empty()).unwrap_or(false));
            if !complete {
                (400, r#"{"Error": "Missing required fields"}"#.to_string())
            } else if form.get("username") == Some(&config.username) {
                (400, r#"{"Error": "Username already exists"}"#.to_string())
            } else {
                (200, "{}".to_string())
            }
        }
        ("DELETE", "/auth_service/logout") => {
            if bearer == config.refresh_token {
                (200, config.logout_body.clone())
            } else {
                (401, r#"{"Error": "Invalid refresh token"}"#.to_string())
            }
        }
        ("POST", "/payment_service/buycurrency") => {
            if bearer != config.access_token {
                (401, r#"{"Error": "Unauthorized"}"#.to_string())
            } else if request.form().get("payment_method").map(|m| m.is_empty()).unwrap_or(true) {
                (400, r#"{"Error": "Invalid payment method"}"#.to_string())
            } else {
                (200, config.balance_body.clone())
            }
        }
        ("GET", "/payment_service/viewTrans") => {
            let query = request.path.split_once('?').map(|(_, q)| q).unwrap_or("");
            let username: Option<String> = url::form_urlencoded::parse(query.as_bytes())
                .find(|(k, _)| k == "username")
                .map(|(_, v)| v.into_owned());
            if bearer != config.access_token {
                (401, r#"{"Error": "Unauthorized"}"#.to_string())
            } else if username.as_deref() != Some(config.username.as_str()) {
                (404, r#"{"Error": "User not found"}"#.to_string())
            } else {
                (200, config.transactions_body.clone())
            }
        }
        _ => (404, r#"{"Error": "Endpoint not found"}"#.to_string()),
    }
}

/// Read one HTTP/1.1 request, honouring Content-Length
fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut data = Vec::new();
    let mut buffer = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let mut lines = head.lines();
    let first_line = lines.next()?;
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }

    let body_end = (header_end + content_length).min(data.len());
    Some(RecordedRequest {
        method: parts[0].to_string(),
        path: parts[1].to_string(),
        headers,
        body: String::from_utf8_lossy(&data[header_end..body_end]).to_string(),
    })
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let cookie = if status == 200 {
        "Set-Cookie: gacha_session=mock-session; Path=/\r\n"
    } else {
        ""
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        cookie,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::{build_client, HttpSettings};
    use crate::adapters::{AuthClient, PaymentClient};
    use crate::domain::{Error, PaymentCredentials, PurchaseRequest};
    use crate::ports::{AuthApi, PaymentApi};

    fn clients(server: &MockServiceServer) -> (AuthClient, PaymentClient) {
        let client = build_client(&HttpSettings::default()).unwrap();
        (
            AuthClient::new(client.clone(), &server.auth_url()).unwrap(),
            PaymentClient::new(client, &server.payment_url()).unwrap(),
        )
    }

    fn alice() -> PaymentCredentials {
        PaymentCredentials {
            username: "alice".to_string(),
            access_token: "A".to_string(),
        }
    }

    #[test]
    fn test_login_sends_form_and_returns_tokens() {
        let server = MockServiceServer::start(MockConfig::default()).unwrap();
        let (auth, _) = clients(&server);

        let tokens = auth.login("alice", "secret").unwrap();
        assert_eq!(tokens.access_token, "A");
        assert_eq!(tokens.refresh_token, "B");

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/auth_service/login");
        assert_eq!(
            requests[0].header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(requests[0].body, "username=alice&password=secret");
    }

    #[test]
    fn test_login_failure_carries_server_text() {
        let server = MockServiceServer::start(MockConfig::default()).unwrap();
        let (auth, _) = clients(&server);

        let err = auth.login("alice", "wrong").unwrap_err();
        match err {
            Error::Server { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message.as_deref(), Some("Invalid credentials"));
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_error_body_is_transport_failure() {
        let server = MockServiceServer::start(MockConfig {
            html_errors: true,
            ..Default::default()
        })
        .unwrap();
        let (auth, _) = clients(&server);

        let err = auth.login("alice", "wrong").unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "got {:?}", err);
    }

    #[test]
    fn test_session_cookie_is_sent_back() {
        let server = MockServiceServer::start(MockConfig::default()).unwrap();
        let (auth, _) = clients(&server);

        auth.login("alice", "secret").unwrap();
        auth.signup("bob", "pw", "bob@example.com").unwrap();

        let requests = server.requests();
        assert_eq!(requests[1].path, "/auth_service/signup");
        assert!(requests[1]
            .header("cookie")
            .unwrap_or("")
            .contains("gacha_session=mock-session"));
        assert_eq!(requests[1].form().get("email").map(String::as_str), Some("bob@example.com"));
    }

    #[test]
    fn test_logout_uses_refresh_token() {
        let server = MockServiceServer::start(MockConfig {
            logout_body: "bye".to_string(),
            ..Default::default()
        })
        .unwrap();
        let (auth, _) = clients(&server);

        auth.logout("B").unwrap();
        assert!(auth.logout("A").is_err());

        let requests = server.requests();
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].header("authorization"), Some("Bearer B"));
    }

    #[test]
    fn test_buy_currency() {
        let server = MockServiceServer::start(MockConfig::default()).unwrap();
        let (_, payment) = clients(&server);

        let balance = payment
            .buy_currency(&alice(), &PurchaseRequest::new("10", "card"))
            .unwrap();
        assert_eq!(balance.to_string(), "110");

        let request = &server.requests()[0];
        assert_eq!(request.path, "/payment_service/buycurrency");
        assert_eq!(request.header("authorization"), Some("Bearer A"));
        let form = request.form();
        assert_eq!(form.get("username").map(String::as_str), Some("alice"));
        assert_eq!(form.get("amount").map(String::as_str), Some("10"));
        assert_eq!(form.get("payment_method").map(String::as_str), Some("card"));
    }

    #[test]
    fn test_view_transactions() {
        let server = MockServiceServer::start(MockConfig::default()).unwrap();
        let (_, payment) = clients(&server);

        let transactions = payment.view_transactions(&alice()).unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].id, "1");
        assert_eq!(transactions[1].payer_us, "carol");

        let request = &server.requests()[0];
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/payment_service/viewTrans?username=alice");
    }

    #[test]
    fn test_unreachable_service_is_transport_failure() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = build_client(&HttpSettings::default()).unwrap();
        let url = format!("http://127.0.0.1:{}/auth_service", port);
        let auth = AuthClient::new(client, &url).unwrap();

        let err = auth.login("alice", "secret").unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.to_string().contains("auth service"));
    }
}
