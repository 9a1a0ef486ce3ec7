//! One-shot HTTP stub standing in for an n8n webhook.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// What the stub saw: the request line and the raw body.
#[derive(Debug)]
pub struct Captured {
    pub request_line: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl Captured {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub struct Stub {
    pub url: String,
    handle: JoinHandle<Captured>,
}

impl Stub {
    /// Serve exactly one request with `status` and `body`, then stop.
    pub fn respond(status: u16, body: &str) -> Stub {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let url = format!("http://{}/webhook/test", listener.local_addr().unwrap());
        let body = body.to_string();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept connection");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut content_length = 0usize;
            let mut content_type = None;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    match name.trim().to_ascii_lowercase().as_str() {
                        "content-length" => content_length = value.trim().parse().unwrap(),
                        "content-type" => content_type = Some(value.trim().to_string()),
                        _ => {}
                    }
                }
            }

            let mut raw = vec![0u8; content_length];
            reader.read_exact(&mut raw).unwrap();

            let reason = if (200..300).contains(&status) { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let mut stream = stream;
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            Captured {
                request_line: request_line.trim_end().to_string(),
                content_type,
                body: String::from_utf8(raw).unwrap(),
            }
        });

        Stub { url, handle }
    }

    pub fn captured(self) -> Captured {
        self.handle.join().expect("stub thread panicked")
    }
}

/// A URL nothing is listening on.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/webhook/closed")
}

/// A listener that accepts connections (via the kernel backlog) but never
/// answers. Keep the returned listener alive for as long as it is needed.
pub fn silent_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/webhook/silent", listener.local_addr().unwrap());
    (listener, url)
}
