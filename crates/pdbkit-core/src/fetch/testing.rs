//! A one-shot HTTP responder for exercising the blocking clients.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Serves exactly one request with `status_line`, `headers` and `body`, then closes
/// the connection. Returns the base URL and a handle yielding the request head.
pub(crate) fn serve_once(
    status_line: &'static str,
    headers: &'static str,
    body: &'static [u8],
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        let head_end = loop {
            if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break request.len();
            }
            request.extend_from_slice(&buf[..n]);
        };
        let head = String::from_utf8_lossy(&request[..head_end]).to_string();
        let body_len = head
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        while request.len() < head_end + body_len {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        write!(stream, "HTTP/1.1 {}\r\nConnection: close\r\n{}\r\n", status_line, headers)
            .unwrap();
        stream.write_all(body).unwrap();
        stream.flush().unwrap();
        head
    });

    (base_url, handle)
}

pub(crate) fn empty_response(status_line: &'static str) -> (String, JoinHandle<String>) {
    serve_once(status_line, "Content-Length: 0\r\n", b"")
}
