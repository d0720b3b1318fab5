//! # HTTP/1.1 Codec
//!
//! Hand-rolled request parsing and response serialisation. This is kept
//! deliberately off the `hyper`/`http`/`httparse` stack: the wire framing
//! (request-line split, header extraction up to the blank line, body
//! slicing) is the piece this runtime exists to implement, not a detail to
//! delegate to a framework.

use crate::http::message::{parse_query_string, reason_phrase, Headers, Request, Response};
use crate::http::method::Method;

/// Requests with no `CRLF CRLF` terminator within this many buffered bytes
/// are rejected as malformed rather than held open indefinitely.
pub const MAX_REQUEST_SIZE: usize = 65536;

const SERVER_IDENTITY: &str = "harbor/1.0";

#[derive(Debug)]
pub enum ParseError {
    /// No `\r\n\r\n` terminator found within `MAX_REQUEST_SIZE` bytes yet;
    /// the caller should keep reading unless the buffer is already full.
    Incomplete,
    /// The buffer is full and still has no terminator, or the request line
    /// did not have exactly three tokens.
    Malformed(String),
}

/// Parses one HTTP/1.1 request out of `buffer`. Returns the request and
/// the number of bytes it consumed so the caller can drop them from the
/// connection buffer.
pub fn parse_request(buffer: &[u8]) -> Result<(Request, usize), ParseError> {
    let header_end = find_header_terminator(buffer).ok_or_else(|| {
        if buffer.len() >= MAX_REQUEST_SIZE {
            ParseError::Malformed("no header terminator within MAX_REQUEST_SIZE".to_string())
        } else {
            ParseError::Incomplete
        }
    })?;

    let head = std::str::from_utf8(&buffer[..header_end])
        .map_err(|_| ParseError::Malformed("request head is not valid UTF-8".to_string()))?;

    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut tokens = request_line.split(' ');

    let (method_token, path_and_query, http_version) =
        match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
            (Some(m), Some(p), Some(v), None) => (m, p, v),
            _ => {
                return Err(ParseError::Malformed(format!(
                    "request line must have exactly three tokens: {request_line:?}"
                )))
            }
        };

    let (raw_path, query_string) = match path_and_query.split_once('?') {
        Some((path, query)) => (path.to_string(), query.to_string()),
        None => (path_and_query.to_string(), String::new()),
    };

    let mut headers = Headers::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        headers.push(name.trim(), value.trim_start());
    }

    let body_start = header_end + 4;
    let content_length: usize = headers
        .get("Content-Length")
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0);

    let body_available = buffer.len().saturating_sub(body_start);
    if body_available < content_length {
        return Err(ParseError::Incomplete);
    }

    let body_end = body_start + content_length;
    let body = buffer[body_start..body_end].to_vec();
    let query_params = parse_query_string(&query_string);

    let request = Request {
        method: Method::parse(method_token),
        raw_path,
        query_string,
        http_version: http_version.to_string(),
        headers,
        body,
        path_params: Default::default(),
        query_params,
    };

    Ok((request, body_end))
}

fn find_header_terminator(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Serialises `response`, injecting `Server` and `Connection: close`
/// unless the handler already set them, and `Content-Length` whenever the
/// body is non-empty.
pub fn serialize_response(response: &Response) -> Vec<u8> {
    let status_phrase = if response.status_phrase.is_empty() {
        reason_phrase(response.status)
    } else {
        response.status_phrase.as_str()
    };

    let mut head = format!("HTTP/1.1 {} {}\r\n", response.status, status_phrase);

    for (name, value) in response.headers.iter() {
        head.push_str(name);
        head.push_str(": ");
        head.push_str(value);
        head.push_str("\r\n");
    }

    if !response.headers.contains("Server") {
        head.push_str("Server: ");
        head.push_str(SERVER_IDENTITY);
        head.push_str("\r\n");
    }

    if !response.headers.contains("Connection") {
        head.push_str("Connection: close\r\n");
    }

    if !response.body.is_empty() && !response.headers.contains("Content-Length") {
        head.push_str(&format!("Content-Length: {}\r\n", response.body.len()));
    }

    head.push_str("\r\n");

    let mut bytes = head.into_bytes();
    bytes.extend_from_slice(&response.body);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get_with_no_body() {
        let raw = b"GET /api/status HTTP/1.1\r\nHost: x\r\n\r\n";
        let (request, consumed) = parse_request(raw).unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.raw_path, "/api/status");
        assert_eq!(request.http_version, "HTTP/1.1");
        assert_eq!(consumed, raw.len());
    }

    #[test]
    fn splits_path_and_query_string() {
        let raw = b"GET /api/users/42?format=json HTTP/1.1\r\n\r\n";
        let (request, _) = parse_request(raw).unwrap();
        assert_eq!(request.raw_path, "/api/users/42");
        assert_eq!(
            request.query_param("format"),
            Some("json")
        );
    }

    #[test]
    fn parses_body_by_content_length() {
        let raw = b"POST /echo HTTP/1.1\r\nContent-Length: 11\r\n\r\nhello world";
        let (request, consumed) = parse_request(raw).unwrap();
        assert_eq!(request.body, b"hello world");
        assert_eq!(consumed, raw.len());
    }

    #[test]
    fn incomplete_body_is_incomplete_not_malformed() {
        let raw = b"POST /echo HTTP/1.1\r\nContent-Length: 11\r\n\r\nhello";
        assert!(matches!(parse_request(raw), Err(ParseError::Incomplete)));
    }

    #[test]
    fn missing_terminator_under_limit_is_incomplete() {
        let raw = b"GET /api/status HTTP/1.1\r\n";
        assert!(matches!(parse_request(raw), Err(ParseError::Incomplete)));
    }

    #[test]
    fn malformed_request_line_is_rejected() {
        let raw = b"GET /api/status\r\n\r\n";
        assert!(matches!(parse_request(raw), Err(ParseError::Malformed(_))));
    }

    #[test]
    fn unknown_method_parses_but_matches_nothing_later() {
        let raw = b"TRACE / HTTP/1.1\r\n\r\n";
        let (request, _) = parse_request(raw).unwrap();
        assert_eq!(request.method, Method::Unknown);
    }

    #[test]
    fn serialize_injects_server_and_connection_close() {
        let response = Response::ok().with_json_body(br#"{"status":"ok"}"#.to_vec());
        let bytes = serialize_response(&response);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Length: 15\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.contains("Server: harbor/1.0\r\n"));
        assert_eq!(text.matches("\r\n\r\n").count(), 1);
    }

    #[test]
    fn serialize_respects_handler_set_connection_header() {
        let response = Response::ok().with_header("Connection", "keep-alive");
        let bytes = serialize_response(&response);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Connection: keep-alive\r\n"));
        assert!(!text.contains("Connection: close\r\n"));
    }

    #[test]
    fn serialize_omits_content_length_for_empty_body() {
        let response = Response::new(204, "No Content");
        let bytes = serialize_response(&response);
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("Content-Length"));
    }
}
