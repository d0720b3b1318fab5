//! End-to-end request/response scenarios exercising the codec, route
//! table, and serializer together without opening a socket.

use harbor_runtime::http::codec::{parse_request, serialize_response};
use harbor_runtime::http::{Method, Response, RouteTable};

#[test]
fn get_literal_route_returns_expected_body() {
    let mut routes = RouteTable::new();
    routes.register(Method::Get, "/api/status", |_req| {
        Response::ok().with_json_body(br#"{"status":"ok"}"#.to_vec())
    });

    let raw = b"GET /api/status HTTP/1.1\r\nHost: x\r\n\r\n";
    let (request, _) = parse_request(raw).unwrap();
    let (handler, params) = routes.find(request.method, &request.raw_path).unwrap();

    let mut request = request;
    request.path_params = params;
    let response = handler(&request);
    let bytes = serialize_response(&response);
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("Content-Length: 15\r\n"));
    assert!(text.ends_with("{\"status\":\"ok\"}"));
}

#[test]
fn path_parameter_and_query_string_are_both_bound() {
    let mut routes = RouteTable::new();
    routes.register(Method::Get, "/api/users/:id", |req| {
        let id = req.path_param("id").unwrap_or_default();
        let format = req.query_param("format").unwrap_or_default();
        Response::ok().with_body(format!("{id}:{format}").into_bytes())
    });

    let raw = b"GET /api/users/42?format=json HTTP/1.1\r\n\r\n";
    let (request, _) = parse_request(raw).unwrap();
    let (handler, params) = routes.find(request.method, &request.raw_path).unwrap();

    let mut request = request;
    request.path_params = params;
    let response = handler(&request);

    assert_eq!(response.body, b"42:json");
}

#[test]
fn post_body_is_delivered_intact() {
    let mut routes = RouteTable::new();
    routes.register(Method::Post, "/echo", |req| {
        Response::ok().with_body(req.body.clone())
    });

    let raw = b"POST /echo HTTP/1.1\r\nContent-Length: 11\r\n\r\nhello world";
    let (request, consumed) = parse_request(raw).unwrap();
    assert_eq!(consumed, raw.len());

    let (handler, params) = routes.find(request.method, &request.raw_path).unwrap();
    let mut request = request;
    request.path_params = params;
    let response = handler(&request);

    assert_eq!(response.body, b"hello world");
    assert_eq!(response.body.len(), 11);
}

#[test]
fn unmatched_route_falls_through_to_not_found() {
    let routes = RouteTable::new();
    let raw = b"GET /nowhere HTTP/1.1\r\n\r\n";
    let (request, _) = parse_request(raw).unwrap();
    assert!(routes.find(request.method, &request.raw_path).is_none());

    let response = Response::not_found();
    let bytes = serialize_response(&response);
    assert!(String::from_utf8(bytes).unwrap().starts_with("HTTP/1.1 404 Not Found\r\n"));
}
