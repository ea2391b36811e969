//! Writing replies to the socket.

use super::router::Reply;
use crate::utils::mime::types::PLAIN;
use anyhow::Result;
use tiny_http::{Header, Request, Response, StatusCode};

/// Send a dispatched reply.
pub fn respond(request: Request, reply: Reply) -> Result<()> {
    let mut response = Response::from_data(reply.body).with_status_code(StatusCode(reply.status));
    for (name, value) in &reply.headers {
        if let Some(header) = make_header(name, value) {
            response.add_header(header);
        }
    }
    request.respond(response)?;
    Ok(())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    let mut response =
        Response::from_data(b"503 Service Unavailable".to_vec()).with_status_code(StatusCode(503));
    if let Some(header) = make_header("Content-Type", PLAIN) {
        response.add_header(header);
    }
    request.respond(response)?;
    Ok(())
}

/// `None` for bytes tiny_http refuses in a header.
fn make_header(key: &str, value: &str) -> Option<Header> {
    Header::from_bytes(key.as_bytes(), value.as_bytes()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_header() {
        let header = make_header("Cache-Control", "public, max-age=3600").unwrap();
        assert!(header.field.equiv("cache-control"));
        assert_eq!(header.value.as_str(), "public, max-age=3600");
    }
}
