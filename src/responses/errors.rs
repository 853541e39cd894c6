use crate::errors::ServerError;
use crate::templates::error_page;
use astra::{Body, Response, ResponseBuilder};

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a proper HTML response
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();
    match &err {
        ServerError::NotFound(_) | ServerError::Validation(_) => {
            tracing::warn!(status, error = %err, "request rejected")
        }
        _ => tracing::error!(status, error = %err, "request failed"),
    }

    let message = match &err {
        ServerError::NotFound(what) => format!("Not Found: {what}"),
        ServerError::Validation(msg) => msg.clone(),
        other => other.to_string(),
    };
    html_error_response(status, &message)
}

/// Build an HTML error page
pub fn html_error_response(status: u16, message: &str) -> Response {
    let html = error_page(status, message).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(html))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
