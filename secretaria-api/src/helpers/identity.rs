use actix_web::HttpRequest;

pub const OWNER_HEADER: &str = "X-Owner-Id";

/// Caller identity set by the authentication layer in front of the API.
///
/// Returns `None` when the header is missing, blank or not valid UTF-8.
pub fn owner_id(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(OWNER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
