use actix_web::HttpRequest;

/// Identity used when nothing about the caller can be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Extract the client's IP address from the request.
/// `trust_forwarded`: whether to believe `X-Forwarded-For` / `X-Real-IP`
pub fn get_client_ip(req: &HttpRequest, trust_forwarded: bool) -> String {
    if trust_forwarded {
        if let Some(ip) = forwarded_ip(req) {
            return ip;
        }
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn forwarded_ip(req: &HttpRequest) -> Option<String> {
    let headers = req.headers();

    // Left-most hop is the original client
    let forwarded_for = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    forwarded_for.or_else(real_ip).map(str::to_string)
}
