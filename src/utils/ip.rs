//! 客户端网络标识提取
//!
//! X-Forwarded-For 完全由客户端控制，这里取到的值只是"尽力而为"的标识，
//! 不能当作真实来源地址使用。

use actix_web::HttpRequest;

/// 没有转发头时写入的占位值
pub const UNKNOWN_IP: &str = "unknown";

/// 读取 X-Forwarded-For 原始值；缺失或为空时返回 `"unknown"`
pub fn forwarded_for(req: &HttpRequest) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_present() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7"))
            .to_http_request();
        assert_eq!(forwarded_for(&req), "203.0.113.7");
    }

    #[test]
    fn test_forwarded_for_keeps_chain_verbatim() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .to_http_request();
        assert_eq!(forwarded_for(&req), "203.0.113.7, 10.0.0.1");
    }

    #[test]
    fn test_forwarded_for_missing() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(forwarded_for(&req), UNKNOWN_IP);
    }
}
