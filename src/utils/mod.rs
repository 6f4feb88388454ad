pub mod ip;
pub mod url_validator;

/// 短码字符集：大小写字母 + 数字，共 62 个
pub const SHORT_CODE_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 短码长度
pub const SHORT_CODE_LENGTH: usize = 6;

/// 与单段路由同名的路径（`/health`、`/api`），这些短码永远解析不到
pub const ROUTE_SEGMENTS: &[&str] = &["api", "health"];

/// 短码是否会被固定路由遮蔽
pub fn is_route_segment(code: &str) -> bool {
    ROUTE_SEGMENTS.contains(&code)
}

/// 从字符集中独立均匀地抽取 `length` 个字符
pub fn generate_random_code(length: usize) -> String {
    std::iter::repeat_with(|| {
        SHORT_CODE_CHARSET[rand::random_range(0..SHORT_CODE_CHARSET.len())] as char
    })
    .take(length)
    .collect()
}
