//! User-Agent 粗分类
//!
//! 纯函数：只看小写化后的 UA 是否包含固定子串，按优先级取第一个命中。

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Mobile,
    Desktop,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "Mobile",
            Self::Desktop => "Desktop",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    MacOS,
    Windows,
    Other,
}

impl OsFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MacOS => "MacOS",
            Self::Windows => "Windows",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 包含 "mobile" 即为 Mobile，否则 Desktop；UA 缺失视为空串
pub fn classify_device(user_agent: Option<&str>) -> DeviceType {
    let ua = user_agent.unwrap_or_default().to_lowercase();
    if ua.contains("mobile") {
        DeviceType::Mobile
    } else {
        DeviceType::Desktop
    }
}

/// "mac" 优先于 "windows"，都不含则为 Other
pub fn classify_os(user_agent: Option<&str>) -> OsFamily {
    let ua = user_agent.unwrap_or_default().to_lowercase();
    if ua.contains("mac") {
        OsFamily::MacOS
    } else if ua.contains("windows") {
        OsFamily::Windows
    } else {
        OsFamily::Other
    }
}
