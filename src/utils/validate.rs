use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 绝对 http(s) URL：scheme + host，可带端口与路径
static HTTP_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*(:\d{1,5})?(/[^\s]*)?$")
        .expect("Invalid url regex")
});

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 2;

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Invalid email address");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err("Name must be at least 2 characters");
    }
    Ok(())
}

pub fn validate_http_url(url: &str) -> Result<(), &'static str> {
    if !HTTP_URL_RE.is_match(url) {
        return Err("Avatar must be a valid http(s) URL");
    }
    Ok(())
}

/// 必填文本字段，去掉首尾空白后不能为空
pub fn validate_required(field: &'static str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("sarah.j@edunova.edu").is_ok());
        assert!(validate_email("a+b@school.co.uk").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("12345").is_err());
        // 按字符计数
        assert!(validate_password("密码密码密码").is_ok());
    }

    #[test]
    fn test_name() {
        assert!(validate_name("Al").is_ok());
        assert!(validate_name("A").is_err());
        assert!(validate_name("  A  ").is_err());
    }

    #[test]
    fn test_http_url() {
        assert!(validate_http_url("https://cdn.edunova.edu/avatars/1.png").is_ok());
        assert!(validate_http_url("http://localhost:3000/a.png").is_ok());
        assert!(validate_http_url("ftp://example.com/a.png").is_err());
        assert!(validate_http_url("/relative/path.png").is_err());
        assert!(validate_http_url("https://").is_err());
    }

    #[test]
    fn test_required() {
        assert!(validate_required("name", "Physics").is_ok());
        assert_eq!(
            validate_required("name", "   ").unwrap_err(),
            "name is required"
        );
    }
}
