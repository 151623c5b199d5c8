//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_erp_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ErpError {
            $($variant(String),)*
        }

        impl ErpError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ErpError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ErpError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ErpError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl ErpError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ErpError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_erp_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
    Conflict("E012", "Resource Conflict"),
}

impl ErpError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为资源不存在错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, ErpError::NotFound(_))
    }

    /// 唯一约束冲突
    pub fn is_conflict(&self) -> bool {
        matches!(self, ErpError::Conflict(_))
    }
}

impl fmt::Display for ErpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ErpError {}

impl From<sea_orm::DbErr> for ErpError {
    fn from(err: sea_orm::DbErr) -> Self {
        ErpError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ErpError {
    fn from(err: serde_json::Error) -> Self {
        ErpError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ErpError {
    fn from(err: chrono::ParseError) -> Self {
        ErpError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ErpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErpError::cache_connection("test").code(), "E001");
        assert_eq!(ErpError::database_config("test").code(), "E003");
        assert_eq!(ErpError::validation("test").code(), "E006");
        assert_eq!(ErpError::authentication("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ErpError::not_found("fee 3").error_type(),
            "Resource Not Found"
        );
        assert_eq!(ErpError::validation("test").error_type(), "Validation Error");
    }

    #[test]
    fn test_not_found_detection() {
        assert!(ErpError::not_found("attendance 9").is_not_found());
        assert!(!ErpError::database_operation("boom").is_not_found());
    }

    #[test]
    fn test_conflict_detection() {
        let err = ErpError::conflict("email taken");
        assert_eq!(err.code(), "E012");
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_format_simple() {
        let err = ErpError::date_parse("bad date '2023-13-01'");
        let formatted = err.format_simple();
        assert!(formatted.contains("Date Parse Error"));
        assert!(formatted.contains("2023-13-01"));
    }

    #[test]
    fn test_db_error_conversion() {
        let err: ErpError = sea_orm::DbErr::Custom("locked".to_string()).into();
        assert_eq!(err.code(), "E005");
        assert!(err.message().contains("locked"));
    }
}
