use crate::utils::error::{LookupError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::LazyLock;
use url::Url;

// 美國郵遞區號：5 碼或 ZIP+4，只接受 ASCII 數字
static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("zip code pattern is valid"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LookupError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<SocketAddr> {
    addr.parse::<SocketAddr>()
        .map_err(|e| LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension) => {}
            Some(extension) => {
                return Err(LookupError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(LookupError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 驗證請求參數中的郵遞區號
pub fn validate_zip_code(field_name: &str, zip: &str) -> Result<()> {
    if !ZIP_CODE.is_match(zip) {
        return Err(LookupError::InvalidParameter {
            field: field_name.to_string(),
            reason: format!("'{}' is not a 5-digit or ZIP+4 postal code", zip),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("provider.endpoint", "https://example.com").is_ok());
        assert!(validate_url("provider.endpoint", "http://example.com").is_ok());
        assert!(validate_url("provider.endpoint", "").is_err());
        assert!(validate_url("provider.endpoint", "invalid-url").is_err());
        assert!(validate_url("provider.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        let addr = validate_socket_addr("listen_address", "127.0.0.1:8000").unwrap();
        assert_eq!(addr.port(), 8000);
        assert!(validate_socket_addr("listen_address", "localhost").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 7, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["service.toml".to_string()];
        assert!(validate_file_extensions("config", &files, &["toml"]).is_ok());

        let invalid_files = vec!["service.yaml".to_string()];
        assert!(validate_file_extensions("config", &invalid_files, &["toml"]).is_err());

        let no_extension = vec!["service".to_string()];
        assert!(validate_file_extensions("config", &no_extension, &["toml"]).is_err());
    }

    #[test]
    fn test_validate_zip_code() {
        assert!(validate_zip_code("zip", "02845").is_ok());
        assert!(validate_zip_code("zip", "02845-1234").is_ok());
        assert!(validate_zip_code("zip", "2845").is_err());
        assert!(validate_zip_code("zip", "ABCDE").is_err());
        assert!(validate_zip_code("zip", "02845-12").is_err());
        assert!(validate_zip_code("zip", "٠٢٨٤٥").is_err());
        assert!(validate_zip_code("zip", "０２８４５").is_err());
        assert!(validate_zip_code("zip", "02845-１２３４").is_err());

        let err = validate_zip_code("zip", "").unwrap_err();
        assert!(matches!(err, LookupError::InvalidParameter { .. }));
    }
}
