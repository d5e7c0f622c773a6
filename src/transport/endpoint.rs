use url::Url;

use crate::error::ConfigError;

use super::grpc::ADD_BOOK_PATH;

/// Parses a REST target. Only `http` and `https` are accepted.
///
/// # Errors
///
/// Returns a `ConfigError` for unparsable URLs, other schemes, or a missing
/// host.
pub fn resolve_http_endpoint(target: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(target.trim()).map_err(|source| ConfigError::InvalidTarget {
        url: target.to_owned(),
        source,
    })?;
    check_scheme_and_host(&url, target)?;
    Ok(url)
}

/// Resolves a gRPC target (`host:port`, `http://host:port`, or
/// `https://host:port`) to the full `AddBook` method URL.
///
/// # Errors
///
/// Returns a `ConfigError` for unparsable targets, other schemes, or a
/// missing host.
pub fn resolve_grpc_endpoint(target: &str) -> Result<Url, ConfigError> {
    let trimmed = target.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("http://{}", trimmed)
    };
    let base = Url::parse(&with_scheme).map_err(|source| ConfigError::InvalidTarget {
        url: target.to_owned(),
        source,
    })?;
    check_scheme_and_host(&base, target)?;
    base.join(ADD_BOOK_PATH)
        .map_err(|source| ConfigError::InvalidTarget {
            url: target.to_owned(),
            source,
        })
}

fn check_scheme_and_host(url: &Url, target: &str) -> Result<(), ConfigError> {
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::UnsupportedScheme {
                scheme: other.to_owned(),
            });
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::TargetMissingHost {
            url: target.to_owned(),
        });
    }
    Ok(())
}
