use thiserror::Error;
use url::Url;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EndpointError {
    #[error("endpoint URL is empty")]
    Empty,

    #[error("endpoint URL is invalid: {0}")]
    Invalid(String),

    #[error("unsupported endpoint scheme: {0}")]
    UnsupportedScheme(String),
}

/// Trims the raw value, defaults a missing scheme to `https://` and only
/// accepts `http`/`https` URLs with a host.
pub fn normalize_endpoint(raw: &str) -> Result<Url, EndpointError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EndpointError::Empty);
    }

    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|e| EndpointError::Invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(EndpointError::Invalid(format!("{} has no host", candidate)));
    }

    Ok(url)
}

/// True when the value starts with `scheme://`. A `://` that only shows up
/// after the host, e.g. in a query string, does not count.
fn has_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
