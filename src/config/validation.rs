use crate::config::types::{CatalogConfig, Config, OutputConfig, SearchConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_search_config(&config.search)?;
    Ok(())
}

/// Validates catalog configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid endpoint: {}", e)))?;

    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "endpoint must use http or https, got '{}'",
            endpoint.scheme()
        )));
    }

    // Query parameters are appended with '?'
    if endpoint.query().is_some() {
        return Err(ConfigError::Validation(format!(
            "endpoint must not carry a query string, got '{}'",
            config.endpoint
        )));
    }

    if config.page_size < 1 {
        return Err(ConfigError::Validation(format!(
            "page_size must be >= 1, got {}",
            config.page_size
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.crawl_deadline_secs == Some(0) {
        return Err(ConfigError::Validation(
            "crawl_deadline_secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "directory cannot be empty".to_string(),
        ));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.report_file.is_empty() {
        return Err(ConfigError::Validation(
            "report_file cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that the search names at least one criterion
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.criteria().is_empty() {
        return Err(ConfigError::Validation(
            "search needs a term, an author or a title".to_string(),
        ));
    }
    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(endpoint: &str) -> CatalogConfig {
        CatalogConfig {
            endpoint: endpoint.to_string(),
            page_size: 50,
            timeout_secs: 10,
            crawl_deadline_secs: None,
        }
    }

    #[test]
    fn test_validate_endpoint() {
        assert!(validate_catalog_config(&catalog("https://catalog.example.org/search.json")).is_ok());
        assert!(validate_catalog_config(&catalog("http://127.0.0.1:8080/search")).is_ok());

        assert!(matches!(
            validate_catalog_config(&catalog("not a url")),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(validate_catalog_config(&catalog("ftp://catalog.example.org/")).is_err());
        assert!(validate_catalog_config(&catalog("https://catalog.example.org/?q=x")).is_err());
    }

    #[test]
    fn test_validate_catalog_limits() {
        let mut config = catalog("https://catalog.example.org/search.json");
        config.page_size = 0;
        assert!(validate_catalog_config(&config).is_err());

        let mut config = catalog("https://catalog.example.org/search.json");
        config.timeout_secs = 0;
        assert!(validate_catalog_config(&config).is_err());

        let mut config = catalog("https://catalog.example.org/search.json");
        config.crawl_deadline_secs = Some(0);
        assert!(validate_catalog_config(&config).is_err());
    }

    #[test]
    fn test_validate_search() {
        assert!(validate_search_config(&SearchConfig::default()).is_err());
        assert!(validate_search_config(&SearchConfig {
            term: Some(String::new()),
            ..Default::default()
        })
        .is_err());
        assert!(validate_search_config(&SearchConfig {
            title: Some("Dom Casmurro".to_string()),
            ..Default::default()
        })
        .is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("a@b@example.com").is_err());
    }
}
