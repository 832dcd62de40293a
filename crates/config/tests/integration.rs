//! Integration tests for config

#[cfg(test)]
mod tests {
    use pact_config::*;
    use pact_types::{FetchActionOptions, OutputFormat};
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        std::env::remove_var("PACT_OUTPUT");
        std::env::remove_var("PACT_SAFE_RESUME");
        std::env::remove_var("PACT_FETCH_UNNEEDED");
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
default_output = "json"

[fetch]
safe_resume = true

[repositories.gentoo]
format = "source"
location = "/var/db/repos/gentoo"

[repositories.installed]
format = "installed"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert_eq!(config.fetch, FetchActionOptions::new(true, false));
        assert_eq!(config.repositories.len(), 2);
        assert_eq!(
            config.repositories["gentoo"].format,
            RepositoryFormat::Source
        );
        assert_eq!(
            config.repositories["installed"].format,
            RepositoryFormat::Installed
        );
        assert!(config.repositories["installed"].location.is_none());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = Config::load_from_file(std::path::Path::new("/nonexistent/pact.toml")).await;
        assert!(matches!(
            result,
            Err(pact_errors::Error::Config(pact_errors::ConfigError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from_file(dir.path()).await;
        assert!(matches!(result, Err(pact_errors::Error::Io { .. })));
    }

    #[tokio::test]
    async fn test_unknown_repository_format() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[repositories.x]\nformat = \"binary\"").unwrap();
        assert!(Config::load_from_file(temp_file.path()).await.is_err());
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("PACT_OUTPUT", "json");
        std::env::set_var("PACT_FETCH_UNNEEDED", "yes");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert!(!config.fetch.safe_resume());
        assert!(config.fetch.fetch_unneeded());

        clear_env();
    }

    #[test]
    fn test_env_keeps_file_values() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("PACT_FETCH_UNNEEDED", "1");

        let mut config = Config::from_toml_str("[fetch]\nsafe_resume = true\n").unwrap();
        config.merge_env().unwrap();
        assert_eq!(config.fetch, FetchActionOptions::new(true, true));

        clear_env();
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("PACT_SAFE_RESUME", "maybe");

        let mut config = Config::default();
        assert!(config.merge_env().is_err());

        clear_env();
    }
}
