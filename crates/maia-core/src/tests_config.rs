#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::error::ConfigError;
    use std::env;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_valid() {
        let config = MaiaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history.capacity, 150);
        assert!(config.history.enabled);
    }

    #[test]
    fn test_config_validation_history() {
        let mut config = MaiaConfig::default();

        config.history.capacity = 0;
        assert!(config.validate().is_err());

        config.history.capacity = 20_000;
        assert!(config.validate().is_err());

        config.history.capacity = 200;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_server() {
        let mut config = MaiaConfig::default();

        config.server.bind_addr = "not-an-address".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.server.bind_addr = "0.0.0.0:9000".to_string();
        config.server.max_body_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_logging() {
        let mut config = MaiaConfig::default();
        config.logging.filter = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_to_toml_string() {
        let config = MaiaConfig::default();
        let toml_str = config.to_toml_string().unwrap();

        assert!(toml_str.contains("[history]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("capacity"));
        assert!(toml_str.contains("bind_addr"));
    }

    #[test]
    fn test_config_from_toml_string() {
        let toml_str = r#"
            [history]
            enabled = false
            capacity = 42

            [server]
            bind_addr = "0.0.0.0:8080"
            max_body_bytes = 1024
        "#;

        let config: MaiaConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.history.enabled);
        assert_eq!(config.history.capacity, 42);
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        // Missing section falls back to defaults
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let mut config = MaiaConfig::default();
        config.history.capacity = 77;

        let tf = NamedTempFile::new().unwrap();
        config.save_to_file(tf.path()).unwrap();

        let loaded = MaiaConfig::from_file(tf.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let tf = NamedTempFile::new().unwrap();
        fs::write(tf.path(), "[history]\nenabled = true\ncapacity = 0\n").unwrap();
        assert!(MaiaConfig::from_file(tf.path()).is_err());

        fs::write(tf.path(), "this is = = not toml").unwrap();
        assert!(matches!(
            MaiaConfig::from_file(tf.path()),
            Err(ConfigError::TomlParse(_))
        ));
    }

    // Env overrides and layering share process-wide state, so they run in
    // one test.
    #[test]
    fn test_layered_loading_and_env_overrides() {
        let default_file = NamedTempFile::new().unwrap();
        fs::write(
            default_file.path(),
            "[history]\nenabled = true\ncapacity = 50\n\n[server]\nbind_addr = \"127.0.0.1:9000\"\nmax_body_bytes = 2048\n",
        )
        .unwrap();

        let user_file = NamedTempFile::new().unwrap();
        fs::write(
            user_file.path(),
            "[server]\nbind_addr = \"127.0.0.1:9100\"\nmax_body_bytes = 4096\n",
        )
        .unwrap();

        let config =
            MaiaConfig::load_layered(Some(default_file.path()), Some(user_file.path())).unwrap();
        assert_eq!(config.history.capacity, 50);
        assert_eq!(config.server.bind_addr, "127.0.0.1:9100");
        assert_eq!(config.server.max_body_bytes, 4096);

        env::set_var("MAIA_HISTORY_CAPACITY", "120");
        let config =
            MaiaConfig::load_layered(Some(default_file.path()), Some(user_file.path())).unwrap();
        assert_eq!(config.history.capacity, 120);

        env::set_var("MAIA_HISTORY_CAPACITY", "lots");
        assert!(MaiaConfig::load_layered(None, None).is_err());
        env::remove_var("MAIA_HISTORY_CAPACITY");

        let missing = std::path::Path::new("/nonexistent/maia.toml");
        let config = MaiaConfig::load_layered(Some(missing), None).unwrap();
        assert_eq!(config.history.capacity, 150);
    }
}
