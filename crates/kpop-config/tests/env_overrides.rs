//! Environment variables override TOML and defaults.

use figment::Jail;
use kpop_config::KpopConfig;
use pretty_assertions::assert_eq;

#[test]
fn env_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("KPOPNET_PUBLISH__OUT_DIR", "/srv/kpopnet");
        jail.set_env("KPOPNET_VALIDATE__CHECK_URLS", "true");

        let config = KpopConfig::load().expect("config loads");
        assert_eq!(config.publish.out_dir, "/srv/kpopnet");
        assert!(config.validate.check_urls);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "kpopnet.toml",
            r#"
[publish]
json_file_name = "from-file.json"
"#,
        )?;
        jail.set_env("KPOPNET_PUBLISH__JSON_FILE_NAME", "from-env.json");

        let config = KpopConfig::load().expect("config loads");
        assert_eq!(config.publish.json_file_name, "from-env.json");
        Ok(())
    });
}

// dotenvy writes the process env and nothing restores it, so no other test
// in this binary may assert on `publish.site_base_url`.
#[test]
fn dotenv_file_is_read() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "KPOPNET_PUBLISH__SITE_BASE_URL=https://mirror.example\n")?;

        let config = KpopConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.publish.site_base_url, "https://mirror.example");
        Ok(())
    });
}
