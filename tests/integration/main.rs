//! Integration tests for regauth

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn regauth() -> Command {
        let mut cmd = cargo_bin_cmd!("regauth");
        cmd.env_remove("REGAUTH_CONFIG").env_remove("REGAUTH_TOKEN");
        cmd
    }

    fn write_config(dir: &TempDir, content: &str) -> String {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path.display().to_string()
    }

    #[test]
    fn help_displays() {
        regauth()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("GitLab-backed registry authentication"));
    }

    #[test]
    fn version_displays() {
        regauth()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("regauth"));
    }

    #[test]
    fn check_prints_settings() {
        let dir = TempDir::new().unwrap();
        let config = write_config(
            &dir,
            r#"
            publish = "developer"

            [gitlab]
            url = "https://gitlab.example.com"

            [auth_cache]
            ttl = 120
        "#,
        );

        regauth()
            .args(["--config", &config, "check"])
            .assert()
            .success()
            .stdout(predicate::str::contains("https://gitlab.example.com"))
            .stdout(predicate::str::contains("ttl 120s"))
            .stdout(predicate::str::contains("$developer"));
    }

    #[test]
    fn check_reports_disabled_cache() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "[auth_cache]\nenabled = false\n");

        regauth()
            .args(["--config", &config, "check"])
            .assert()
            .success()
            .stdout(predicate::str::contains("disabled"));
    }

    #[test]
    fn check_rejects_unknown_publish_level() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "publish = \"$admin\"\n");

        regauth()
            .args(["--config", &config, "check"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"))
            .stderr(predicate::str::contains("$admin"));
    }

    #[test]
    fn missing_explicit_config_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        regauth()
            .args(["--config", path.to_str().unwrap(), "check"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Configuration file not found"));
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("regauth.toml");

        regauth()
            .args(["--config", path.to_str().unwrap(), "config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("regauth.toml"));
    }

    #[test]
    fn config_init_then_show() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("regauth.toml");
        let path = path.to_str().unwrap();

        regauth()
            .args(["--config", path, "config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));

        regauth()
            .args(["--config", path, "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[auth_cache]"))
            .stdout(predicate::str::contains("ttl = 300"));
    }

    #[test]
    fn config_init_force_replaces_broken_file() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "publish = \"$admin\"\n");

        regauth()
            .args(["--config", &config, "config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));

        regauth()
            .args(["--config", &config, "config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));

        regauth()
            .args(["--config", &config, "config", "init", "--force"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));

        regauth()
            .args(["--config", &config, "check"])
            .assert()
            .success()
            .stdout(predicate::str::contains("$maintainer"));
    }

    #[test]
    fn check_rejects_huge_ttl() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "[auth_cache]\nttl = 9223372036854775807\n");

        regauth()
            .args(["--config", &config, "check"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("auth_cache.ttl must be between"));
    }

    #[test]
    fn match_allows_scope_prefix() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "");

        regauth()
            .args([
                "--config",
                &config,
                "match",
                "--group",
                "org/team",
                "--package",
                "@org/team/pkg",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("may publish @org/team/pkg"));
    }

    #[test]
    fn match_denies_scoped_package() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "");

        regauth()
            .args([
                "--config",
                &config,
                "match",
                "-g",
                "org/team/sub",
                "-p",
                "@org/team",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "must have required permissions: $maintainer at package-scope",
            ));
    }

    #[test]
    fn match_denies_unscoped_package() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "legacy_mode = true\n");

        regauth()
            .args(["--config", &config, "match", "-g", "org", "-p", "otherpkg"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("$owner at package-name"));
    }

    #[test]
    fn verify_requires_token() {
        regauth()
            .args(["verify", "--user", "alice"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--token"));
    }

    #[test]
    fn verify_unreachable_gitlab_is_generic_error() {
        let dir = TempDir::new().unwrap();
        let config = write_config(
            &dir,
            "[gitlab]\nurl = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n",
        );

        regauth()
            .args(["--config", &config, "verify", "-u", "alice", "-t", "glpat-x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error authenticating user"));
    }
}
