use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const CONFIG: &str = r#"
service:
  name: billing
  port: 8080
database:
  password: !tuple [!atom gcp_secret, !atom string, db-password]
  pool_size: !tuple [!atom gcp_secret, !atom integer, db-pool-size, "2"]
replica:
  password: !tuple [!atom gcp_secret, !atom string, db-password, latest]
"#;

fn write_config(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("config.yaml");
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("bootsecrets").unwrap();
    cmd.env_remove("BOOTSECRETS_PROJECT")
        .env_remove("BOOTSECRETS_BACKEND")
        .env_remove("BOOTSECRETS_ACCESS_TOKEN")
        .env_remove("BOOTSECRETS_LOG");
    cmd
}

#[test]
fn check_lists_references() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);

    bin()
        .args(["check", &path])
        .assert()
        .success()
        .stdout(contains("$.database.password\tdb-password@latest\tstring"))
        .stdout(contains("$.database.pool_size\tdb-pool-size@2\tinteger"))
        .stdout(contains("3 reference(s), 2 unique secret(s)"));
}

#[test]
fn check_rejects_malformed_reference() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "key: !tuple [!atom gcp_secret, not-a-type, some-secret]\n",
    );

    bin()
        .args(["check", &path])
        .assert()
        .code(2)
        .stderr(contains("$.key"));
}

#[test]
fn check_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);

    bin()
        .args(["check", &path, "--format", "json"])
        .assert()
        .success()
        .stdout(contains("\"valid\":true"))
        .stdout(contains("\"unique_secrets\":2"));
}

#[test]
fn resolve_with_file_backend() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);
    let secrets = dir.path().join("secrets");
    fs::create_dir_all(secrets.join("db-password")).unwrap();
    fs::create_dir_all(secrets.join("db-pool-size")).unwrap();
    fs::write(secrets.join("db-password/latest"), "hunter2").unwrap();
    fs::write(secrets.join("db-pool-size/2"), "16").unwrap();

    bin()
        .args([
            "resolve",
            &path,
            "--project",
            "demo",
            "--backend",
            "file",
            "--secrets-dir",
            secrets.to_str().unwrap(),
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(contains("\"password\": \"hunter2\""))
        .stdout(contains("\"pool_size\": 16"))
        .stdout(contains("\"port\": 8080"));
}

#[test]
fn resolve_with_env_backend_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);
    let out = dir.path().join("resolved.yaml");

    bin()
        .env("CLITEST_DB_PASSWORD", "from-env")
        .env("CLITEST_DB_POOL_SIZE__2", "4")
        .args([
            "resolve",
            &path,
            "--project",
            "demo",
            "--backend",
            "env",
            "--env-prefix",
            "CLITEST_",
            "--out",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("password: from-env"));
    assert!(written.contains("pool_size: 4"));
    assert!(!written.contains("gcp_secret"));
}

#[cfg(unix)]
#[test]
fn resolved_output_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);
    let out = dir.path().join("resolved.yaml");
    fs::write(&out, "stale").unwrap();
    fs::set_permissions(&out, fs::Permissions::from_mode(0o644)).unwrap();

    bin()
        .env("CLITEST_MODE_DB_PASSWORD", "pw")
        .env("CLITEST_MODE_DB_POOL_SIZE__2", "4")
        .args([
            "resolve",
            &path,
            "--project",
            "demo",
            "--backend",
            "env",
            "--env-prefix",
            "CLITEST_MODE_",
            "--out",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let mode = fs::metadata(&out).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    assert!(fs::read_to_string(&out).unwrap().contains("password: pw"));
}

#[test]
fn resolve_fails_when_secret_is_missing() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);

    bin()
        .args([
            "resolve",
            &path,
            "--project",
            "demo",
            "--backend",
            "env",
            "--env-prefix",
            "CLITEST_ABSENT_",
        ])
        .assert()
        .code(3)
        .stdout("")
        .stderr(contains("secret not found"));
}

#[test]
fn resolve_fails_on_cast_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "port: !tuple [!atom gcp_secret, !atom integer, port]\n",
    );

    bin()
        .env("CLITEST_CAST_PORT", "eighty")
        .args([
            "resolve",
            &path,
            "--project",
            "demo",
            "--backend",
            "env",
            "--env-prefix",
            "CLITEST_CAST_",
        ])
        .assert()
        .code(3)
        .stderr(contains("cannot cast"));
}

#[test]
fn resolve_with_gcp_requires_token() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);

    bin()
        .args(["resolve", &path, "--project", "demo"])
        .assert()
        .code(4)
        .stderr(contains("BOOTSECRETS_ACCESS_TOKEN"));
}

#[test]
fn resolve_keeps_typed_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "1: one\n!atom pool_size: !tuple [!atom gcp_secret, !atom integer, pool]\n",
    );

    bin()
        .env("CLITEST_KEYS_POOL", "10")
        .args([
            "resolve",
            &path,
            "--project",
            "demo",
            "--backend",
            "env",
            "--env-prefix",
            "CLITEST_KEYS_",
        ])
        .assert()
        .success()
        .stdout(contains("1: one"))
        .stdout(contains("!atom pool_size"))
        .stdout(contains("'1'").not());
}

#[test]
fn invalid_yaml_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "a: !vault nope\n");

    bin().args(["check", &path]).assert().code(2);
}
