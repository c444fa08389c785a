//! Integration tests for imgcache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs::{self, File};
    use std::io::Cursor;
    use std::path::Path;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    /// Command isolated from the user's config and any local `.imgcache.toml`
    fn imgcache(root: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("imgcache");
        cmd.env_remove("IMGCACHE_ROOT")
            .arg("--config")
            .arg(root.join("none.toml"))
            .arg("--no-local")
            .arg("--root")
            .arg(root);
        cmd
    }

    fn write_png(root: &Path, rel: &str, width: u32, height: u32, mtime_secs: u64) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();

        let mut bytes = Vec::new();
        image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]))
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        fs::write(&path, bytes).unwrap();

        let file = File::options().write(true).open(&path).unwrap();
        file.set_modified(UNIX_EPOCH + Duration::from_secs(mtime_secs))
            .unwrap();
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("imgcache")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Resized image variant cache"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("imgcache")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("imgcache"));
    }

    #[test]
    fn resolve_generates_variant() {
        let temp = TempDir::new().unwrap();
        write_png(temp.path(), "photos/a.png", 400, 300, 1000);

        imgcache(temp.path())
            .args(["resolve", "photos/a.png"])
            .assert()
            .success()
            .stdout(predicate::str::contains("photos/cache/a_200_1_1_65_1000.png"));

        let variant = temp.path().join("photos/cache/a_200_1_1_65_1000.png");
        let decoded = image::open(&variant).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 150));
    }

    #[test]
    fn resolve_replaces_stale_variant() {
        let temp = TempDir::new().unwrap();
        write_png(temp.path(), "photos/a.png", 400, 300, 1000);
        imgcache(temp.path())
            .args(["resolve", "photos/a.png"])
            .assert()
            .success();

        write_png(temp.path(), "photos/a.png", 400, 300, 2000);
        imgcache(temp.path())
            .args(["resolve", "photos/a.png", "--absolute"])
            .assert()
            .success()
            .stdout(predicate::str::contains("a_200_1_1_65_2000.png"));

        let cache = temp.path().join("photos/cache");
        assert!(!cache.join("a_200_1_1_65_1000.png").exists());
        assert!(cache.join("a_200_1_1_65_2000.png").exists());
    }

    #[test]
    fn resolve_missing_source_is_not_an_error() {
        let temp = TempDir::new().unwrap();

        imgcache(temp.path())
            .args(["resolve", "photos/nope.png"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("No source image"));
        assert!(!temp.path().join("photos").exists());
    }

    #[test]
    fn resolve_rejects_unsupported_format() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("b.webp"),
            b"RIFF\x24\x00\x00\x00WEBPVP8 \x18\x00\x00\x00",
        )
        .unwrap();

        imgcache(temp.path())
            .args(["resolve", "b.webp"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unsupported image format"));

        let cache = temp.path().join("cache");
        let leftovers = fs::read_dir(&cache).map(|d| d.count()).unwrap_or(0);
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn resolve_rejects_escaping_path() {
        let temp = TempDir::new().unwrap();

        imgcache(temp.path())
            .args(["resolve", "../outside.png"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid path"));
    }

    #[test]
    fn warm_reports_summary() {
        let temp = TempDir::new().unwrap();
        write_png(temp.path(), "a.png", 64, 64, 1000);
        write_png(temp.path(), "b.png", 80, 40, 1000);

        imgcache(temp.path())
            .args(["warm", "a.png", "b.png", "missing.png", "-j", "2"])
            .assert()
            .success();

        assert!(temp.path().join("cache/a_200_1_1_65_1000.png").exists());
        assert!(temp.path().join("cache/b_200_1_1_65_1000.png").exists());
    }

    #[test]
    fn list_json_reports_stale_variants() {
        let temp = TempDir::new().unwrap();
        write_png(temp.path(), "a.png", 64, 64, 1000);
        fs::create_dir_all(temp.path().join("cache")).unwrap();
        fs::write(temp.path().join("cache/a_200_1_1_65_1.png"), b"old").unwrap();

        imgcache(temp.path())
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"status\": \"stale\""));
    }

    #[test]
    fn purge_dry_run_keeps_files() {
        let temp = TempDir::new().unwrap();
        write_png(temp.path(), "a.png", 64, 64, 1000);
        fs::create_dir_all(temp.path().join("cache")).unwrap();
        let stale = temp.path().join("cache/a_200_1_1_65_1.png");
        fs::write(&stale, b"old").unwrap();

        imgcache(temp.path())
            .args(["purge", "--dry-run"])
            .assert()
            .success()
            .stderr(predicate::str::contains("a_200_1_1_65_1.png"));
        assert!(stale.exists());

        imgcache(temp.path()).args(["purge"]).assert().success();
        assert!(!stale.exists());
    }

    #[test]
    fn resize_writes_jpeg() {
        let temp = TempDir::new().unwrap();
        write_png(temp.path(), "wide.png", 640, 200, 1000);
        let dest = temp.path().join("out.jpg");

        imgcache(temp.path())
            .arg("resize")
            .arg(temp.path().join("wide.png"))
            .arg(&dest)
            .args(["--size", "100", "--ratio", "16:9"])
            .assert()
            .success();

        let decoded = image::open(&dest).unwrap();
        assert!(decoded.width() <= 100 && decoded.height() <= 56);
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        imgcache(temp.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("none.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        imgcache(temp.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[transform]"));
    }

    #[test]
    fn completions_bash() {
        cargo_bin_cmd!("imgcache")
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("imgcache"));
    }

    #[test]
    fn invalid_ratio_fails() {
        let temp = TempDir::new().unwrap();
        imgcache(temp.path())
            .args(["resolve", "a.png", "--ratio", "0:1"])
            .assert()
            .failure();
    }
}
