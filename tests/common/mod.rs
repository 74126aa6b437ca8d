#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const LTS_CONFIG: &str = "#\n# Automatically generated file; DO NOT EDIT.\n#\nCONFIG_USB_UAS=y\nCONFIG_SKY1_FOO=y\nCONFIG_DRM_PANTHOR=m\n# CONFIG_DEBUG_FS is not set\n";
pub const RC_CONFIG: &str = "CONFIG_NET_FOO=n\nCONFIG_SKY1_FOO=n\nCONFIG_DRM_PANTHOR=m\n# CONFIG_USB_UAS is not set\n";
pub const DEV_CONFIG: &str = "CONFIG_USB_UAS=y\nCONFIG_SKY1_FOO=n\n";
pub const POLICY: &str = "# Sky1 config policy\n\n[network]\nNET_FOO=y\n\n[usb]\n";
pub const README: &str = "# Sky1 config\n\n## USB Support\n\n| Option | Type | Description |\n|---|---|---|\n| `USB_XHCI_HCD` | bool | xHCI host |\n";

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub config_dir: PathBuf,
    pub dev_dir: PathBuf,
    pub layout: PathBuf,
    cargo_home: PathBuf,
    rustup_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let (config_dir, dev_dir, layout) = make_fixture_tree(tmp.path());

        let orig_home = std::env::var("HOME").unwrap_or_default();
        let cargo_home = PathBuf::from(&orig_home).join(".cargo");
        let rustup_home = PathBuf::from(&orig_home).join(".rustup");

        Self {
            _tmp: tmp,
            home,
            config_dir,
            dev_dir,
            layout,
            cargo_home,
            rustup_home,
        }
    }

    /// Command with an isolated HOME and the fixture layout.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("trackcfg");
        cmd.env("HOME", &self.home)
            .env("CARGO_HOME", &self.cargo_home)
            .env("RUSTUP_HOME", &self.rustup_home)
            .env_remove("TRACKCFG_LAYOUT")
            .arg("--layout")
            .arg(&self.layout);
        cmd
    }

    pub fn run(&self, args: &[&str]) -> String {
        let out = self
            .cmd()
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(out).expect("utf8 stdout")
    }

    pub fn config(&self, name: &str) -> PathBuf {
        self.config_dir.join(name)
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("read fixture file")
    }

    /// Every fixture file with its current bytes, for before/after comparisons.
    pub fn snapshot(&self) -> Vec<(PathBuf, Vec<u8>)> {
        let mut out = Vec::new();
        for dir in [&self.config_dir, &self.dev_dir] {
            let mut entries: Vec<_> = fs::read_dir(dir)
                .expect("read dir")
                .map(|e| e.expect("dir entry").path())
                .collect();
            entries.sort();
            for p in entries {
                let bytes = fs::read(&p).expect("read");
                out.push((p, bytes));
            }
        }
        out
    }
}

fn make_fixture_tree(base: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let config_dir = base.join("linux-sky1/config");
    let dev_dir = base.join("mainline-linux");
    fs::create_dir_all(&config_dir).expect("create config dir");
    fs::create_dir_all(&dev_dir).expect("create dev dir");

    fs::write(config_dir.join("config.sky1"), LTS_CONFIG).expect("write lts");
    fs::write(config_dir.join("config.sky1-rc"), RC_CONFIG).expect("write rc");
    fs::write(config_dir.join("config-policy.ini"), POLICY).expect("write policy");
    fs::write(config_dir.join("README.md"), README).expect("write readme");
    fs::write(dev_dir.join("config.sky1-rc"), DEV_CONFIG).expect("write dev copy");

    let layout = base.join("layout.toml");
    fs::write(
        &layout,
        r#"config_dir = "linux-sky1/config"
dev_dir = "mainline-linux"

[[tracks]]
label = "LTS"
file = "config.sky1"

[[tracks]]
label = "Latest"
file = "config.sky1-latest"

[[tracks]]
label = "RC"
file = "config.sky1-rc"
"#,
    )
    .expect("write layout");

    (config_dir, dev_dir, layout)
}
