mod common;

use common::{TestEnv, LTS_CONFIG, POLICY, RC_CONFIG};
use predicates::str::contains;

#[test]
fn show_lists_every_source() {
    let env = TestEnv::new();
    let out = env.run(&["show", "CONFIG_USB_UAS"]);
    assert!(out.contains("=== CONFIG_USB_UAS ==="));
    assert!(out.contains("CONFIG_USB_UAS=y"));
    assert!(out.contains("# CONFIG_USB_UAS is not set"));
    assert!(out.contains("(dev) config.sky1-rc"));
    assert!(out.contains("(not in policy)"));
    assert!(out.contains("(not documented)"));
    // Latest has no file on disk and is skipped entirely.
    assert!(!out.contains("config.sky1-latest"));
}

#[test]
fn show_reports_policy_section_and_readme_row() {
    let env = TestEnv::new();
    let out = env.run(&["show", "NET_FOO"]);
    assert!(out.contains("[network] NET_FOO=y"));
    assert!(out.contains("(not found)"));

    let out = env.run(&["show", "USB_XHCI_HCD"]);
    assert!(out.contains("| `USB_XHCI_HCD` | bool | xHCI host |"));
}

#[test]
fn set_dry_run_lists_plan_and_writes_nothing() {
    let env = TestEnv::new();
    let before = env.snapshot();

    env.cmd()
        .args([
            "set",
            "USB_UAS=m",
            "--policy",
            "usb",
            "--doc",
            "USB Support",
            "--type",
            "module",
            "--desc",
            "USB Attached SCSI",
        ])
        .assert()
        .success()
        .stdout(contains("Dry run: 5 file(s) to update"))
        .stdout(contains("add USB_UAS=m to [usb]"))
        .stdout(contains("add to 'USB Support' table"))
        .stdout(contains("Pass --apply to write changes."));

    assert_eq!(env.snapshot(), before);
}

#[test]
fn set_apply_updates_every_file_then_is_idempotent() {
    let env = TestEnv::new();
    let args = [
        "set",
        "USB_UAS=m",
        "--policy",
        "usb",
        "--doc",
        "USB Support",
        "--type",
        "module",
        "--desc",
        "USB Attached SCSI",
        "--apply",
    ];

    env.cmd()
        .args(args)
        .assert()
        .success()
        .stdout(contains("Will apply: 5 file(s) to update"))
        .stdout(contains("Done. 5 file(s) updated."));

    assert_eq!(
        env.read(&env.config("config.sky1")),
        LTS_CONFIG.replace("CONFIG_USB_UAS=y", "CONFIG_USB_UAS=m")
    );
    assert_eq!(
        env.read(&env.config("config.sky1-rc")),
        RC_CONFIG.replace("# CONFIG_USB_UAS is not set", "CONFIG_USB_UAS=m")
    );
    assert!(env
        .read(&env.dev_dir.join("config.sky1-rc"))
        .contains("CONFIG_USB_UAS=m\n"));
    assert_eq!(
        env.read(&env.config("config-policy.ini")),
        format!("{}USB_UAS=m\n", POLICY)
    );
    let readme = env.read(&env.config("README.md"));
    assert!(readme.ends_with(
        "| `USB_XHCI_HCD` | bool | xHCI host |\n| `USB_UAS` | module | USB Attached SCSI |\n"
    ));

    let after = env.snapshot();
    env.cmd()
        .args(args)
        .assert()
        .success()
        .stdout(contains("No changes needed: CONFIG_USB_UAS=m already set everywhere."));
    assert_eq!(env.snapshot(), after);
}

#[test]
fn set_warns_for_tracks_without_the_option() {
    let env = TestEnv::new();
    env.cmd()
        .args(["set", "NET_FOO=y"])
        .assert()
        .success()
        .stdout(contains(
            "warn: CONFIG_NET_FOO not found in config.sky1 (may not exist in this kernel version)",
        ))
        .stdout(contains("Dry run: 1 file(s) to update"));
}

#[test]
fn set_warns_when_readme_heading_has_no_table() {
    let env = TestEnv::new();
    env.cmd()
        .args([
            "set", "USB_UAS=y", "--doc", "Audio", "--type", "bool", "--desc", "x",
        ])
        .assert()
        .success()
        .stdout(contains("no table found under '## Audio' in README.md"));
}

#[test]
fn set_rejects_assignment_without_equals() {
    let env = TestEnv::new();
    env.cmd()
        .args(["set", "USB_UAS"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("OPTION=VALUE"));
}

#[test]
fn set_doc_requires_type_and_desc() {
    let env = TestEnv::new();
    let before = env.snapshot();
    env.cmd()
        .args(["set", "USB_UAS=m", "--doc", "USB Support", "--apply"])
        .assert()
        .failure()
        .code(2);
    assert_eq!(env.snapshot(), before);
}

#[test]
fn remove_requires_a_target() {
    let env = TestEnv::new();
    env.cmd()
        .args(["remove", "NET_FOO"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn remove_drops_policy_entry_but_never_touches_tracks() {
    let env = TestEnv::new();
    env.cmd()
        .args(["remove", "net_foo", "--policy", "--doc", "--apply"])
        .assert()
        .success()
        .stdout(contains("remove net_foo from policy"))
        .stdout(contains("Done. 1 file(s) updated."));

    let policy = env.read(&env.config("config-policy.ini"));
    assert!(!policy.contains("NET_FOO"));
    assert!(policy.contains("[network]\n"));
    assert_eq!(env.read(&env.config("config.sky1-rc")), RC_CONFIG);

    env.cmd()
        .args(["remove", "NET_FOO", "--policy"])
        .assert()
        .success()
        .stdout(contains("Nothing to remove for NET_FOO."));
}

#[test]
fn remove_dry_run_writes_nothing() {
    let env = TestEnv::new();
    let before = env.snapshot();

    env.cmd()
        .args(["remove", "NET_FOO", "--policy", "--doc"])
        .assert()
        .success()
        .stdout(contains("Dry run: 1 file(s) to update"))
        .stdout(contains("remove NET_FOO from policy"))
        .stdout(contains("Pass --apply to write changes."));

    assert_eq!(env.snapshot(), before);
}

#[test]
fn remove_doc_row() {
    let env = TestEnv::new();
    env.cmd()
        .args(["remove", "USB_XHCI_HCD", "--doc", "--apply"])
        .assert()
        .success();
    let readme = env.read(&env.config("README.md"));
    assert!(!readme.contains("USB_XHCI_HCD"));
    assert!(readme.contains("|---|---|---|\n"));
}

#[test]
fn explicit_missing_layout_fails() {
    let env = TestEnv::new();
    let missing = env.home.join("nope.toml");
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("trackcfg");
    cmd.env("HOME", &env.home)
        .env_remove("TRACKCFG_LAYOUT")
        .arg("--layout")
        .arg(&missing)
        .args(["show", "USB_UAS"])
        .assert()
        .failure()
        .stderr(contains("layout file not found"));
}

#[test]
fn layout_can_come_from_the_environment() {
    let env = TestEnv::new();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("trackcfg");
    cmd.env("HOME", &env.home)
        .env("TRACKCFG_LAYOUT", &env.layout)
        .args(["show", "SKY1_FOO"])
        .assert()
        .success()
        .stdout(contains("CONFIG_SKY1_FOO=n"));
}
