use assert_cmd::prelude::*;
use color_eyre::Result;
use gantry_common::Node;
use std::path::Path;
use std::process::Command;

fn write_node(dir: &Path, node: &Node) -> Result<()> {
    std::fs::write(
        dir.join(format!("{}.json", node.uuid)),
        serde_json::to_string_pretty(node)?,
    )?;
    Ok(())
}

fn read_node(dir: &Path, node: &Node) -> Result<Node> {
    let content = std::fs::read_to_string(dir.join(format!("{}.json", node.uuid)))?;
    Ok(serde_json::from_str(&content)?)
}

fn gantry(dir: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("gantry")?;
    cmd.arg("--state-dir").arg(dir);
    Ok(cmd)
}

fn ilo_node() -> Node {
    Node::new("pxe_ilo")
        .with_driver_info("ilo_address", "10.0.0.5")
        .with_driver_info("ilo_username", "admin")
        .with_driver_info("ilo_password", "secret")
}

#[test]
fn test_capability_set_get_unset() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let node = ilo_node().with_capabilities("foo:bar");
    write_node(tmp.path(), &node)?;

    gantry(tmp.path())?
        .args(["capability", "set", &node.uuid.to_string(), "boot_mode", "uefi"])
        .assert()
        .success();
    assert_eq!(
        read_node(tmp.path(), &node)?.capabilities().as_deref(),
        Some("boot_mode:uefi,foo:bar")
    );

    let output = gantry(tmp.path())?
        .args(["capability", "get", &node.uuid.to_string(), "boot_mode"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "uefi");

    gantry(tmp.path())?
        .args(["capability", "unset", &node.uuid.to_string(), "boot_mode"])
        .assert()
        .success();
    assert_eq!(
        read_node(tmp.path(), &node)?.capabilities().as_deref(),
        Some("foo:bar")
    );

    gantry(tmp.path())?
        .args(["capability", "get", &node.uuid.to_string(), "boot_mode"])
        .assert()
        .failure();

    Ok(())
}

#[test]
fn test_validate_reports_connection() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let node = ilo_node().with_capabilities("boot_mode:bios");
    write_node(tmp.path(), &node)?;

    let output = gantry(tmp.path())?
        .args(["validate", &node.uuid.to_string()])
        .output()?;
    assert!(
        output.status.success(),
        "validate failed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("admin@10.0.0.5:443"));
    assert!(stdout.contains("Boot mode: bios"));
    assert!(!stdout.contains("secret"));
    Ok(())
}

#[test]
fn test_validate_uses_config_defaults() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let node = ilo_node();
    write_node(tmp.path(), &node)?;
    let config = tmp.path().join("gantry.yaml");
    std::fs::write(&config, "ilo:\n  client_port: 8443\n  client_timeout: 5\n")?;

    let output = gantry(tmp.path())?
        .arg("--config")
        .arg(&config)
        .args(["validate", &node.uuid.to_string()])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("admin@10.0.0.5:8443 (timeout 5s)"));
    assert!(stdout.contains("unset"));
    Ok(())
}

#[test]
fn test_validate_rejects_bad_node() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let node = Node::new("pxe_ilo").with_capabilities("boot_mode:uefi");
    write_node(tmp.path(), &node)?;

    let output = gantry(tmp.path())?
        .args(["validate", &node.uuid.to_string()])
        .output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'ilo_address' not supplied"));

    let node = ilo_node().with_capabilities("boot_mode:efi");
    write_node(tmp.path(), &node)?;
    let output = gantry(tmp.path())?
        .args(["validate", &node.uuid.to_string()])
        .output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid boot_mode parameter 'efi'"));
    Ok(())
}

#[test]
fn test_properties_lists_driver_info() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let output = gantry(tmp.path())?.arg("properties").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["ilo_address", "ilo_username", "ilo_password", "client_port", "client_timeout"] {
        assert!(stdout.contains(name), "missing {}", name);
    }
    Ok(())
}

#[test]
fn test_unknown_node() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    gantry(tmp.path())?
        .args(["capability", "get", &uuid_string(), "boot_mode"])
        .assert()
        .failure();
    Ok(())
}

fn uuid_string() -> String {
    Node::new("pxe_ilo").uuid.to_string()
}
