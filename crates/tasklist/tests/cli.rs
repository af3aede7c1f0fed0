//! End-to-end tests driving the `tasklist` binary.

use std::fs;
use std::path::Path;
use std::process::Output;

use anyhow::{Context, Result, anyhow};
use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

fn tasklist(dir: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("tasklist").context("locate tasklist binary")?;
    cmd.current_dir(dir).env_remove("RUST_LOG");
    Ok(cmd)
}

fn run_json(dir: &Path, script: &str) -> Result<(Output, Value)> {
    let output = tasklist(dir)?
        .args(["run", "--format", "json"])
        .write_stdin(script)
        .output()
        .context("run tasklist")?;
    let stdout = String::from_utf8(output.stdout.clone())?;
    let last = stdout
        .lines()
        .last()
        .ok_or_else(|| anyhow!("no view printed; stderr: {}", String::from_utf8_lossy(&output.stderr)))?;
    let view = serde_json::from_str(last).context("parse final view")?;
    Ok((output, view))
}

fn row_texts(view: &Value) -> Vec<&str> {
    view["rows"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|row| row["text"].as_str()).collect())
        .unwrap_or_default()
}

#[test]
fn checked_task_appears_only_in_checked_view() -> Result<()> {
    let dir = TempDir::new()?;
    let (output, view) = run_json(dir.path(), "add buy milk\ncheck #1\nfilter checked\n")?;
    assert!(output.status.success());
    assert_eq!(view["filter"], "checked");
    assert_eq!(row_texts(&view), vec!["buy milk"]);
    assert_eq!(view["rows"][0]["checked"], true);

    let (_, view) = run_json(dir.path(), "add buy milk\ncheck #1\nfilter unchecked\n")?;
    assert!(row_texts(&view).is_empty());
    Ok(())
}

#[test]
fn purge_drops_only_trashed_tasks() -> Result<()> {
    let dir = TempDir::new()?;
    let script = "add a\nadd b\nremove #1\nfilter removed\nlist\npurge\nfilter all\n";
    let output = tasklist(dir.path())?
        .args(["run", "--format", "json"])
        .write_stdin(script)
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let views = stdout
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<Vec<Value>, _>>()?;
    assert_eq!(views.len(), 2);

    let trash = &views[0];
    assert_eq!(row_texts(trash), vec!["a"]);
    assert_eq!(trash["rows"][0]["action_label"], "復元");
    assert_eq!(trash["purge_enabled"], true);
    assert_eq!(trash["show_add_form"], false);

    let last = &views[1];
    assert_eq!(row_texts(last), vec!["b"]);
    assert_eq!(last["counts"]["removed"], 0);
    Ok(())
}

#[test]
fn empty_add_warns_and_continues() -> Result<()> {
    let dir = TempDir::new()?;
    let (output, view) = run_json(dir.path(), "add\nadd ok\n")?;
    assert!(output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("タスクを入力してください"));
    assert_eq!(row_texts(&view), vec!["ok"]);
    Ok(())
}

#[test]
fn script_errors_fail_with_line_number() -> Result<()> {
    let dir = TempDir::new()?;
    let output = tasklist(dir.path())?
        .arg("run")
        .write_stdin("add a\nfilter done\n")
        .output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("line 2"), "{stderr}");
    assert!(stderr.contains("invalid filter mode 'done'"), "{stderr}");
    Ok(())
}

#[test]
fn text_output_from_script_file() -> Result<()> {
    let dir = TempDir::new()?;
    let script = dir.path().join("session.txt");
    fs::write(&script, "# groceries\nadd buy milk\n\nadd eggs\ntoggle #2\n")?;

    let output = tasklist(dir.path())?.arg("run").arg(&script).output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("[all] 全てのタスク\n"), "{stdout}");
    assert!(stdout.contains("#1 [ ] buy milk (削除)"), "{stdout}");
    assert!(stdout.contains("#2 [x] eggs (削除)"), "{stdout}");
    assert!(stdout.contains("all=2 checked=1 unchecked=1 removed=0"), "{stdout}");
    Ok(())
}

#[test]
fn quiet_prints_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    let output = tasklist(dir.path())?
        .args(["run", "--quiet"])
        .write_stdin("add a\nlist\n")
        .output()?;
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn project_config_sets_starting_mode() -> Result<()> {
    let dir = TempDir::new()?;
    fs::create_dir(dir.path().join(".tasklist"))?;
    fs::write(
        dir.path().join(".tasklist").join("config.toml"),
        "[list]\ndefault_filter = \"unchecked\"\n",
    )?;

    let (_, view) = run_json(dir.path(), "add a\n")?;
    assert_eq!(view["filter"], "unchecked");
    assert_eq!(view["show_add_form"], true);

    let explicit = dir.path().join("trash.toml");
    fs::write(&explicit, "[list]\ndefault_filter = \"removed\"\n")?;
    let output = tasklist(dir.path())?
        .arg("--config")
        .arg(&explicit)
        .args(["run", "--format", "json"])
        .write_stdin("")
        .output()?;
    let view: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(view["filter"], "removed");
    assert_eq!(view["show_purge"], true);
    Ok(())
}

#[test]
fn invalid_project_config_is_reported() -> Result<()> {
    let dir = TempDir::new()?;
    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "[list]\ndefault_filter = \"done\"\n")?;

    let output = tasklist(dir.path())?
        .arg("--config")
        .arg(&bad)
        .arg("run")
        .write_stdin("")
        .output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("bad.toml"));
    Ok(())
}

#[test]
fn init_config_writes_keybindings() -> Result<()> {
    let dir = TempDir::new()?;
    let target = dir.path().join("conf").join("config.toml");

    let output = tasklist(dir.path())?
        .args(["init-config", "--force", "--output"])
        .arg(&target)
        .output()?;
    assert!(output.status.success());

    let written = fs::read_to_string(&target)?;
    assert!(written.contains("[tui.keybindings.browse]"));
    assert!(written.contains("[tui.keybindings.input]"));
    Ok(())
}
