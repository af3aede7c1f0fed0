//! User configuration for tasklist.

use anyhow::{Context, Result, anyhow};
use std::io::{self, BufRead, Write};
use std::path::Path;

pub mod keybindings;

pub use keybindings::{Action, KeyBindingsConfig, ViewType};

/// Write the default user configuration to `output` or the default location.
pub fn init_config(output: Option<&Path>, force: bool) -> Result<()> {
    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => keybindings::default_config_path()
            .ok_or_else(|| anyhow!("設定ディレクトリを特定できませんでした"))?,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    write_default_config(&output_path, force, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// Returns whether the file was written.
fn write_default_config<R: BufRead, W: Write>(
    path: &Path,
    force: bool,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    if path.exists() && !force && !confirm_overwrite(path, input, out)? {
        writeln!(out, "中止しました。")?;
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("ディレクトリの作成に失敗しました: {}", parent.display()))?;
    }

    let content = keybindings::generate_default_config_toml()?;

    std::fs::write(path, content)
        .with_context(|| format!("設定ファイルの書き込みに失敗しました: {}", path.display()))?;

    writeln!(out, "✓ 設定ファイルを作成しました: {}", path.display())?;
    writeln!(out)?;
    writeln!(out, "キーバインドをカスタマイズするには、このファイルを編集してください。")?;
    writeln!(out, "変更を適用するには、tasklist tui を再起動してください。")?;

    Ok(true)
}

fn confirm_overwrite<R: BufRead, W: Write>(path: &Path, input: &mut R, out: &mut W) -> Result<bool> {
    write!(out, "ファイルがすでに存在します: {}\n上書きしますか? [y/N]: ", path.display())?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
