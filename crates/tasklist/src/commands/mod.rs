//! Scripted front end: applies a command file to one session and prints views.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tasklist_app::view::PURGE_LABEL;
use tasklist_app::{Controller, ListView};
use tasklist_core::TaskId;
use tracing::{debug, info, warn};

pub mod script;

use self::script::{ScriptCommand, TaskRef, parse_line};

/// How views are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable rows.
    #[default]
    Text,
    /// One JSON document per view, one per line.
    Json,
}

/// Output switches for a script run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Run the script at `path`, or stdin when `path` is `None`.
pub fn run(controller: Controller, path: Option<&Path>, options: RunOptions) -> Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let (mut out, mut err) = (stdout.lock(), stderr.lock());
    if let Some(path) = path {
        let file =
            File::open(path).with_context(|| format!("failed to open script {}", path.display()))?;
        run_script(controller, BufReader::new(file), &mut out, &mut err, options)?;
    } else {
        run_script(controller, io::stdin().lock(), &mut out, &mut err, options)?;
    }
    Ok(())
}

/// Apply every line of `input` to `controller` and return the final session.
///
/// Empty `add` lines write the notice to `err` and continue; every other
/// failure stops the script with the offending line number attached.
pub fn run_script<R, W, E>(
    mut controller: Controller,
    input: R,
    out: &mut W,
    err: &mut E,
    options: RunOptions,
) -> Result<Controller>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut executed = 0usize;
    for (index, line) in input.lines().enumerate() {
        let number = index + 1;
        let line = line.with_context(|| format!("failed to read line {number}"))?;
        let Some(command) = parse_line(&line).with_context(|| format!("line {number}: {}", line.trim()))?
        else {
            continue;
        };
        debug!(line = number, ?command, "script command");
        execute(&mut controller, command, out, err, options)
            .with_context(|| format!("line {number}: {}", line.trim()))?;
        executed += 1;
    }
    info!(commands = executed, tasks = controller.list().len(), "script finished");

    if !options.quiet {
        print_view(&controller.view(), out, options.format)?;
    }
    out.flush().context("failed to flush output")?;
    Ok(controller)
}

fn execute<W: Write, E: Write>(
    controller: &mut Controller,
    command: ScriptCommand,
    out: &mut W,
    err: &mut E,
    options: RunOptions,
) -> Result<()> {
    match command {
        ScriptCommand::Add(text) => {
            controller.set_input(text);
            if controller.submit().is_err()
                && let Some(notice) = controller.notice()
            {
                writeln!(err, "{notice}").context("failed to write notice")?;
                controller.dismiss_notice();
                controller.set_input("");
            }
        }
        ScriptCommand::Edit(target, text) => {
            let id = resolve(controller, target)?;
            report_miss(id, controller.edit_text(id, text));
        }
        ScriptCommand::Check(target) => {
            let id = resolve(controller, target)?;
            report_miss(id, controller.set_checked(id, true));
        }
        ScriptCommand::Uncheck(target) => {
            let id = resolve(controller, target)?;
            report_miss(id, controller.set_checked(id, false));
        }
        ScriptCommand::Toggle(target) => {
            let id = resolve(controller, target)?;
            report_miss(id, controller.toggle_checked(id));
        }
        ScriptCommand::Remove(target) => {
            let id = resolve(controller, target)?;
            report_miss(id, controller.set_removed(id, true));
        }
        ScriptCommand::Restore(target) => {
            let id = resolve(controller, target)?;
            report_miss(id, controller.set_removed(id, false));
        }
        ScriptCommand::Filter(mode) => controller.set_filter(mode),
        ScriptCommand::Purge => {
            controller.purge();
        }
        ScriptCommand::List => {
            if !options.quiet {
                print_view(&controller.view(), out, options.format)?;
            }
        }
    }
    Ok(())
}

fn resolve(controller: &Controller, target: TaskRef) -> Result<TaskId> {
    Ok(target.resolve(&controller.view())?)
}

fn report_miss(id: TaskId, updated: bool) {
    if !updated {
        warn!(%id, "no task with this id");
    }
}

/// Write `view` in the requested format.
pub fn print_view<W: Write>(view: &ListView, out: &mut W, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => render_text(view, out),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, view).context("failed to serialize view")?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn render_text<W: Write>(view: &ListView, out: &mut W) -> Result<()> {
    writeln!(out, "[{}] {}", view.filter, view.filter_label)?;
    if view.rows.is_empty() {
        writeln!(out, "  (タスクがありません)")?;
    }
    for (index, row) in view.rows.iter().enumerate() {
        let mark = if row.checked { 'x' } else { ' ' };
        writeln!(
            out,
            "  #{} [{mark}] {} ({}) id={}",
            index + 1,
            row.text,
            row.action_label,
            row.id
        )?;
    }
    if view.show_purge {
        let state = if view.purge_enabled { "enabled" } else { "disabled" };
        writeln!(out, "  <{PURGE_LABEL}> {state}")?;
    }
    let counts = view.counts;
    writeln!(
        out,
        "  all={} checked={} unchecked={} removed={}",
        counts.all, counts.checked, counts.unchecked, counts.removed
    )?;
    Ok(())
}
