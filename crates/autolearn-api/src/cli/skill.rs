//! Skill subcommands: list, inspect and run.

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use serde_json::Value;

use autolearn_core::config::resolve_max_depth;
use autolearn_core::skill::Kwargs;
use autolearn_types::skill::SkillMeta;

use crate::response::RunResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

pub fn handle_list(state: &AppState, json: bool) -> Result<()> {
    let skills = state.engine.list();

    if json {
        println!("{}", serde_json::to_string_pretty(&skills)?);
        return Ok(());
    }

    if skills.is_empty() {
        println!();
        println!("  No skills registered.");
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Version"),
            Cell::new("Parameters"),
            Cell::new("Description"),
        ]);

    for meta in &skills {
        let params = meta
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        table.add_row(vec![
            Cell::new(&meta.name),
            Cell::new(meta.version.to_string()),
            Cell::new(if params.is_empty() { "-".to_string() } else { params }),
            Cell::new(&meta.description),
        ]);
    }

    println!();
    println!("{table}");
    println!(
        "  {}",
        style(format!("config: {}", state.config_path.display())).dim()
    );
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// Inspect
// ---------------------------------------------------------------------------

pub fn handle_inspect(name: &str, state: &AppState, json: bool) -> Result<()> {
    let meta = state.engine.meta(name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&meta)?);
        return Ok(());
    }

    print_meta(&meta);
    Ok(())
}

fn print_meta(meta: &SkillMeta) {
    println!();
    println!(
        "  {} {}",
        style(&meta.name).cyan().bold(),
        style(format!("v{}", meta.version)).dim()
    );
    if !meta.description.is_empty() {
        println!("  {}", meta.description);
    }
    println!();
    println!("  Signature: {}", style(meta.signature()).yellow());
    if !meta.parameters.is_empty() {
        println!("  Parameters:");
        for param in &meta.parameters {
            println!("    - {}: {}", param.name, param.param_type);
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run `name` and print the outcome. Returns whether the run succeeded.
pub fn handle_run(
    name: &str,
    args: &str,
    max_depth: Option<usize>,
    state: &AppState,
    json: bool,
) -> Result<bool> {
    let kwargs = parse_kwargs(args)?;
    let max_depth = resolve_max_depth(state.engine.config(), max_depth);

    let response = RunResponse::from(state.engine.run_with_max_depth(name, kwargs, max_depth));
    let success = response.success;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(success);
    }

    println!();
    match &response.result {
        Some(output) => {
            println!("  {} {}", style("*").green().bold(), style(name).cyan());
            println!();
            for line in serde_json::to_string_pretty(output)?.lines() {
                println!("  {line}");
            }
        }
        None => {
            println!(
                "  {} {}",
                style("x").red().bold(),
                response.error.as_deref().unwrap_or("run failed")
            );
            if let Some(kind) = &response.kind {
                println!("  Kind:  {}", style(kind).yellow());
            }
            if !response.call_chain.is_empty() {
                println!("  Chain: {}", response.call_chain.join(" -> "));
            }
        }
    }
    println!();

    Ok(success)
}

/// Parse `--args` into keyword arguments. Must be a JSON object.
fn parse_kwargs(args: &str) -> Result<Kwargs> {
    let value: Value = serde_json::from_str(args).context("--args is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("--args must be a JSON object, got {other}"),
    }
}
