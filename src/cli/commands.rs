//! Command dispatch and implementations

use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::share::{parse_share_url, share_url};
use crate::application::{DrilldownController, NavEvent};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{summarize_level, sort_by_value_desc, HierarchyModel, ModelBuilder, NodeKind};
use crate::format::{abbreviate_from, percent_label};

pub fn execute_command(cli: &Cli, settings: &Settings) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Show {
            file,
            at,
            filter,
            sort,
            share,
        }) => _show(file.as_deref(), at, filter, *sort, *share, settings),
        Some(Commands::Tree { file }) => _tree(file.as_deref(), settings),
        Some(Commands::Leaves { file }) => _leaves(file.as_deref(), settings),
        Some(Commands::Check { file }) => _check(file.as_deref(), settings),
        Some(Commands::Decode { url }) => _decode(url),
        Some(Commands::Config { command }) => _config(command, settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Resolve the document path: explicit argument wins, then config default.
fn resolve_document(file: Option<&Path>, settings: &Settings) -> CliResult<PathBuf> {
    file.map(Path::to_path_buf)
        .or_else(|| settings.hierarchy_file.clone())
        .ok_or_else(|| {
            CliError::Usage(
                "no hierarchy document given (pass FILE or set hierarchy_file in config)"
                    .to_string(),
            )
        })
}

fn load_model(file: Option<&Path>, settings: &Settings) -> CliResult<HierarchyModel> {
    let path = resolve_document(file, settings)?;
    debug!("loading hierarchy document: {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(|source| CliError::ReadDocument {
        path: path.clone(),
        source,
    })?;
    let model = ModelBuilder::from_json(&content)
        .map_err(crate::application::ApplicationError::from)?;
    Ok(model)
}

/// Parse a KEY=VALUE filter argument.
fn parse_filter_arg(arg: &str) -> CliResult<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(CliError::InvalidArgs(format!(
            "filter must be KEY=VALUE, got '{arg}'"
        ))),
    }
}

#[instrument(skip(settings))]
fn _show(
    file: Option<&Path>,
    at: &[String],
    filter: &[String],
    sort: bool,
    share: bool,
    settings: &Settings,
) -> CliResult<()> {
    let model = load_model(file, settings)?;
    let mut controller = DrilldownController::new(&model);

    for name in at {
        match controller.drill(name) {
            NavEvent::DrilledDown { .. } => {}
            NavEvent::FilterToggled { key, value } => {
                debug!(key = %key, value = ?value, "leaf selection toggled filter");
            }
            _ => {
                output::warning(&format!("'{name}' is not drillable at this level; ignoring"));
            }
        }
    }
    for arg in filter {
        let (key, value) = parse_filter_arg(arg)?;
        controller.toggle_filter(&key, &value);
    }

    output::breadcrumb(&controller.breadcrumb());

    let mut summary = summarize_level(&model, controller.current_level());
    if sort {
        sort_by_value_desc(&mut summary.entries);
    }
    for entry in &summary.entries {
        let bar_width = (entry.percentage / 100.0 * 30.0).round() as usize;
        output::level_row(
            &entry.name,
            &abbreviate_from(entry.value, settings.abbreviate_from),
            &percent_label(entry.percentage),
            bar_width,
        );
    }
    output::info(&format!(
        "total: {}",
        abbreviate_from(summary.total, settings.abbreviate_from)
    ));

    if !controller.filters().is_empty() {
        output::header("active filters");
        for (key, value) in controller.filters().iter() {
            output::detail(&format!("{key}={value}"));
        }
    }
    if share {
        let url = share_url(&settings.share_base_url, controller.filters())?;
        output::info(&url);
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _tree(file: Option<&Path>, settings: &Settings) -> CliResult<()> {
    let model = load_model(file, settings)?;
    for &root in model.roots() {
        println!("{}", subtree(&model, root));
    }
    Ok(())
}

fn subtree(model: &HierarchyModel, idx: generational_arena::Index) -> Tree<String> {
    let label = model
        .get_node(idx)
        .map(|node| match &node.data.kind {
            NodeKind::Leaf {
                filter_key,
                filter_value,
            } => format!("{} [{}={}]", node.data, filter_key, filter_value),
            _ => node.data.to_string(),
        })
        .unwrap_or_default();

    let leaves: Vec<_> = model
        .children_of(idx)
        .iter()
        .map(|&child| subtree(model, child))
        .collect();

    Tree::new(label).with_leaves(leaves)
}

#[instrument(skip(settings))]
fn _leaves(file: Option<&Path>, settings: &Settings) -> CliResult<()> {
    let model = load_model(file, settings)?;
    for idx in model.leaf_nodes() {
        if let Some(node) = model.get_node(idx) {
            if let NodeKind::Leaf {
                filter_key,
                filter_value,
            } = &node.data.kind
            {
                let trail = model.ancestry(idx).join(" > ");
                output::info(&format!("{trail}: {filter_key}={filter_value}"));
            }
        }
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _check(file: Option<&Path>, settings: &Settings) -> CliResult<()> {
    let path = resolve_document(file, settings)?;
    let model = load_model(file, settings)?;
    output::success(&format!(
        "{}: {} nodes, {} roots, depth {}",
        path.display(),
        model.node_count(),
        model.roots().len(),
        model.depth()
    ));
    Ok(())
}

#[instrument]
fn _decode(url: &str) -> CliResult<()> {
    let filters = parse_share_url(url)?;
    if filters.is_empty() {
        output::info("no filters");
        return Ok(());
    }
    for (key, value) in filters.iter() {
        output::info(&format!("{key}={value}"));
    }
    Ok(())
}

fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init => {
            let path = global_config_path().ok_or_else(|| CliError::Usage(
                "cannot determine config directory".to_string(),
            ))?;
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| CliError::Io {
                    context: format!("create {}", parent.display()),
                    source,
                })?;
            }
            std::fs::write(&path, Settings::template()).map_err(|source| CliError::Io {
                context: format!("write {}", path.display()),
                source,
            })?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::info("(no config directory)"),
            }
            Ok(())
        }
    }
}
