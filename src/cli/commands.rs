//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use num_bigint::BigInt;
use tracing::{debug, instrument};

use crate::application::services::{calkin_wilf, descendants_of, numeric_sequence, Navigator};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::codec::{matrix_of, path_len};
use crate::domain::{decode, encode, Node};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::{QuotientSource, Sqrt};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `sbtree --help`".to_string(),
        ));
    };

    // needs neither settings nor a navigator
    match command {
        Commands::Completion { shell } => return completion(*shell),
        Commands::Encode { node, limit } => return cmd_encode(node, *limit),
        Commands::Decode { path, matrix } => return cmd_decode(path, *matrix),
        Commands::Diatomic { count, fractions } => return cmd_diatomic(*count, *fractions),
        Commands::Descendants {
            first,
            second,
            depth,
            lenient,
        } => return cmd_descendants(first, second, *depth, !*lenient),
        _ => {}
    }

    let container = ServiceContainer::new(load_settings(cli)?);
    match command {
        Commands::Config { command } => cmd_config(&container.settings, command),
        Commands::Path { node } => cmd_path(&container.navigator()?, node),
        Commands::Parents { node } => cmd_parents(&container.navigator()?, node),
        Commands::Common { first, second } => {
            cmd_common(&container.navigator()?, first, second)
        }
        Commands::Sequence { depth } => cmd_sequence(&container.navigator()?, *depth),
        Commands::Tree { depth, render } => cmd_tree(&container.navigator()?, *depth, *render),
        Commands::Walk { value, sqrt, limit } => cmd_walk(
            &container.navigator()?,
            value.as_deref(),
            *sqrt,
            limit.unwrap_or(container.settings.walk_limit),
        ),
        Commands::Neighbors { node, range } => cmd_neighbors(
            &container.navigator()?,
            node,
            range.or(container.settings.search_range),
        ),
        Commands::Completion { .. }
        | Commands::Encode { .. }
        | Commands::Decode { .. }
        | Commands::Diatomic { .. }
        | Commands::Descendants { .. } => Ok(()),
    }
}

/// Settings from the config layers, with `--tree` on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(tree) = &cli.tree {
        settings.tree = tree.clone();
    }
    debug!(?settings, "settings");
    Ok(settings)
}

fn parse_node(raw: &str) -> CliResult<Node> {
    raw.parse()
        .map_err(|e| CliError::InvalidArgs(format!("{raw}: {e}")))
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[instrument(level = "debug", skip(nav))]
fn cmd_path(nav: &Navigator, node: &str) -> CliResult<()> {
    let target = parse_node(node)?;
    let path = nav.path_to(&target)?;
    let boundaries = if path.len() == 1 { 0 } else { 2 };
    output::nodes(&path, boundaries);
    output::action("depth", &path.len().saturating_sub(boundaries));
    Ok(())
}

#[instrument(level = "debug", skip(nav))]
fn cmd_parents(nav: &Navigator, node: &str) -> CliResult<()> {
    let target = parse_node(node)?;
    match nav.parents_of(&target)? {
        Some((low, high)) => output::info(&format!("{low} {high}")),
        None => output::warning(&format!("{target} is a boundary and has no parents")),
    }
    Ok(())
}

#[instrument(level = "debug", skip(nav))]
fn cmd_common(nav: &Navigator, first: &str, second: &str) -> CliResult<()> {
    let common = nav.common_ancestors(&parse_node(first)?, &parse_node(second)?)?;
    output::info(&output::join_nodes(&common));
    Ok(())
}

fn cmd_encode(node: &str, limit: Option<usize>) -> CliResult<()> {
    let target = parse_node(node)?;
    match encode(&target, limit) {
        Some(path) if path.is_empty() => output::info("(root)"),
        Some(path) => {
            output::info(&path);
            if let Some(len) = path_len(&target) {
                debug!(%len, "full path length");
            }
        }
        None => {
            return Err(CliError::InvalidArgs(format!(
                "{target} is a boundary and has no path"
            )))
        }
    }
    Ok(())
}

fn cmd_decode(path: &str, matrix: bool) -> CliResult<()> {
    output::info(&decode(path));
    if matrix {
        output::action("matrix", &matrix_of(path));
    }
    Ok(())
}

fn cmd_sequence(nav: &Navigator, depth: usize) -> CliResult<()> {
    output::nodes(&nav.sequence(depth), 0);
    Ok(())
}

fn cmd_descendants(first: &str, second: &str, depth: usize, strict: bool) -> CliResult<()> {
    let (p1, p2) = (parse_node(first)?, parse_node(second)?);
    let found = descendants_of(&p1, &p2, depth, strict);
    if found.is_empty() && strict {
        output::warning(&format!("{p1} and {p2} are not Farey neighbors"));
    }
    output::info(&output::join_nodes(&found));
    Ok(())
}

fn cmd_tree(nav: &Navigator, depth: usize, render: bool) -> CliResult<()> {
    if render {
        output::header(nav.config());
        output::info(&nav.subtree(depth).to_tree_string());
        return Ok(());
    }
    for (level, row) in nav.tree(depth).iter().enumerate() {
        output::info(&format!("{level:>3}: {}", output::join_nodes(row)));
    }
    Ok(())
}

#[instrument(level = "debug", skip(nav))]
fn cmd_walk(nav: &Navigator, value: Option<&str>, sqrt: Option<u64>, limit: usize) -> CliResult<()> {
    let (expansion, target) = match (value, sqrt) {
        (_, Some(n)) => (Sqrt(BigInt::from(n)).expansion(limit)?, None),
        (Some(raw), None) => match raw.parse::<Node>() {
            Ok(node) => (node.expansion(limit)?, Some(node)),
            Err(_) => {
                let x: f64 = raw
                    .parse()
                    .map_err(|_| CliError::InvalidArgs(format!("not a number: {raw}")))?;
                (x.expansion(limit)?, None)
            }
        },
        (None, None) => {
            return Err(CliError::Usage("walk needs a value or --sqrt".to_string()))
        }
    };
    debug!(a0 = %expansion.integer_part, quotients = expansion.quotients.len(), "expansion");

    let walk = nav.quotient_walk(
        &expansion.integer_part,
        &expansion.quotients,
        target.as_ref(),
        limit,
    )?;
    output::nodes(&walk, 2.min(walk.len()));
    if let Some(last) = walk.last() {
        output::action("approx", &format!("{last} ≈ {:.12}", last.approximate()));
    }
    Ok(())
}

#[instrument(level = "debug", skip(nav))]
fn cmd_neighbors(nav: &Navigator, node: &str, range: Option<u64>) -> CliResult<()> {
    let target = parse_node(node)?;
    output::info(&output::join_nodes(&nav.neighbors_of(&target, range)));
    Ok(())
}

fn cmd_diatomic(count: usize, fractions: bool) -> CliResult<()> {
    if fractions {
        output::info(&output::join_nodes(&calkin_wilf().take(count).collect::<Vec<_>>()));
    } else {
        let terms: Vec<String> = numeric_sequence().take(count).map(|t| t.to_string()).collect();
        output::info(&terms.join(" "));
    }
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let config = settings.tree_config()?;
            output::header(&format!("tree {config}"));
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let state = if path.exists() { "exists" } else { "not created" };
                output::info(&path.display());
                output::detail(&state);
            }
            None => output::warning("no config directory on this platform"),
        },
    }
    Ok(())
}
