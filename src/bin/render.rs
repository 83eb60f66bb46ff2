//! Render the sidebar for one page and print its markup
//!
//! ```text
//! sidebar-render [--tree FILE] [--config FILE] [--location URL]
//!                [--path-to-root P] [--stored-scroll N] [--fold-level N]
//! ```

use anyhow::{bail, Context};
use book_sidebar::links::validate_path_to_root;
use book_sidebar::prelude::*;
use book_sidebar::store::record_scroll;

#[derive(Debug, Default)]
struct Args {
    tree: Option<String>,
    config: Option<String>,
    location: Option<String>,
    path_to_root: String,
    stored_scroll: Option<f64>,
    fold_level: Option<usize>,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut args = Args::default();
    while let Some(flag) = raw.next() {
        let mut value = || raw.next().with_context(|| format!("{flag} expects a value"));
        match flag.as_str() {
            "--tree" => args.tree = Some(value()?),
            "--config" => args.config = Some(value()?),
            "--location" => args.location = Some(value()?),
            "--path-to-root" => args.path_to_root = value()?,
            "--stored-scroll" => {
                let offset = value()?;
                args.stored_scroll = Some(
                    offset
                        .parse()
                        .with_context(|| format!("--stored-scroll: '{offset}' is not a number"))?,
                );
            }
            "--fold-level" => {
                let level = value()?;
                args.fold_level = Some(
                    level
                        .parse()
                        .with_context(|| format!("--fold-level: '{level}' is not a depth"))?,
                );
            }
            other => bail!("unknown argument '{other}'"),
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1))?;

    let tree = match &args.tree {
        Some(path) => NavigationTree::from_file(path)
            .with_context(|| format!("failed to load navigation tree from {path}"))?,
        None => NavigationTree::book(),
    };

    let mut config = match &args.config {
        Some(path) => SidebarConfig::from_file(path)
            .with_context(|| format!("failed to load sidebar config from {path}"))?,
        None => SidebarConfig::default(),
    }
    .with_env_overrides()?;
    if let Some(level) = args.fold_level {
        config = config.with_folding(level);
    }

    validate_path_to_root(&args.path_to_root)?;

    let mut store = MemoryStore::new();
    if let Some(offset) = args.stored_scroll {
        record_scroll(&mut store, &config.storage_key, offset);
    }

    let page = PageContext {
        location: args.location.clone(),
        path_to_root: args.path_to_root.clone(),
    };
    let navigator = SidebarNavigator::new(tree, config);
    let mut panel = PanelState::default();
    let sidebar = navigator.attach(&page, &mut store, &mut panel);

    match sidebar.active() {
        Some(link) => {
            let item = sidebar.document().parent(link);
            let label = item.and_then(|item| sidebar.label(item)).unwrap_or_default();
            log::info!(
                "Active entry: {} ({})",
                label,
                sidebar.active_href().unwrap_or_default()
            );
        }
        None => log::info!("No entry matches {:?}", args.location),
    }
    log::info!("Scroll: {:?}", sidebar.scroll_outcome());
    log::info!(
        "{} links, {} expanded sections",
        sidebar.links().len(),
        sidebar.expanded_items().len()
    );

    println!("{}", sidebar.html());
    Ok(())
}
