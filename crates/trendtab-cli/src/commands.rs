use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table as LayoutTable};
use tracing::{debug, info};

use trendtab_classify::{DirectionClassifier, VocabularyClassifier};
use trendtab_cli::ingest::{FeedSummary, feed};
use trendtab_cli::surface::TerminalSurface;
use trendtab_core::{Table, TableConfig};

use crate::cli::{ClassifyArgs, WatchArgs};

pub fn run_watch(args: &WatchArgs, colors: bool) -> Result<FeedSummary> {
    let config = build_config(args, colors)?;
    let mut table = Table::new(config).context("invalid table configuration")?;
    let reader = open_input(args.input.as_deref())?;
    let mut surface = TerminalSurface::stdout();
    let summary = feed(&mut table, reader, &mut surface)?;
    surface.finish().context("draw table")?;

    if let Some(path) = &args.csv {
        table
            .export_csv(path)
            .with_context(|| format!("export CSV to {}", path.display()))?;
        info!(path = %path.display(), "wrote CSV");
    }
    if let Some(path) = &args.txt {
        table
            .export_text(path)
            .with_context(|| format!("export text to {}", path.display()))?;
        info!(path = %path.display(), "wrote text table");
    }
    Ok(summary)
}

pub fn run_classify(args: &ClassifyArgs) -> Result<()> {
    let classifier = VocabularyClassifier::new();
    let mut table = LayoutTable::new();
    if args.explain {
        table.set_header(vec!["Column", "Direction", "Matches"]);
    } else {
        table.set_header(vec!["Column", "Direction"]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
    for name in &args.names {
        let direction = classifier.classify(name);
        let mut row = vec![Cell::new(name), Cell::new(direction.as_str())];
        if args.explain {
            let matches: Vec<String> = classifier
                .explain(name)
                .into_iter()
                .map(|found| format!("{} ({}, {})", found.term, found.direction, found.weight))
                .collect();
            row.push(Cell::new(if matches.is_empty() {
                "-".to_string()
            } else {
                matches.join(", ")
            }));
        }
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}

/// Layers command line flags over the optional configuration file.
pub fn build_config(args: &WatchArgs, colors: bool) -> Result<TableConfig> {
    let mut config = match &args.config {
        Some(path) => TableConfig::load(path)
            .with_context(|| format!("load configuration {}", path.display()))?,
        None => TableConfig::default(),
    };
    if let Some(style) = args.style {
        config.style = style.into();
    }
    if args.no_timestamp {
        config.auto_timestamp = None;
    } else if let Some(format) = &args.timestamp_format {
        config.auto_timestamp = Some(format.clone());
    }
    if args.show_delta {
        config.show_percentage_delta = true;
    }
    if args.no_highlight {
        config.highlight_extremes = false;
    }
    for (name, format) in &args.formats {
        config.cell_formats.insert(name.clone(), format.clone());
    }
    for (name, keyword) in &args.directions {
        config.directions.insert(name.clone(), keyword.clone());
    }
    for name in &args.averages {
        config = config.with_moving_average(name.clone());
    }
    if let Some(window) = args.average_window {
        config.moving_average_window = window;
    }
    config.colors = config.colors && colors;
    debug!(?config, "table configuration");
    Ok(config)
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}
