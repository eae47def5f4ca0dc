// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of procviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! procviz CLI entrypoint.
//!
//! Reads a process document (file or stdin), runs the pipeline and prints the
//! positioned graph as JSON on stdout. Diagnostics go to stderr; set `RUST_LOG`
//! (e.g. `RUST_LOG=procviz=debug`) to see per-stage logs.

use std::error::Error;
use std::io::{Read, Write};

use procviz::layout::{LayoutConfig, PositionedGraph};
use procviz::pipeline::{read_process, visualize};
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<file>|-] [--config <layout.json>] [--spacing-x <n>] [--row-height <n>] [--axis-x <n>] [--emit graph|model|layers]\n  {program} --schema\n\nReads stdin when <file> is omitted or '-'.\n--config loads a JSON layout config ({{\"axisX\", \"originY\", \"spacingX\", \"rowHeight\"}}); flags override it.\n--emit graph (default) prints the positioned graph as JSON, model the extracted process model, layers one line per layer.\n--schema prints the JSON Schema of the positioned graph."
    );
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Emit {
    #[default]
    Graph,
    Model,
    Layers,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct CliOptions {
    input: Option<String>,
    config_path: Option<String>,
    spacing_x: Option<f64>,
    row_height: Option<f64>,
    axis_x: Option<f64>,
    emit: Option<Emit>,
    schema: bool,
}

fn parse_number(raw: Option<String>) -> Result<f64, ()> {
    let value: f64 = raw.ok_or(())?.parse().map_err(|_| ())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(())
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value);
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => set_once(&mut options.config_path, args.next().ok_or(())?)?,
            "--spacing-x" => set_once(&mut options.spacing_x, parse_number(args.next())?)?,
            "--row-height" => set_once(&mut options.row_height, parse_number(args.next())?)?,
            "--axis-x" => set_once(&mut options.axis_x, parse_number(args.next())?)?,
            "--emit" => {
                let emit = match args.next().ok_or(())?.as_str() {
                    "graph" => Emit::Graph,
                    "model" => Emit::Model,
                    "layers" => Emit::Layers,
                    _ => return Err(()),
                };
                set_once(&mut options.emit, emit)?;
            }
            "--schema" => {
                if options.schema {
                    return Err(());
                }
                options.schema = true;
            }
            "-" => set_once(&mut options.input, arg)?,
            _ if arg.starts_with('-') => return Err(()),
            _ => set_once(&mut options.input, arg)?,
        }
    }

    if options.schema && options != (CliOptions { schema: true, ..CliOptions::default() }) {
        return Err(());
    }

    Ok(options)
}

fn load_config(options: &CliOptions) -> Result<LayoutConfig, Box<dyn Error>> {
    let mut config = match &options.config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| format!("failed to read config {path}: {err}"))?;
            serde_json::from_str::<LayoutConfig>(&raw)
                .map_err(|err| format!("invalid config {path}: {err}"))?
        }
        None => LayoutConfig::default(),
    };
    if let Some(spacing_x) = options.spacing_x {
        config.spacing_x = spacing_x;
    }
    if let Some(row_height) = options.row_height {
        config.row_height = row_height;
    }
    if let Some(axis_x) = options.axis_x {
        config.axis_x = axis_x;
    }
    Ok(config)
}

fn read_input(input: Option<&str>) -> Result<String, Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => Ok(std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read {path}: {err}"))?),
    }
}

fn write_layers(out: &mut impl Write, graph: &PositionedGraph) -> std::io::Result<()> {
    for (layer, ids) in graph.layers().iter().enumerate() {
        let ids = ids.iter().map(|id| id.as_str()).collect::<Vec<_>>();
        writeln!(out, "{layer}: {}", ids.join(", "))?;
    }
    Ok(())
}

fn run(options: CliOptions) -> Result<(), Box<dyn Error>> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if options.schema {
        let schema = schemars::schema_for!(PositionedGraph);
        serde_json::to_writer_pretty(&mut out, &schema)?;
        writeln!(out)?;
        return Ok(());
    }

    let config = load_config(&options)?;
    let text = read_input(options.input.as_deref())?;

    match options.emit.unwrap_or_default() {
        Emit::Graph => {
            let graph = visualize(&text, &config)?;
            serde_json::to_writer_pretty(&mut out, &graph)?;
            writeln!(out)?;
        }
        Emit::Model => {
            let model = read_process(&text)?;
            serde_json::to_writer_pretty(&mut out, &model)?;
            writeln!(out)?;
        }
        Emit::Layers => write_layers(&mut out, &visualize(&text, &config)?)?,
    }
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("procviz=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() {
    init_tracing();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "procviz".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    if let Err(err) = run(options) {
        match err.downcast_ref::<procviz::pipeline::Error>() {
            Some(pipeline_err) => {
                eprintln!("procviz: {} error: {pipeline_err}", pipeline_err.kind());
            }
            None => eprintln!("procviz: {err}"),
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, write_layers, CliOptions, Emit};
    use procviz::layout::LayoutConfig;
    use procviz::pipeline::visualize;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values.iter().map(|v| (*v).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_input_and_layout_flags() {
        let options = parse_options(args(&[
            "process.edn",
            "--spacing-x",
            "300",
            "--row-height",
            "90.5",
            "--axis-x",
            "-40",
            "--emit",
            "layers",
        ]))
        .expect("parse options");
        assert_eq!(options.input.as_deref(), Some("process.edn"));
        assert_eq!(options.spacing_x, Some(300.0));
        assert_eq!(options.row_height, Some(90.5));
        assert_eq!(options.axis_x, Some(-40.0));
        assert_eq!(options.emit, Some(Emit::Layers));
    }

    #[test]
    fn parses_stdin_dash_and_config() {
        let options = parse_options(args(&["-", "--config", "layout.json"])).expect("parse options");
        assert_eq!(options.input.as_deref(), Some("-"));
        assert_eq!(options.config_path.as_deref(), Some("layout.json"));
    }

    #[test]
    fn rejects_bad_usage() {
        parse_options(args(&["--nope"])).unwrap_err();
        parse_options(args(&["a.edn", "b.edn"])).unwrap_err();
        parse_options(args(&["--spacing-x"])).unwrap_err();
        parse_options(args(&["--spacing-x", "wide"])).unwrap_err();
        parse_options(args(&["--spacing-x", "NaN"])).unwrap_err();
        parse_options(args(&["--emit", "svg"])).unwrap_err();
        parse_options(args(&["--emit", "graph", "--emit", "model"])).unwrap_err();
        parse_options(args(&["--schema", "a.edn"])).unwrap_err();
    }

    #[test]
    fn parses_schema_flag_alone() {
        let options = parse_options(args(&["--schema"])).expect("parse options");
        assert!(options.schema);
    }

    #[test]
    fn writes_one_line_per_layer() {
        let graph = visualize(
            "{:format :v3 :transitions [{:name :a :to :state/x} {:name :b :from :state/x :to :state/y}]}",
            &LayoutConfig::default(),
        )
        .expect("visualize");
        let mut out = Vec::new();
        write_layers(&mut out, &graph).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "0: start\n1: x\n2: y\n");
    }
}
