use std::env;
use std::error::Error;
use std::process;

use graphql_normalizer::ast::Document;
use graphql_normalizer::hash::operation_hash_hex;
use graphql_normalizer::normalization::{config::NormalizerConfig, normalize_str_with_config};
use graphql_normalizer::printer::{canonical_print, canonical_print_str};
use graphql_normalizer::schema::SchemaIndex;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "Usage: normalizer-dev-cli <command> [--config <config.json>] [...]

Commands:
  normalize <schema_path> <operation_path>   print the normalized operation
  hash <schema_path> <operation_path>        print the normalized operation and its hash
  pretty <schema_path> <operation_path>      print the normalized operation, indented
  print <operation_path>                     print the operation without normalizing it
  config-schema                              print the JSON schema of the config file";

fn main() {
    let tree_layer = tracing_tree::HierarchicalLayer::new(2)
        .with_bracketed_fields(true)
        .with_deferred_spans(false)
        .with_wraparound(25)
        .with_indent_lines(true)
        .with_timer(tracing_tree::time::Uptime::default())
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_targets(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tree_layer)
        .with(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    if let Err(error) = run(args) {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let (config_path, args) = split_config_flag(args)?;
    let config = match config_path {
        Some(path) => NormalizerConfig::from_json_str(&read_file(&path)?)?,
        None => NormalizerConfig::default(),
    };
    debug!(?config, "loaded config");

    let Some(command) = args.first() else {
        return Err(USAGE.into());
    };

    match (command.as_str(), &args[1..]) {
        ("normalize", [schema_path, operation_path]) => {
            let document = normalize_files(schema_path, operation_path, &config)?;
            println!("{}", canonical_print(&document));
        }
        ("hash", [schema_path, operation_path]) => {
            let document = normalize_files(schema_path, operation_path, &config)?;
            println!("{}", canonical_print(&document));
            println!("{}", operation_hash_hex(&document));
        }
        ("pretty", [schema_path, operation_path]) => {
            let document = normalize_files(schema_path, operation_path, &config)?;
            print!("{}", document.pretty());
        }
        ("print", [operation_path]) => {
            println!("{}", canonical_print_str(&read_file(operation_path)?)?);
        }
        ("config-schema", []) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&NormalizerConfig::json_schema())?
            );
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

fn split_config_flag(args: Vec<String>) -> Result<(Option<String>, Vec<String>), Box<dyn Error>> {
    let mut config_path = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args.next().ok_or("--config expects a path")?;
            config_path = Some(path);
        } else {
            rest.push(arg);
        }
    }

    Ok((config_path, rest))
}

fn normalize_files(
    schema_path: &str,
    operation_path: &str,
    config: &NormalizerConfig,
) -> Result<Document, Box<dyn Error>> {
    let schema = SchemaIndex::from_sdl(&read_file(schema_path)?)?;
    let source = read_file(operation_path)?;
    Ok(normalize_str_with_config(&source, &schema, config)?)
}

fn read_file(path: &str) -> Result<String, Box<dyn Error>> {
    std::fs::read_to_string(path).map_err(|error| format!("Unable to read {path}: {error}").into())
}
