use std::path::PathBuf;
use std::sync::Once;

use lazy_static::lazy_static;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::normalization::{
    config::NormalizerConfig, error::NormalizationError, normalize_str_with_config,
};
use crate::printer::canonical_print;
use crate::schema::SchemaIndex;

fn init_test_logger_internal() {
    let tree_layer = tracing_tree::HierarchicalLayer::new(2)
        .with_bracketed_fields(true)
        .with_deferred_spans(false)
        .with_wraparound(25)
        .with_indent_lines(true)
        .with_timer(tracing_tree::time::Uptime::default())
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_targets(false);

    tracing_subscriber::registry()
        .with(tree_layer)
        .with(EnvFilter::from_default_env())
        .init();
}

lazy_static! {
    static ref TRACING_INIT: Once = Once::new();
    static ref SOCIAL_SCHEMA: SchemaIndex =
        SchemaIndex::from_sdl(&read_fixture("fixture/social.graphql"))
            .expect("fixture schema to parse");
}

pub fn init_logger() {
    TRACING_INIT.call_once(|| {
        init_test_logger_internal();
    });
}

pub fn read_fixture(fixture_path: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(fixture_path);
    std::fs::read_to_string(path).expect("Unable to read fixture file")
}

pub fn social_schema() -> &'static SchemaIndex {
    &SOCIAL_SCHEMA
}

/// Normalizes against the social fixture schema and prints canonically.
pub fn normalize_and_print(source: &str) -> Result<String, NormalizationError> {
    normalize_and_print_with(source, &NormalizerConfig::default())
}

pub fn normalize_and_print_with(
    source: &str,
    config: &NormalizerConfig,
) -> Result<String, NormalizationError> {
    init_logger();
    normalize_str_with_config(source, social_schema(), config)
        .map(|document| canonical_print(&document))
}
