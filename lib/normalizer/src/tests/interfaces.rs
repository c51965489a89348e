use crate::normalization::{config::NormalizerConfig, error::NormalizationError};
use crate::tests::testkit::{normalize_and_print, normalize_and_print_with};

#[test]
fn leading_redundancy_inside_interface_fragments() -> Result<(), NormalizationError> {
    assert_eq!(
        normalize_and_print("{ profile(id: 4) { handle ... on User { handle name } } }")?,
        "{profile(id:4){handle ...on User{name}}}"
    );
    Ok(())
}

#[test]
fn union_parent_keeps_repeated_selections() -> Result<(), NormalizationError> {
    assert_eq!(
        normalize_and_print(
            r#"{ search(term: "a") { __typename ... on User { __typename name } } }"#
        )?,
        r#"{search(term:"a"){__typename ...on User{__typename name}}}"#
    );
    Ok(())
}

#[test]
fn object_parent_keeps_repeated_selections() -> Result<(), NormalizationError> {
    assert_eq!(
        normalize_and_print("{ user(id: 4) { handle ... on Profile { handle name } } }")?,
        "{user(id:4){handle ...on Profile{handle name}}}"
    );
    Ok(())
}

#[test]
fn nested_interfaces() -> Result<(), NormalizationError> {
    assert_eq!(
        normalize_and_print(
            r#"
            {
              node(id: "1") {
                id
                ... on Profile {
                  id
                  handle
                  ... on User { handle birthday }
                }
              }
            }
            "#
        )?,
        r#"{node(id:"1"){id ...on Profile{handle ...on User{birthday}}}}"#
    );
    Ok(())
}

#[test]
fn repeated_fragments_merge() -> Result<(), NormalizationError> {
    assert_eq!(
        normalize_and_print(
            "{ profile { ... on User { name } ... on Page { name } ... on User { name } } }"
        )?,
        "{profile{...on User{name}...on Page{name}}}"
    );
    Ok(())
}

#[test]
fn conditional_fragments_count_as_siblings() -> Result<(), NormalizationError> {
    assert_eq!(
        normalize_and_print(
            r#"
            query ($a: Boolean!) {
              profile {
                ... @include(if: $a) { handle }
                ... on User { ... @include(if: $a) { handle } name }
              }
            }
            "#
        )?,
        "query($a:Boolean!){profile{...@include(if:$a){handle}...on User{name}}}"
    );
    Ok(())
}

#[test]
fn fragment_emptied_by_redundancy_disappears() -> Result<(), NormalizationError> {
    assert_eq!(
        normalize_and_print("{ profile { handle name ... on Page { name handle } } }")?,
        "{profile{handle name}}"
    );
    Ok(())
}

#[test]
fn lagging_selections_with_config() -> Result<(), Box<dyn std::error::Error>> {
    let config = NormalizerConfig::from_json_str(r#"{ "hoist_lagging_selections": true }"#)?;
    let source = "{ profile(id: 4) { ... on User { name handle } handle } }";

    assert_eq!(
        normalize_and_print(source)?,
        "{profile(id:4){...on User{name handle}handle}}"
    );
    assert_eq!(
        normalize_and_print_with(source, &config)?,
        "{profile(id:4){...on User{name}handle}}"
    );
    assert_eq!(
        normalize_and_print_with("{ profile { ... on Page { handle likers { id } } handle } }", &config)?,
        "{profile{handle ...on Page{likers{id}}}}"
    );
    Ok(())
}
