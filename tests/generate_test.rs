use stampede::StampedeError;
use stampede::commands::{GenerateParams, execute_generate};
use stampede::config::ProjectConfig;
use stampede::generator::{K6Generator, ScriptGenerator};
use stampede::loader::load_features;
use stampede::metadata::extract_metadata;
use std::fs;
use tempfile::TempDir;

const USERS_FEATURE: &str = r#"@load @vus:5
Feature: User API

  Background:
    Given the base URL is "https://api.example.com"

  @smoke
  Scenario: Fetch a user
    When I make a GET request to "/users/1"
    Then the response status should be "200"

  @vus:20 @threshold:http_req_duration=p(95)<500
  Scenario Outline: Fetch user by id
    When I make a GET request to "/users/<id>"
    Then the response status should be "<status>"

    Examples:
      | id | status |
      | 1  | 200    |
      | 99 | 404    |
"#;

const CHECKOUT_FEATURE: &str = r#"Feature: Checkout

  @duration:2m
  Scenario: Place an order
    When I make a POST request to "/orders"
      | item  | quantity |
      | shoes | 2        |
"#;

fn write_features(dir: &TempDir) -> String {
    let features_dir = dir.path().join("features");
    fs::create_dir_all(&features_dir).unwrap();
    fs::write(features_dir.join("users.feature"), USERS_FEATURE).unwrap();
    fs::write(features_dir.join("checkout.feature"), CHECKOUT_FEATURE).unwrap();
    features_dir.display().to_string()
}

fn generate_from(features_dir: &str) -> String {
    let documents = load_features(features_dir).unwrap();
    let scenarios: Vec<_> = documents
        .into_iter()
        .flat_map(|document| document.scenarios)
        .collect();
    let metadata = extract_metadata(&scenarios);

    K6Generator::new()
        .generate(&scenarios, &metadata, &ProjectConfig::default())
        .unwrap()
}

#[test]
fn generates_one_script_for_a_whole_directory() {
    let dir = TempDir::new().unwrap();
    let features_dir = write_features(&dir);

    let script = generate_from(&features_dir);

    // both files contribute scenarios to the same script
    assert!(script.contains("group(\"Fetch a user - init\", () => {"));
    assert!(script.contains("group(\"Place an order - init\", () => {"));
}

#[test]
fn outline_rows_expand_with_background_prepended() {
    let dir = TempDir::new().unwrap();
    let features_dir = write_features(&dir);

    let documents = load_features(&features_dir).unwrap();
    let users = documents
        .iter()
        .find(|d| d.path.ends_with("users.feature"))
        .unwrap();

    // 1 plain scenario + 2 outline rows
    assert_eq!(users.scenarios.len(), 3);

    let row_names: Vec<_> = users
        .scenarios
        .iter()
        .filter(|s| s.name.starts_with("Fetch user by id"))
        .map(|s| s.name.clone())
        .collect();
    assert_eq!(
        row_names,
        vec!["Fetch user by id (Row 1)", "Fetch user by id (Row 2)"]
    );

    for scenario in &users.scenarios {
        assert_eq!(
            scenario.steps[0].text,
            r#"the base URL is "https://api.example.com""#
        );
    }
}

#[test]
fn vus_merge_is_most_demanding_wins() {
    let dir = TempDir::new().unwrap();
    let features_dir = write_features(&dir);

    let script = generate_from(&features_dir);

    // @vus:5 at feature level, @vus:20 on the outline: 20 wins
    assert!(script.contains("\"vus\": 20"));
    // last declared duration wins over the default
    assert!(script.contains("\"duration\": \"2m\""));
}

#[test]
fn thresholds_survive_into_the_options_object() {
    let dir = TempDir::new().unwrap();
    let features_dir = write_features(&dir);

    let script = generate_from(&features_dir);

    assert!(script.contains("\"http_req_duration\": ["));
    assert!(script.contains("p(95)<500"));
}

#[test]
fn identical_step_sentences_share_one_identifier() {
    let dir = TempDir::new().unwrap();
    let features_dir = write_features(&dir);

    let script = generate_from(&features_dir);

    // the same derived call appears for /users/1 and /users/99
    assert!(script.contains("steps.iMakeAGetRequestTo(\"/users/1\");"));
    assert!(script.contains("steps.iMakeAGetRequestTo(\"/users/99\");"));
    assert!(!script.contains("steps.iMakeAGetRequestToUsers1"));
}

#[test]
fn data_table_rows_become_keyed_objects() {
    let dir = TempDir::new().unwrap();
    let features_dir = write_features(&dir);

    let script = generate_from(&features_dir);

    assert!(script.contains(
        r#"steps.iMakeAPostRequestTo("/orders", [{"item":"shoes","quantity":"2"}]);"#
    ));
}

#[test]
fn empty_features_directory_fails_instead_of_emitting_an_empty_script() {
    let dir = TempDir::new().unwrap();
    let empty = dir.path().join("features");
    fs::create_dir_all(&empty).unwrap();

    let result = load_features(empty.to_str().unwrap());
    assert!(matches!(result, Err(StampedeError::NoFeaturesFound(_))));
}

#[test]
fn generate_command_writes_script_into_output_dir() {
    let dir = TempDir::new().unwrap();
    let features_dir = write_features(&dir);
    let output_dir = dir.path().join("generated");

    let params = GenerateParams {
        features: Some(features_dir),
        output: Some(output_dir.display().to_string()),
        ..Default::default()
    };
    execute_generate(&params).unwrap();

    let script = fs::read_to_string(output_dir.join("test.generated.ts")).unwrap();
    assert!(script.contains("export const options = {"));
    assert!(script.contains("export default async function () {"));
    assert!(script.contains("export function teardown(data: Record<string, any>) {"));
    assert!(script.contains("export function handleSummary(data: any): Record<string, any> {"));
}

#[test]
fn malformed_feature_file_aborts_with_its_path() {
    let dir = TempDir::new().unwrap();
    let features_dir = dir.path().join("features");
    fs::create_dir_all(&features_dir).unwrap();
    fs::write(
        features_dir.join("broken.feature"),
        "Scenario: no feature header\n  When something\n",
    )
    .unwrap();

    let result = load_features(features_dir.to_str().unwrap());
    match result {
        Err(StampedeError::FeatureParse { path, .. }) => {
            assert!(path.ends_with("broken.feature"));
        }
        other => panic!("expected a parse error, got {:?}", other.is_ok()),
    }
}
