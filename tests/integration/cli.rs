//! Integration tests for the `variant-matrix` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use tokio::fs;
use variant_matrix::test_utils::{ProductFixture, sample_product};

/// A command isolated from any user configuration.
fn variant_matrix(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("variant-matrix").unwrap();
    cmd.current_dir(dir.path())
        .env("VARIANT_MATRIX_CONFIG", dir.path().join("no-config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

async fn write_product(dir: &TempDir, variants: usize) {
    let product = serde_json::to_string_pretty(&sample_product(variants)).unwrap();
    fs::write(dir.path().join("tee.json"), product).await.unwrap();
}

#[tokio::test]
async fn test_render_html() {
    let temp = TempDir::new().unwrap();
    write_product(&temp, 2).await;

    variant_matrix(&temp)
        .args(["render", "tee.json", "--namespace", "fields"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id=\"fields-variants\""))
        .stdout(predicate::str::contains("data-id=\"102\""))
        .stdout(predicate::str::contains("new Craft.Commerce.VariantMatrix(\"fields-variants\""));
}

#[tokio::test]
async fn test_render_json() {
    let temp = TempDir::new().unwrap();
    let product = ProductFixture::new("Tee").field("color", "plain_text").variants(1);
    fs::write(temp.path().join("tee.json"), product.to_json()).await.unwrap();

    let output = variant_matrix(&temp)
        .args(["render", "tee.json", "--format", "json", "--name", "skus"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["html"].as_str().unwrap().contains("id=\"skus\""));
    assert!(value["head"].as_str().unwrap().contains("VariantMatrix.js"));
    assert!(value["foot"].as_str().unwrap().contains("skus[__VARIANT__]"));
    assert_eq!(value["translations"]["commerce"].as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn test_render_toml_product() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("mug.toml"),
        r#"
title = "Mug"

[product_type]
name = "Kitchen"
handle = "kitchen"

[[product_type.variant_field_layout.entries]]
field = { handle = "glaze", name = "Glaze", field_type = "plain_text" }

[[variants]]
id = 5
sku = "MUG-1"
field_values = { glaze = "matte" }
"#,
    )
    .await
    .unwrap();

    variant_matrix(&temp)
        .args(["render", "mug.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name=\"variants[5][fields][glaze]\" value=\"matte\""));
}

#[tokio::test]
async fn test_config_file_supplies_defaults() {
    let temp = TempDir::new().unwrap();
    write_product(&temp, 0).await;
    fs::write(
        temp.path().join("matrix.toml"),
        "namespace = \"shop\"\njs_class = \"Shop.VariantMatrix\"\n",
    )
    .await
    .unwrap();

    variant_matrix(&temp)
        .args(["--config", "matrix.toml", "render", "tee.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id=\"shop-variants\""))
        .stdout(predicate::str::contains("new Shop.VariantMatrix(\"shop-variants\""));
}

#[tokio::test]
async fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    write_product(&temp, 0).await;
    fs::write(temp.path().join("matrix.toml"), "input_nmae = \"variants\"\n").await.unwrap();

    variant_matrix(&temp)
        .args(["--config", "matrix.toml", "render", "tee.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_missing_product_fails() {
    let temp = TempDir::new().unwrap();

    variant_matrix(&temp)
        .args(["render", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read product"));
}

#[tokio::test]
async fn test_unparsable_product_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("broken.json"), "{ \"title\": ").await.unwrap();

    variant_matrix(&temp)
        .args(["render", "broken.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid product definition"));
}

#[test]
fn test_templates_lists_builtins() {
    let temp = TempDir::new().unwrap();

    variant_matrix(&temp)
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("commerce/products/_variant_matrix.html"))
        .stdout(predicate::str::contains("commerce/products/_variant_matrix_fields.html"));
}

#[tokio::test]
async fn test_broken_template_override_fails() {
    let temp = TempDir::new().unwrap();
    write_product(&temp, 1).await;
    let overrides = temp.path().join("tpl/commerce/products");
    fs::create_dir_all(&overrides).await.unwrap();
    fs::write(overrides.join("_variant_matrix.html"), "{% for row in variants %}").await.unwrap();

    variant_matrix(&temp)
        .args(["render", "tee.json", "--templates", "tpl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to render template"));
}

#[tokio::test]
async fn test_render_rejects_empty_name() {
    let temp = TempDir::new().unwrap();
    write_product(&temp, 1).await;

    variant_matrix(&temp)
        .args(["render", "tee.json", "--namespace", "fields", "--name", ""])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid input name ''"));
}

#[tokio::test]
async fn test_render_rejects_bracketed_name() {
    let temp = TempDir::new().unwrap();
    write_product(&temp, 1).await;

    variant_matrix(&temp)
        .args(["render", "tee.json", "--name", "variants[0]"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid input name 'variants[0]'"))
        .stderr(predicate::str::contains("--namespace"));
}
