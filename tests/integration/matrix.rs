//! Matrix shell and end-to-end rendering.

use variant_matrix::constants::MATRIX_TRANSLATIONS;
use variant_matrix::matrix::MatrixRenderer;
use variant_matrix::test_utils::{ProductFixture, sample_product};
use variant_matrix::view::PageContext;

use crate::common::{Harness, bootstrap_args, row_count, row_ids};

#[test]
fn test_one_row_per_variant_in_order() {
    let harness = Harness::new(None);
    let renderer = MatrixRenderer::new(&harness.view, &harness.registry, &harness.settings);

    for count in [0, 1, 5] {
        let product = sample_product(count);
        let mut page = PageContext::new();
        let html = renderer.render_matrix(&product, &mut page).unwrap();

        assert_eq!(row_count(&html), count);
        let expected: Vec<String> = (1..=count).map(|n| (100 + n).to_string()).collect();
        assert_eq!(row_ids(&html), expected);
    }
}

#[test]
fn test_unsaved_variants_keep_their_order() {
    let harness = Harness::new(None);
    let product = ProductFixture::new("Mug")
        .variant(Some(9), "MUG-L")
        .variant(None, "MUG-XL")
        .variant(Some(3), "MUG-S")
        .build();

    let mut page = PageContext::new();
    let html = MatrixRenderer::new(&harness.view, &harness.registry, &harness.settings)
        .render_matrix(&product, &mut page)
        .unwrap();

    assert_eq!(row_ids(&html), ["9", "new2", "3"]);
    assert!(html.contains("name=\"variants[new2][sku]\" value=\"MUG-XL\""));
}

#[test]
fn test_end_to_end_three_variants_in_namespace() {
    let harness = Harness::new(Some("fields"));
    let product = sample_product(3);
    let mut page = PageContext::new();

    let html = MatrixRenderer::new(&harness.view, &harness.registry, &harness.settings)
        .render_matrix(&product, &mut page)
        .unwrap();

    assert!(html.starts_with("<div id=\"fields-variants\""));
    assert!(html.contains("data-name=\"fields[variants]\""));
    assert_eq!(row_count(&html), 3);
    assert!(html.contains("name=\"fields[variants][101][fields][color]\" value=\"\""));
    assert!(html.contains("name=\"fields[variants][103][isDefault]\" value=\"\""));
    assert!(html.contains("name=\"fields[variants][101][isDefault]\" value=\"1\""));

    let statements = page.scripts().statements();
    assert_eq!(statements.len(), 4, "three row date pickers plus the bootstrap");
    assert!(statements[0].contains("$(\"#fields-variants-101-fields-release\")"));
    assert!(statements[2].contains("$(\"#fields-variants-103-fields-release\")"));

    let bootstrap = &statements[3];
    assert!(bootstrap.starts_with("new Craft.Commerce.VariantMatrix(\"fields-variants\", "));
    assert!(bootstrap.ends_with(", \"fields[variants]\");"));

    let args = bootstrap_args(bootstrap);
    assert_eq!(args[0], "fields-variants");
    assert_eq!(args[3], "fields[variants]");
    assert!(args[1].contains("name=\"fields[variants][__VARIANT__][fields][color]\" value=\"black\""));
    assert!(!args[1].contains("data-handle=\"legacy\""));
    assert!(args[2].starts_with("<script type=\"text/javascript\">"));
    assert!(args[2].contains("$(\"#fields-variants-__VARIANT__-fields-release\")"));

    assert_eq!(page.js_resources(), ["commerce/js/VariantMatrix.js"]);
    assert_eq!(page.translations()["commerce"], MATRIX_TRANSLATIONS);
}

#[test]
fn test_end_to_end_no_variants_in_namespace() {
    let harness = Harness::new(Some("fields"));
    let product = sample_product(0);
    let mut page = PageContext::new();

    let html = MatrixRenderer::new(&harness.view, &harness.registry, &harness.settings)
        .render_matrix(&product, &mut page)
        .unwrap();

    assert!(html.contains("id=\"fields-variants\""));
    assert_eq!(row_count(&html), 0);
    assert!(html.contains("Add a variant"));

    let statements = page.scripts().statements();
    assert_eq!(statements.len(), 1);
    let args = bootstrap_args(&statements[0]);
    assert_eq!(args[0], "fields-variants");
    assert!(args[1].contains("fields[variants][__VARIANT__][sku]"));
    assert!(!args[2].is_empty());
}

#[test]
fn test_custom_input_name() {
    let harness = Harness::new(Some("fields"));
    let product = sample_product(1);
    let mut page = PageContext::new();

    let html = MatrixRenderer::new(&harness.view, &harness.registry, &harness.settings)
        .render_matrix_named(&product, "skus", &mut page)
        .unwrap();

    assert!(html.contains("id=\"fields-skus\""));
    assert!(html.contains("name=\"fields[skus][101][sku]\""));
    let args = bootstrap_args(page.scripts().statements().last().unwrap());
    assert_eq!(args[0], "fields-skus");
    assert_eq!(args[3], "fields[skus]");
    assert!(args[1].contains("fields[skus][__VARIANT__][sku]"));
}

#[test]
fn test_rendering_twice_repeats_resources_once() {
    let harness = Harness::new(None);
    let renderer = MatrixRenderer::new(&harness.view, &harness.registry, &harness.settings);
    let mut page = PageContext::new();

    renderer.render_matrix(&sample_product(0), &mut page).unwrap();
    renderer.render_matrix(&sample_product(0), &mut page).unwrap();

    assert_eq!(page.js_resources().len(), 1);
    assert_eq!(page.translations()["commerce"].len(), MATRIX_TRANSLATIONS.len());
    assert_eq!(page.scripts().len(), 2);
}
