//! Reusable field HTML for new variant rows.

use tempfile::TempDir;
use variant_matrix::fields::FieldTypeRegistry;
use variant_matrix::matrix::{FieldHtmlBuilder, MatrixRenderer, MatrixSettings};
use variant_matrix::test_utils::{
    FailingFieldType, MarkerScriptFieldType, ProductFixture, RecordingFieldType, sample_product,
};
use variant_matrix::view::{PageContext, View};

use crate::common::{Harness, bootstrap_args};

#[test]
fn test_placeholder_namespace_is_exact() {
    let harness = Harness::new(None);
    let html = FieldHtmlBuilder::new(&harness.view, &harness.registry)
        .build_field_html(&sample_product(2), "variants")
        .unwrap();

    assert!(html.body_html.contains("name=\"variants[__VARIANT__][sku]\""));
    assert!(html.body_html.contains("name=\"variants[__VARIANT__][fields][color]\""));
    assert!(html.body_html.contains("id=\"variants-__VARIANT__-fields-color\""));
    assert!(!html.body_html.contains("variants[101]"));
}

#[test]
fn test_layout_order_preserved() {
    let harness = Harness::new(None);
    let product = ProductFixture::new("Tee")
        .field("weight", "number")
        .field("legacy", "disabled_plugin")
        .field("color", "plain_text")
        .field("active", "lightswitch")
        .build();

    let html = FieldHtmlBuilder::new(&harness.view, &harness.registry)
        .build_field_html(&product, "variants")
        .unwrap();

    let positions: Vec<usize> = ["weight", "color", "active"]
        .iter()
        .map(|handle| html.body_html.find(&format!("data-handle=\"{handle}\"")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(!html.body_html.contains("data-handle=\"legacy\""));
}

#[test]
fn test_all_unresolvable_fields_render_empty_section() {
    let harness = Harness::new(None);
    let product = ProductFixture::new("Tee")
        .field("legacy", "disabled_plugin")
        .field("other", "removed_plugin")
        .build();

    let html = FieldHtmlBuilder::new(&harness.view, &harness.registry)
        .build_field_html(&product, "variants")
        .unwrap();

    assert!(html.body_html.contains("<div class=\"custom-fields\">"));
    assert!(!html.body_html.contains("data-handle="));
    assert!(html.body_html.contains("name=\"variants[__VARIANT__][sku]\""));
    assert_eq!(html.foot_html, "");
}

#[test]
fn test_freshness_only_for_placeholder_row() {
    let recorder = RecordingFieldType::new("recorded");
    let harness = Harness::new(None).with_type(recorder.clone());
    let product = ProductFixture::new("Tee").field("note", "recorded").variants(2).build();
    let renderer = MatrixRenderer::new(&harness.view, &harness.registry, &harness.settings);

    renderer.render_matrix(&product, &mut PageContext::new()).unwrap();

    let calls = recorder.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].namespace, "variants[101]");
    assert_eq!(calls[1].namespace, "variants[102]");
    assert!(calls[..2].iter().all(|c| !c.is_fresh && !c.placeholder));
    assert_eq!(calls[2].namespace, "variants[__VARIANT__]");
    assert!(calls[2].is_fresh);
    assert!(calls[2].placeholder);
    assert!(!calls[2].has_value);
}

#[test]
fn test_freshness_does_not_leak_into_later_renders() {
    let recorder = RecordingFieldType::new("recorded");
    let harness = Harness::new(None)
        .with_type(recorder.clone())
        .with_type(FailingFieldType::new("failing"));
    let renderer = MatrixRenderer::new(&harness.view, &harness.registry, &harness.settings);

    let ok = ProductFixture::new("Tee").field("note", "recorded").variants(1).build();
    let failing = ProductFixture::new("Tee").field("note", "recorded").field("bad", "failing").build();

    renderer.render_matrix(&ok, &mut PageContext::new()).unwrap();
    assert!(
        FieldHtmlBuilder::new(&harness.view, &harness.registry)
            .build_field_html(&failing, "variants")
            .is_err()
    );
    renderer.render_matrix(&ok, &mut PageContext::new()).unwrap();

    let calls = recorder.calls();
    let fresh: Vec<bool> = calls.iter().map(|c| c.is_fresh).collect();
    assert_eq!(fresh, [false, true, true, false, true]);
    assert!(calls.iter().filter(|c| !c.placeholder).all(|c| !c.is_fresh));
}

#[test]
fn test_foot_captures_only_template_pass_scripts() {
    let harness = Harness::new(None).with_type(MarkerScriptFieldType::new("marker", "window.marker = 1;"));
    let product = ProductFixture::new("Tee").field("flag", "marker").build();

    let mut page = PageContext::new();
    page.include_js("existing();");

    let html = FieldHtmlBuilder::new(&harness.view, &harness.registry)
        .build_field_html(&product, "variants")
        .unwrap();

    assert_eq!(html.foot_html, "<script type=\"text/javascript\">\nwindow.marker = 1;\n</script>");
    assert_eq!(page.scripts().statements(), ["existing();"]);
}

#[test]
fn test_marker_reaches_page_only_through_bootstrap() {
    let harness = Harness::new(None).with_type(MarkerScriptFieldType::new("marker", "window.marker = 1;"));
    let product = ProductFixture::new("Tee").field("flag", "marker").build();

    let mut page = PageContext::new();
    page.include_js("existing();");
    MatrixRenderer::new(&harness.view, &harness.registry, &harness.settings)
        .render_matrix(&product, &mut page)
        .unwrap();

    let statements = page.scripts().statements();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0], "existing();");
    assert!(statements.iter().all(|s| s != "window.marker = 1;"));
    assert!(bootstrap_args(&statements[1])[2].contains("window.marker = 1;"));
}

#[test]
fn test_script_breakout_is_encoded() {
    let temp = TempDir::new().unwrap();
    let products = temp.path().join("commerce/products");
    std::fs::create_dir_all(&products).unwrap();
    std::fs::write(
        products.join("_variant_matrix_fields.html"),
        "<p data-ns=\"{{ namespace }}\"></script><script>alert('x')</script></p>",
    )
    .unwrap();

    let view = View::with_templates_dir(None, Some(temp.path())).unwrap();
    let registry = FieldTypeRegistry::with_builtin_types();
    let settings = MatrixSettings::default();
    let mut page = PageContext::new();

    MatrixRenderer::new(&view, &registry, &settings)
        .render_matrix(&ProductFixture::new("Tee").build(), &mut page)
        .unwrap();

    let bootstrap = &page.scripts().statements()[0];
    assert!(!bootstrap.contains("</script"));
    assert!(!bootstrap.contains("<script"));
    assert!(!bootstrap.contains('\''));

    let args = bootstrap_args(bootstrap);
    assert_eq!(
        args[1],
        "<p data-ns=\"variants[__VARIANT__]\"></script><script>alert('x')</script></p>"
    );
    assert_eq!(page.foot_html().matches("</script>").count(), 1);
}
