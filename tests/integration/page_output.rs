//! What a render leaves in the page context.

use variant_matrix::core::MatrixError;
use variant_matrix::matrix::{MatrixRenderer, MatrixSettings};
use variant_matrix::test_utils::{FailingFieldType, MarkerScriptFieldType, ProductFixture};
use variant_matrix::view::PageContext;

use crate::common::Harness;

fn seeded_page() -> PageContext {
    let mut page = PageContext::new();
    page.include_js("existing();");
    page
}

#[test]
fn test_row_failure_leaves_page_untouched() {
    let harness = Harness::new(None)
        .with_type(MarkerScriptFieldType::new("marker", "rowInit();"))
        .with_type(FailingFieldType::new("failing"));
    let product = ProductFixture::new("Tee")
        .field("flag", "marker")
        .field("bad", "failing")
        .variants(2)
        .build();

    let mut page = seeded_page();
    let err = MatrixRenderer::new(&harness.view, &harness.registry, &harness.settings)
        .render_matrix(&product, &mut page)
        .unwrap_err();

    assert!(matches!(err, MatrixError::FieldRender { ref field, .. } if field == "bad"));
    assert_eq!(page.scripts().statements(), ["existing();"]);
    assert!(page.js_resources().is_empty());
    assert!(page.translations().is_empty());
}

#[test]
fn test_template_pass_failure_leaves_page_untouched() {
    let harness = Harness::new(None).with_type(FailingFieldType::new("failing"));
    let product = ProductFixture::new("Tee").field("bad", "failing").build();

    let mut page = seeded_page();
    let result = MatrixRenderer::new(&harness.view, &harness.registry, &harness.settings)
        .render_matrix(&product, &mut page);

    assert!(matches!(result, Err(MatrixError::FieldRender { .. })));
    assert_eq!(page.scripts().statements(), ["existing();"]);
    assert_eq!(page.foot_html(), "<script type=\"text/javascript\">\nexisting();\n</script>");
}

#[test]
fn test_row_scripts_precede_bootstrap() {
    let harness = Harness::new(None).with_type(MarkerScriptFieldType::new("marker", "rowInit();"));
    let product = ProductFixture::new("Tee").field("flag", "marker").variants(2).build();

    let mut page = seeded_page();
    MatrixRenderer::new(&harness.view, &harness.registry, &harness.settings)
        .render_matrix(&product, &mut page)
        .unwrap();

    let statements = page.scripts().statements();
    assert_eq!(&statements[..3], ["existing();", "rowInit();", "rowInit();"]);
    assert!(statements[3].starts_with("new Craft.Commerce.VariantMatrix("));
    assert_eq!(statements.len(), 4);
}

#[test]
fn test_head_lists_configured_resource() {
    let harness = Harness::new(None);
    let settings = MatrixSettings {
        js_resource: "shop/js/matrix.js".to_string(),
        ..MatrixSettings::default()
    };

    let mut page = PageContext::new();
    MatrixRenderer::new(&harness.view, &harness.registry, &settings)
        .render_matrix(&ProductFixture::new("Tee").build(), &mut page)
        .unwrap();

    assert_eq!(
        page.head_html(),
        "<script type=\"text/javascript\" src=\"shop&#x2F;js&#x2F;matrix.js\"></script>"
    );
}
