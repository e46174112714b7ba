use insta::assert_snapshot;

use svgscout::app::normalize::normalize;

#[test]
fn cleans_a_component_fragment() {
    let fragment = r#"<svg width={24} height={24} fill={"none"} {...props}><!-- chrome --><path d="M4 12h16"/></svg>"#;
    assert_snapshot!("cleaned_component_fragment", normalize(fragment));
}
