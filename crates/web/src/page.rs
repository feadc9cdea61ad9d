//! Runner page assembly
//!
//! The runner page is a plain HTML document: framework assets first, then one
//! inclusion directive per manifest asset, strictly in `js_files` order, then
//! the bootstrap that kicks off the suite on load.

use jspec_common::AssetManifest;

/// Namespace the harness's own browser assets are served under.
pub const HARNESS_PREFIX: &str = "/__JASMINE_ROOT__";

/// Build the runner page for the whole suite, or for a single focused spec
/// when `spec_filter` names one.
pub fn runner_page(manifest: &AssetManifest, spec_filter: Option<&str>) -> String {
    let mut head = String::new();
    head.push_str(&link_tag(&format!("{HARNESS_PREFIX}/lib/jasmine.css")));
    for stylesheet in manifest.stylesheets() {
        head.push_str(&link_tag(stylesheet));
    }
    head.push_str(&script_tag(&format!("{HARNESS_PREFIX}/lib/jasmine.js")));
    head.push_str(&script_tag(&format!("{HARNESS_PREFIX}/lib/jasmine-html.js")));

    let mut body = String::new();
    for file in manifest.js_files(spec_filter) {
        body.push_str(&script_tag(&file));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>jspec runner</title>
{head}</head>
<body>
{body}  <script type="text/javascript">
    var jasmineEnv = jasmine.getEnv();
    jasmineEnv.addReporter(new jasmine.TrivialReporter());
    window.onload = function() {{ jasmineEnv.execute(); }};
  </script>
</body>
</html>
"#
    )
}

fn script_tag(src: &str) -> String {
    format!("  <script type=\"text/javascript\" src=\"{src}\"></script>\n")
}

fn link_tag(href: &str) -> String {
    format!("  <link rel=\"stylesheet\" type=\"text/css\" href=\"{href}\">\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jspec_common::{HarnessConfig, ManifestBuilder};
    use std::fs;
    use std::path::Path;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn page_lists_assets_in_manifest_order() {
        let root = tempfile::tempdir().unwrap();
        touch(root.path(), "Env.js");
        touch(root.path(), "spec/javascripts/EnvSpec.js");
        let config = HarnessConfig {
            src_files: Some(vec!["Env.js".to_string()]),
            ..Default::default()
        };
        let manifest = ManifestBuilder::new(root.path().to_path_buf(), config).build();

        let page = runner_page(&manifest, None);
        let src_pos = page.find("/Env.js").unwrap();
        let spec_pos = page.find("EnvSpec.js").unwrap();
        assert!(src_pos < spec_pos);
        assert!(page.contains("/__JASMINE_ROOT__/lib/jasmine.js"));
    }

    #[test]
    fn focused_page_contains_only_the_focused_spec() {
        let root = tempfile::tempdir().unwrap();
        touch(root.path(), "spec/javascripts/EnvSpec.js");
        touch(root.path(), "spec/javascripts/OtherSpec.js");
        let manifest =
            ManifestBuilder::new(root.path().to_path_buf(), HarnessConfig::default()).build();

        let page = runner_page(&manifest, Some("EnvSpec.js"));
        assert!(page.contains("EnvSpec.js"));
        assert!(!page.contains("OtherSpec.js"));
    }
}
