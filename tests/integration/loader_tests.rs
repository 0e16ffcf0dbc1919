use anyhow::Result;

use docsearch::loader::{self, LoadStage};
use docsearch::{Config, LoaderError, SymbolIndex};

use crate::helpers::test_harness::TestHarness;
use crate::helpers::test_utils::fixture_dir;

fn default_patterns() -> Vec<String> {
    Config::default().index.patterns
}

#[tokio::test]
async fn test_load_fixture_directory() -> Result<()> {
    let loaded = loader::load_directory(&fixture_dir(), &default_patterns()).await?;

    // all_69, functions_63, functions_69 load; broken.js is skipped; README.txt is ignored
    assert_eq!(loaded.fragments.len(), 3);
    assert_eq!(loaded.report.loaded(), 3);
    assert_eq!(loaded.report.error_count(), 1);
    assert_eq!(loaded.report.errors()[0].stage, LoadStage::Parse);
    assert!(loaded.report.errors()[0].path.ends_with("broken.js"));

    let names: Vec<&str> = loaded.fragments.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["all_69", "functions_63", "functions_69"]);

    Ok(())
}

#[tokio::test]
async fn test_fixture_index_contents() -> Result<()> {
    let loaded = loader::load_directory(&fixture_dir(), &default_patterns()).await?;
    let index = SymbolIndex::load(&loaded.fragments);

    let stats = index.stats();
    assert_eq!(stats.fragments, 3);
    assert_eq!(stats.entries, 10);
    assert_eq!(stats.targets, 22);
    assert_eq!(stats.rejected, 0);

    let keys: Vec<&str> = index
        .query("imag", None)?
        .iter()
        .map(|e| e.key.as_str())
        .collect();
    assert_eq!(keys, vec!["image", "image_add", "image_copy", "imageview"]);

    // all_69 sorts first, its copy-constructor target is shared with functions_69
    let image = index.exact_match("Image").unwrap();
    assert_eq!(image.label, "Image");
    assert_eq!(image.targets.len(), 6);
    assert_eq!(image.targets[0].anchor, "a159a2fda6d43b5e184f87b9359346594");
    assert_eq!(image.targets[1].path, "classgalsim_1_1image_1_1_image.html");
    assert_eq!(image.targets[1].anchor, "");
    assert_eq!(
        image.targets[0].descriptor,
        "galsim::Image::Image(const Image< T > &rhs)"
    );

    let call = index.exact_match("call").unwrap();
    assert_eq!(call.targets[1].descriptor, "galsim::CalculateCenter< T, true >::call()");

    Ok(())
}

#[tokio::test]
async fn test_load_json_and_js_together() -> Result<()> {
    let harness = TestHarness::with_fixtures(&["functions_69.js"])?;
    harness.create_file(
        "extra/python.json",
        r#"{"entries": [
            {"key": "Image", "label": "Image", "targets": [
                {"path": "classgalsim_1_1image_1_1_image.html", "descriptor": "galsim.image.Image"}
            ]},
            {"key": "interpolant2d", "label": "Interpolant2d", "targets": [
                {"path": "classgalsim_1_1_interpolant2d.html", "anchor": "a1"}
            ]}
        ]}"#,
    )?;

    let loaded = loader::load_directory(harness.path(), &default_patterns()).await?;
    assert!(!loaded.report.has_errors());

    let names: Vec<&str> = loaded.fragments.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["python", "functions_69"]);

    let index = SymbolIndex::load(&loaded.fragments);
    let image = index.exact_match("image").unwrap();
    assert_eq!(image.targets.len(), 6);
    assert_eq!(image.targets[0].descriptor, "galsim.image.Image");

    let interp: Vec<&str> = index
        .query("interp", None)?
        .iter()
        .map(|e| e.label.as_str())
        .collect();
    assert_eq!(interp, vec!["Interpolant", "Interpolant2d"]);

    Ok(())
}

#[tokio::test]
async fn test_patterns_restrict_files() -> Result<()> {
    let harness = TestHarness::with_fixtures(&["functions_63.js", "functions_69.js"])?;

    let loaded = loader::load_directory(harness.path(), &["functions_6?.js".to_string()]).await?;
    assert_eq!(loaded.fragments.len(), 2);

    let loaded = loader::load_directory(harness.path(), &["*_63.js".to_string()]).await?;
    assert_eq!(loaded.fragments.len(), 1);
    assert_eq!(loaded.fragments[0].name, "functions_63");

    Ok(())
}

#[tokio::test]
async fn test_malformed_entries_in_file_are_skipped() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_file(
        "functions_6c.js",
        "var searchData=\n[\n  ['lookuptable',['LookupTable',['../classgalsim_1_1table_1_1_lookup_table.html',1,'galsim.table.LookupTable']]],\n  ['orphan',['Orphan']],\n  ['',['Nameless',['../x.html',1,'x']]]\n];\n",
    )?;

    let loaded = loader::load_directory(harness.path(), &default_patterns()).await?;
    assert!(!loaded.report.has_errors());

    let (index, rejected) = SymbolIndex::load_with_report(&loaded.fragments);
    assert_eq!(index.len(), 1);
    assert_eq!(rejected.len(), 2);
    assert!(index.exact_match("lookuptable").is_some());

    Ok(())
}

#[tokio::test]
async fn test_missing_directory_is_an_error() {
    let harness = TestHarness::new().unwrap();
    let missing = harness.path().join("nope");

    let err = loader::load_directory(&missing, &default_patterns())
        .await
        .unwrap_err();
    assert!(matches!(err, LoaderError::MissingDirectory(_)));
}

#[tokio::test]
async fn test_empty_directory_gives_empty_index() -> Result<()> {
    let harness = TestHarness::new()?;

    let loaded = loader::load_directory(harness.path(), &default_patterns()).await?;
    let index = SymbolIndex::load(&loaded.fragments);

    assert!(index.is_empty());
    assert!(index.query("", None)?.is_empty());
    Ok(())
}
