use docsearch::{IndexFragment, Locator, SymbolEntry};

/// Entry whose targets all point into `<key>.html`, one per anchor
pub fn entry(key: &str, label: &str, anchors: &[&str]) -> SymbolEntry {
    SymbolEntry::new(
        key,
        label,
        anchors
            .iter()
            .map(|anchor| {
                Locator::new(
                    format!("classgalsim_1_1_{}.html", key),
                    *anchor,
                    format!("galsim::{}", label),
                )
            })
            .collect(),
    )
}

pub fn fragment(name: &str, entries: Vec<SymbolEntry>) -> IndexFragment {
    IndexFragment::new(name, entries)
}

/// Path to the checked-in Doxygen search fixtures
pub fn fixture_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("search")
}
