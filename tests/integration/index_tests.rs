use std::sync::Arc;
use std::thread;

use docsearch::symbol::MalformedReason;
use docsearch::{IndexHandle, Locator, SymbolEntry, SymbolError, SymbolIndex};

use crate::helpers::test_utils::{entry, fragment};

#[test]
fn test_shared_key_targets_merge_in_load_order() {
    let index = SymbolIndex::load(&[
        fragment(
            "functions_69",
            vec![SymbolEntry::new(
                "image",
                "Image",
                vec![Locator::new(
                    "classgalsim_1_1_image.html",
                    "#ctor",
                    "Image::Image(int,int)",
                )],
            )],
        ),
        fragment(
            "all_69",
            vec![SymbolEntry::new(
                "image",
                "Image",
                vec![Locator::new(
                    "classgalsim_1_1_image.html",
                    "#copy",
                    "Image::copy()",
                )],
            )],
        ),
    ]);

    let image = index.exact_match("image").expect("image should be indexed");
    let descriptors: Vec<&str> = image.targets.iter().map(|t| t.descriptor.as_str()).collect();
    assert_eq!(descriptors, vec!["Image::Image(int,int)", "Image::copy()"]);
    assert_eq!(image.targets[0].href(), "classgalsim_1_1_image.html#ctor");
}

#[test]
fn test_prefix_query_includes_image_excludes_interpolant() {
    let index = SymbolIndex::load(&[
        fragment("a", vec![entry("image", "Image", &["ctor"])]),
        fragment("b", vec![entry("image", "Image", &["copy"])]),
        fragment("c", vec![entry("interpolant", "Interpolant", &["x"])]),
    ]);

    let results = index.query("imag", None).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].key, "image");
    assert_eq!(results[0].targets.len(), 2);
    assert!(results.iter().all(|e| e.key != "interpolant"));
}

#[test]
fn test_one_bad_entry_does_not_abort_fragment() {
    let (index, rejected) = SymbolIndex::load_with_report(&[fragment(
        "functions_63",
        vec![
            entry("call", "call", &["a"]),
            entry("   ", "Blank", &["b"]),
            entry("ccdnoise", "CCDNoise", &[]),
            entry("center", "center", &["c"]),
        ],
    )]);

    assert_eq!(index.len(), 2);
    assert!(index.exact_match("call").is_some());
    assert!(index.exact_match("center").is_some());

    let reasons: Vec<MalformedReason> = rejected
        .iter()
        .map(|err| match err {
            SymbolError::MalformedFragment { reason, .. } => *reason,
            other => panic!("unexpected error {other:?}"),
        })
        .collect();
    assert_eq!(reasons, vec![MalformedReason::EmptyKey, MalformedReason::NoTargets]);
}

#[test]
fn test_invalid_query_message() {
    let index = SymbolIndex::load(&[fragment("a", vec![entry("image", "Image", &["x"])])]);

    let err = index.query("image", Some(-3)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid query: limit must not be negative (got -3)"
    );
}

#[test]
fn test_handle_swap_under_concurrent_readers() {
    let handle = IndexHandle::new(SymbolIndex::load(&[fragment(
        "old",
        vec![entry("image", "Image", &["old"])],
    )]));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let handle = handle.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let snapshot: Arc<SymbolIndex> = handle.current();
                    let image = snapshot.exact_match("image").expect("both indexes have image");
                    // A snapshot is never a mix of old and new
                    assert_eq!(image.targets.len(), 1);
                }
            })
        })
        .collect();

    handle.replace(SymbolIndex::load(&[fragment(
        "new",
        vec![entry("image", "Image", &["new"])],
    )]));

    for reader in readers {
        reader.join().unwrap();
    }

    let current = handle.current();
    assert_eq!(current.exact_match("image").unwrap().targets[0].anchor, "new");
}
