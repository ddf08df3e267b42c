//! AnalysisHost document lifecycle.

use std::sync::Arc;
use std::thread;

use stibium::ide::{AnalysisHost, HostError};
use stibium::{AnalysisOptions, SrcPosition};

use crate::helpers::fixtures;

#[test]
fn test_documents_are_analyzed_independently() {
    let mut host = AnalysisHost::new();
    host.set_document("a.ant", 1, fixtures::SIMPLE_REACTION).unwrap();
    host.set_document("b.ant", 1, fixtures::DEFINED_REACTION).unwrap();

    let a = host.document("a.ant").unwrap();
    let b = host.document("b.ant").unwrap();
    assert_eq!(a.read().get_errors().len(), 1);
    assert!(b.read().get_errors().is_empty());
    assert_eq!(host.document_count(), 2);
}

#[test]
fn test_last_writer_wins_by_version() {
    let mut host = AnalysisHost::new();
    host.set_document("a.ant", 5, fixtures::DEFINED_REACTION).unwrap();
    assert!(host.set_document("a.ant", 5, fixtures::SIMPLE_REACTION).is_ok());
    assert!(matches!(
        host.set_document("a.ant", 4, fixtures::DEFINED_REACTION),
        Err(HostError::StaleVersion { current: 5, attempted: 4, .. })
    ));
    let file = host.document("a.ant").unwrap();
    assert_eq!(file.read().text(), fixtures::SIMPLE_REACTION);
}

#[test]
fn test_readers_on_other_threads() {
    let mut host = AnalysisHost::new();
    let handle = host.set_document("m.ant", 1, fixtures::MODEL_WITH_PARAMETERS).unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                let file = handle.read();
                file.goto(SrcPosition::new(4, 17)).0.len()
            })
        })
        .collect();
    for reader in readers {
        assert_eq!(reader.join().unwrap(), 2);
    }
}

#[test]
fn test_separator_option_reaches_documents() {
    let mut host = AnalysisHost::with_options(AnalysisOptions {
        unique_name_separator: ".".into(),
        ..AnalysisOptions::default()
    });
    let handle = host.set_document("a.ant", 1, "k = 1\n").unwrap();
    assert_eq!(handle.write().get_unique_name("k"), "k.1");
}
