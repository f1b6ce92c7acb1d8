//! `simdb-meta.toml` loading and the configured codec

use crate::test_utils::*;
use serde_json::json;
use simdb_meta::{Codec, EmptyCollectionPolicy, MetaConfig, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn test_default_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    MetaConfig::write_default_if_missing(&path).unwrap();
    let config = MetaConfig::from_file(&path).unwrap();
    assert_eq!(config, MetaConfig::default());
}

#[test]
fn test_codec_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "empty_collections = \"skip\"\n\n[limits]\nmax_nesting_depth = 3\n",
    )
    .unwrap();

    let codec = Codec::new(MetaConfig::from_file(&path).unwrap()).unwrap();
    assert_eq!(codec.config().empty_collections, EmptyCollectionPolicy::Skip);

    let shallow = doc(json!({"a": {"b": 1}, "c": []}));
    let entries = codec.flatten(&shallow).unwrap();
    assert_eq!(encoded_paths(&entries), vec!["a.b"]);

    let deep = doc(json!({"a": {"b": {"c": {"d": 1}}}}));
    assert!(codec.flatten(&deep).is_err());
}

#[test]
fn test_invalid_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "empty_collections = 5\n").unwrap();
    assert_eq!(MetaConfig::from_file(&path).unwrap_err().kind(), "config");
}
