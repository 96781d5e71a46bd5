use std::sync::Arc;

use zarrs::array::{Array, ArrayMetadata};
use zarrs::metadata::v3::ArrayMetadataV3;
use zarrs::storage::ReadableStorageTraits;
use zarrs::storage::store::MemoryStore;
use zarrs_fanout::FanoutChunkKeyEncoding;

const ARRAY_PATH: &str = "/test_array";

fn array_metadata(max_children: u64) -> ArrayMetadataV3 {
    env_logger::try_init().ok();
    let cke = FanoutChunkKeyEncoding::new(max_children).expect("valid max_children");
    let json = serde_json::json!({
        "zarr_format": 3,
        "node_type": "array",
        "shape": [100, 80],
        "data_type": "float32",
        "chunk_grid": {"name": "regular", "configuration": {"chunk_shape": [10, 8]}},
        "chunk_key_encoding": cke.metadata().expect("serializable configuration"),
        "fill_value": 0.0,
        "codecs": [{"name": "bytes", "configuration": {"endian": "little"}}],
    });
    serde_json::from_value(json).expect("valid array metadata")
}

#[test]
fn test_array_roundtrip() {
    let store = Arc::new(MemoryStore::new());
    let array = Array::new_with_metadata(
        store.clone(),
        ARRAY_PATH,
        ArrayMetadata::V3(array_metadata(100)),
    )
    .expect("create array");
    array.store_metadata().expect("store metadata");

    let chunk_0_0: Vec<f32> = (0..80).map(|n| n as f32).collect();
    let chunk_1_2 = vec![42.5f32; 80];
    array
        .store_array_subset(&[0..10, 0..8], &chunk_0_0)
        .expect("store chunk (0, 0)");
    array
        .store_array_subset(&[10..20, 16..24], &chunk_1_2)
        .expect("store chunk (1, 2)");

    assert_eq!(array.chunk_key(&[0, 0]).as_str(), "test_array/c/0/00/0/00");
    assert_eq!(array.chunk_key(&[1, 2]).as_str(), "test_array/c/0/01/0/02");
    for indices in [[0, 0], [1, 2]] {
        let key = array.chunk_key(&indices);
        assert!(store.get(&key).unwrap().is_some(), "missing {key}");
    }
    assert!(store.get(&array.chunk_key(&[5, 7])).unwrap().is_none());

    // reopening resolves the encoding from stored metadata
    let reopened = Array::open(store.clone(), ARRAY_PATH).expect("open array");
    assert_eq!(reopened.chunk_key(&[1, 2]), array.chunk_key(&[1, 2]));
    let data: Vec<f32> = reopened
        .retrieve_array_subset(&[0..10, 0..8])
        .expect("retrieve chunk (0, 0)");
    assert_eq!(data, chunk_0_0);
    let data: Vec<f32> = reopened
        .retrieve_array_subset(&[10..20, 16..24])
        .expect("retrieve chunk (1, 2)");
    assert_eq!(data, chunk_1_2);
}

#[test]
fn test_floored_metadata_is_stored() {
    let meta = array_metadata(150);
    let json = serde_json::to_value(&meta).unwrap();
    assert_eq!(json["chunk_key_encoding"]["name"], "fanout");
    assert_eq!(
        json["chunk_key_encoding"]["configuration"]["max_children"],
        100
    );
}
