use std::fs;
use std::path::Path;
use std::rc::Rc;

use somnotag_store::{Error, Recording, RecordingContainer};
use somnotag_types::{Epoch, Label, LabelSet};

// Helper to load a RecordingContainer from fixture JSON
fn load_container(fixture_name: &str) -> RecordingContainer {
    let path = Path::new("tests/fixtures").join(fixture_name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read fixture: {}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|_| panic!("Failed to parse fixture: {}", path.display()))
}

fn recording() -> Recording {
    Recording::new(load_container("recording.json"))
}

#[test]
fn test_channel_data_unwraps_raw_nesting() {
    let recording = recording();
    let rows = recording.channel_data().expect("channel data derives");
    assert_eq!(rows, [vec![0.5, 1.5, 2.5, 3.5], vec![4.5, 5.5, 6.5, 7.5]]);
}

#[test]
fn test_channel_data_is_memoized() {
    let recording = recording();
    let first = recording.channel_data().expect("channel data derives");
    let first_ptr = first.as_ptr();
    let second = recording.channel_data().expect("channel data derives");
    assert_eq!(first_ptr, second.as_ptr());
}

#[test]
fn test_corrupt_channel_data_is_fatal() {
    let mut container = load_container("recording.json");
    container.channel_data = Vec::new();
    let recording = Recording::new(container);
    assert!(matches!(
        recording.channel_data(),
        Err(Error::CorruptChannelData)
    ));
}

#[test]
fn test_filtered_data_materializes_on_first_access() {
    let mut recording = recording();
    assert!(recording.container().channel_data_filtered.is_none());

    let filtered = recording
        .channel_data_filtered()
        .expect("filtered data materializes")
        .to_vec();
    assert_eq!(filtered, [vec![0.5, 1.5, 2.5, 3.5], vec![4.5, 5.5, 6.5, 7.5]]);

    // The copy is persisted into the container from now on.
    assert_eq!(
        recording.container().channel_data_filtered.as_deref(),
        Some(&filtered[..])
    );
}

#[test]
fn test_set_filtered_data_dirty_tracking() {
    let mut recording = recording();

    // Writing the identical row leaves the dirty flag unchanged.
    recording
        .set_filtered_data(0, vec![0.5, 1.5, 2.5, 3.5])
        .expect("write succeeds");
    assert!(!recording.changes_made());

    recording
        .set_filtered_data(0, vec![9.0, 9.0, 9.0, 9.0])
        .expect("write succeeds");
    assert!(recording.changes_made());
    assert_eq!(
        recording.channel_data_filtered().expect("filtered data")[0],
        vec![9.0, 9.0, 9.0, 9.0]
    );

    // The raw view is untouched.
    assert_eq!(
        recording.channel_data().expect("channel data")[0],
        vec![0.5, 1.5, 2.5, 3.5]
    );
}

#[test]
fn test_set_filtered_data_out_of_range() {
    let mut recording = recording();
    assert!(matches!(
        recording.set_filtered_data(7, vec![1.0]),
        Err(Error::EpochOutOfRange { index: 7 })
    ));
}

#[test]
fn test_tags_materialize_lazily() {
    let mut container = load_container("recording.json");
    container.tags = None;
    let mut recording = Recording::new(container);

    assert_eq!(recording.tags(), [0, 0]);
    // The zero vector is persisted, not recomputed per read.
    assert_eq!(recording.container().tags.as_deref(), Some(&[0, 0][..]));
}

#[test]
fn test_tag_writes_leave_dirty_flag_alone() {
    let mut recording = recording();
    recording.set_tags(vec![2, 2]);
    assert!(!recording.changes_made());
    assert_eq!(recording.tags(), [2, 2]);
}

#[test]
fn test_user_labels_dirty_tracking() {
    let mut recording = recording();
    assert!(recording.user_labels().is_empty());

    // Setting an empty set where none existed changes nothing.
    recording.set_user_labels(Vec::new());
    assert!(!recording.changes_made());

    recording.set_user_labels(vec![42]);
    assert!(recording.changes_made());
    assert_eq!(recording.user_labels(), [42]);

    recording.clear_changes();
    recording.set_user_labels(vec![42]);
    assert!(!recording.changes_made());
}

#[test]
fn test_tag_migration_identity() {
    let mut recording = recording();
    recording.set_labels(LabelSet::Points(vec![10, 150]));
    assert_eq!(recording.tags(), [1, 0]);
}

#[test]
fn test_tag_migration_follows_values_on_reorder() {
    let mut recording = recording();
    recording.set_labels(LabelSet::Points(vec![150, 10]));
    assert_eq!(recording.tags(), [0, 1]);
}

#[test]
fn test_tag_migration_drops_missing_values() {
    let mut recording = recording();
    recording.set_labels(LabelSet::Points(vec![150]));
    assert_eq!(recording.tags(), [0]);
}

#[test]
fn test_tag_migration_keeps_tags_for_grown_sets() {
    let mut recording = recording();
    recording.set_labels(LabelSet::Points(vec![70, 10, 150]));
    assert_eq!(recording.tags(), [0, 1, 0]);
}

#[test]
fn test_tag_migration_skips_incompliant_shapes() {
    let mut recording = recording();
    recording.set_labels(LabelSet::Intervals(vec![[10, 20], [150, 160]]));
    assert_eq!(recording.tags(), [0, 0]);
}

#[test]
fn test_data_sources_are_cached_per_epoch() {
    let mut recording = recording();

    let first = recording
        .data_source_for(0)
        .expect("label 10 resolves to epoch 0");
    let second = recording
        .data_source_for_label(Label::Point(20))
        .expect("label 20 resolves to epoch 0");
    assert!(Rc::ptr_eq(&first, &second));

    // Both lookups accumulated their label on the shared source.
    assert_eq!(first.labels(), [Label::Point(10), Label::Point(20)]);
    assert_eq!(first.epoch(), Epoch::new(0, 99));
    assert_eq!(first.raw(), [0.5, 1.5, 2.5, 3.5]);
    assert_eq!(first.sampling_rate(), 500);

    let other = recording
        .data_source_for(1)
        .expect("label 150 resolves to epoch 1");
    assert!(!Rc::ptr_eq(&first, &other));
}

#[test]
fn test_interval_labels_resolve_by_start() {
    let mut recording = recording();
    recording.set_labels(LabelSet::Intervals(vec![[110, 130]]));
    let source = recording.data_source_for(0).expect("epoch 1 hosts [110, 130]");
    assert_eq!(source.epoch(), Epoch::new(100, 199));
}

#[test]
fn test_uncovered_label_position_is_fatal() {
    let mut recording = recording();
    let err = recording
        .data_source_for_label(Label::Point(500))
        .expect_err("position 500 lies in no epoch");
    assert!(matches!(
        err,
        Error::Model(somnotag_types::Error::EpochNotFound { position: 500 })
    ));
}

#[test]
fn test_label_index_out_of_range_is_fatal() {
    let mut recording = recording();
    assert!(matches!(
        recording.data_source_for(9),
        Err(Error::LabelOutOfRange { index: 9 })
    ));
}

#[test]
fn test_checkpoint_round_trip() {
    let mut recording = recording();
    assert_eq!(recording.checkpoint(), Some(1));

    recording.set_checkpoint(7);
    assert_eq!(recording.container().checkpoint.as_deref(), Some("7"));
    assert_eq!(recording.checkpoint(), Some(7));

    recording.remove_checkpoint();
    assert_eq!(recording.checkpoint(), None);
    // Removing twice is a no-op.
    recording.remove_checkpoint();
    assert_eq!(recording.checkpoint(), None);
}

#[test]
fn test_malformed_checkpoint_reads_as_absent() {
    let mut container = load_container("recording.json");
    container.checkpoint = Some("not-a-number".to_string());
    let recording = Recording::new(container);
    assert_eq!(recording.checkpoint(), None);
}

#[test]
fn test_points_in_seconds() {
    let recording = Recording::with_sampling_rate(load_container("recording.json"), 2);
    let points = recording.points_in_seconds().expect("channel data derives");
    assert_eq!(points[..4], [0.25, 0.75, 1.25, 1.75]);
    assert_eq!(points.len(), 8);
}

#[test]
fn test_container_round_trips_through_external_keys() {
    let container = load_container("recording.json");

    let json = serde_json::to_value(&container).expect("container serializes");
    let object = json.as_object().expect("container is an object");
    assert!(object.contains_key("sampleInfo"));
    assert!(object.contains_key("label"));
    assert!(object.contains_key("channelData"));
    assert!(object.contains_key("sleepy-metadata-checkpoint"));
    // Never-materialized optionals stay off the wire.
    assert!(!object.contains_key("channelDataFiltered"));
    assert!(!object.contains_key("sleepyUserLabels"));

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("recording.json");
    fs::write(&path, serde_json::to_string(&container).expect("serializes"))
        .expect("fixture writes");
    let reloaded: RecordingContainer =
        serde_json::from_str(&fs::read_to_string(&path).expect("fixture reads"))
            .expect("fixture parses");
    assert_eq!(reloaded, container);
}
