use std::fs::File;

use arrow_array::{Float64Array, StringArray};
use arrow_ipc::reader::FileReader;

use crate::engine::aggregate::finalize::StationSummary;
use crate::output::ipc::write_summaries;
use crate::test_helpers::MeasurementFileFactory;

#[test]
fn round_trips_through_the_ipc_file_format() {
    let factory = MeasurementFileFactory::new();
    let path = factory.missing_path("mart.arrow");

    write_summaries(
        &path,
        &[
            StationSummary {
                station: "A".into(),
                min: 1.0,
                mean: 2.0,
                max: 3.0,
            },
            StationSummary {
                station: "B".into(),
                min: -0.5,
                mean: 6.25,
                max: 7.0,
            },
        ],
    )
    .unwrap();

    let mut reader = FileReader::try_new(File::open(&path).unwrap(), None).unwrap();
    let batch = reader.next().unwrap().unwrap();

    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 4);

    let stations = batch
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(stations.value(0), "A");
    assert_eq!(stations.value(1), "B");

    let means = batch
        .column(2)
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!(means.value(0), 2.0);
    assert_eq!(means.value(1), 6.25);
}

#[test]
fn writes_an_empty_batch_for_an_empty_mart() {
    let factory = MeasurementFileFactory::new();
    let path = factory.missing_path("empty.arrow");

    write_summaries(&path, &[]).unwrap();

    let mut reader = FileReader::try_new(File::open(&path).unwrap(), None).unwrap();
    let batch = reader.next().unwrap().unwrap();
    assert_eq!(batch.num_rows(), 0);
}
