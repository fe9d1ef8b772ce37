use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::metrics::SimulationResult;

pub(crate) fn export_to_parquet_impl(
    results: &[SimulationResult],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let batch = build_record_batch(results)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

fn build_record_batch(
    results: &[SimulationResult],
) -> Result<RecordBatch, arrow::error::ArrowError> {
    let schema = Arc::new(parquet_schema());
    RecordBatch::try_new(schema, build_arrays(results))
}

const COUNT_COLUMNS: [&str; 13] = [
    "arrivals",
    "requests_handled",
    "successful_requests",
    "failed_requests",
    "rejected_for_cpu",
    "rejected_for_memory",
    "pods_evicted",
    "scale_ups_started",
    "scale_ups_completed",
    "final_pods",
    "peak_pods",
    "sample_count",
    "events_processed",
];

const RATE_COLUMNS: [&str; 3] = ["success_rate", "mean_live_pods", "mean_cpu_utilization"];

fn parquet_schema() -> Schema {
    let counts = COUNT_COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::UInt64, false));
    let rates = RATE_COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Float64, false));
    Schema::new(counts.chain(rates).collect::<Vec<_>>())
}

fn counts(r: &SimulationResult) -> [u64; 13] {
    [
        r.arrivals,
        r.requests_handled,
        r.successful_requests,
        r.failed_requests,
        r.rejected_for_cpu,
        r.rejected_for_memory,
        r.pods_evicted,
        r.scale_ups_started,
        r.scale_ups_completed,
        r.final_pods as u64,
        r.peak_pods as u64,
        r.sample_count as u64,
        r.events_processed,
    ]
}

fn rates(r: &SimulationResult) -> [f64; 3] {
    [r.success_rate, r.mean_live_pods, r.mean_cpu_utilization]
}

fn build_arrays(results: &[SimulationResult]) -> Vec<ArrayRef> {
    let count_rows: Vec<[u64; 13]> = results.iter().map(counts).collect();
    let rate_rows: Vec<[f64; 3]> = results.iter().map(rates).collect();

    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(COUNT_COLUMNS.len() + RATE_COLUMNS.len());
    for column in 0..COUNT_COLUMNS.len() {
        let values: Vec<u64> = count_rows.iter().map(|row| row[column]).collect();
        arrays.push(Arc::new(UInt64Array::from(values)));
    }
    for column in 0..RATE_COLUMNS.len() {
        let values: Vec<f64> = rate_rows.iter().map(|row| row[column]).collect();
        arrays.push(Arc::new(Float64Array::from(values)));
    }
    arrays
}
