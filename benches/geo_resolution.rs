use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use asset_records::cli::RecordFormat;
use asset_records::geo::{CountryNameFallback, GeoResolver};
use asset_records::pipeline::Pipeline;
use asset_records::store::{StoreOptions, open_input_store};
use asset_records::{Batch, Record, Value};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use tempfile::TempDir;

const PLANTS: &[&str] = &["DE01", "NL20", "US10", "QQ01", "BR05", "ZZ99"];
const LOCATIONS: &[&str] = &["DE-WF-1", "NL-WF-2", "GB-OFF-3", "XX-000"];
const REGIONS: &[&str] = &["Europe", "North America", "europe", "Unknown"];

fn generate_batch(rows: usize) -> Batch {
    (0..rows)
        .map(|i| {
            let profile = if i % 4 == 0 { "ZPP2" } else { "ZXX1" };
            [
                ("Serial_No_Profile", Value::from(profile)),
                ("Replacement_Part", Value::from(if i % 3 == 0 { "B" } else { "A" })),
                ("MaintPlant", Value::from(PLANTS[i % PLANTS.len()])),
                ("FunctionalLoc", Value::from(LOCATIONS[i % LOCATIONS.len()])),
                ("Region", Value::from(REGIONS[i % REGIONS.len()])),
            ]
            .into_iter()
            .collect::<Record>()
        })
        .collect()
}

fn write_csv(rows: usize) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let csv_path = temp_dir.path().join("turbines.csv");
    let mut file = File::create(&csv_path).expect("create csv");
    writeln!(file, "Serial_No_Profile,Replacement_Part,MaintPlant,FunctionalLoc,Region")
        .expect("header");
    for i in 0..rows {
        writeln!(
            file,
            "ZPP8,A,{},{},{}",
            PLANTS[i % PLANTS.len()],
            LOCATIONS[i % LOCATIONS.len()],
            REGIONS[i % REGIONS.len()]
        )
        .expect("row");
    }
    (temp_dir, csv_path)
}

fn bench_geo(c: &mut Criterion) {
    let batch = generate_batch(10_000);
    let mut group = c.benchmark_group("geo_resolution");
    for (label, fallback) in [
        ("verbatim", CountryNameFallback::Verbatim),
        ("by_country_name", CountryNameFallback::ByCountryName),
    ] {
        let resolver = GeoResolver::new(fallback);
        group.bench_function(label, |b| {
            b.iter_batched(
                || batch.clone(),
                |records| resolver.resolve(records),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let (_dir, csv_path) = write_csv(10_000);
    let store = open_input_store(
        &csv_path,
        &StoreOptions {
            format: Some(RecordFormat::Csv),
            ..StoreOptions::default()
        },
    );
    let pipeline = Pipeline::default();
    c.bench_function("pipeline_from_csv", |b| {
        b.iter(|| {
            let records = store.load().expect("load csv");
            pipeline.run(records).expect("pipeline run")
        })
    });
}

criterion_group!(benches, bench_geo, bench_pipeline);
criterion_main!(benches);
