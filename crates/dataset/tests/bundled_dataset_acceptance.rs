use std::path::PathBuf;

use dataset::{outcome_counts, LaunchTable};
use shared::domain::{PayloadRange, SiteSelection};

fn bundled_dataset() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/spacex_launch_dash.csv")
}

#[test]
fn bundled_dataset_loads_with_expected_shape() {
    let table = LaunchTable::from_path(bundled_dataset()).expect("bundled dataset");

    assert_eq!(table.len(), 56);
    assert_eq!(
        table.sites(),
        ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
    );
    assert_eq!(table.booster_categories(), ["v1.0", "v1.1", "FT", "B4", "B5"]);
    assert_eq!(table.payload_bounds().low(), 0.0);
    assert_eq!(table.payload_bounds().high(), 9600.0);

    let counts = outcome_counts(table.records());
    assert_eq!(counts.success, 25);
    assert_eq!(counts.failure, 31);
}

#[test]
fn site_subsets_partition_the_bundled_table() {
    let table = LaunchTable::from_path(bundled_dataset()).expect("bundled dataset");
    let total: usize = table
        .sites()
        .iter()
        .map(|site| table.select_site(&SiteSelection::Site(site.clone())).len())
        .sum();
    assert_eq!(total, table.len());

    let ksc = outcome_counts(table.select_site(&SiteSelection::Site("KSC LC-39A".into())));
    assert_eq!((ksc.success, ksc.failure), (11, 2));
}

#[test]
fn narrowing_the_range_never_adds_rows() {
    let table = LaunchTable::from_path(bundled_dataset()).expect("bundled dataset");
    let mut previous = table.len();
    for (low, high) in [(0.0, 9600.0), (500.0, 9000.0), (2000.0, 5000.0), (3000.0, 3200.0)] {
        let range = PayloadRange::new(low, high).expect("range");
        let rows = table.select(&SiteSelection::All, &range).len();
        assert!(rows <= previous, "{low}-{high} grew from {previous} to {rows}");
        previous = rows;
    }
}
