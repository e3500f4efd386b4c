use coloc::{Collection, ColocOptions, Record, RecordId, TimeInterval, colocate, colocate_with, match_all};
use geo::{Polygon, polygon};

fn swath(lon: f64, lat: f64) -> Polygon {
    polygon![
        (x: lon, y: lat),
        (x: lon + 4.0, y: lat),
        (x: lon + 4.0, y: lat + 8.0),
        (x: lon, y: lat + 8.0),
        (x: lon, y: lat),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see pass/ratio diagnostics)
    env_logger::init();

    println!("=== Coloc - Getting Started ===\n");

    // === BUILD TWO CATALOG COLLECTIONS ===
    println!("1. Building Collections");
    println!("-----------------------");

    // Radar products: note the second and third overlap each other in time,
    // so this side is self-overlapping.
    let products = Collection::from_records(vec![
        Record::with_footprint(
            RecordId::composite(["S1A", "0001"]),
            TimeInterval::from_unix_seconds(1_640_995_200, 1_640_995_500),
            swath(-5.0, 40.0),
        ),
        Record::with_footprint(
            RecordId::composite(["S1A", "0002"]),
            TimeInterval::from_unix_seconds(1_640_995_600, 1_640_995_900),
            swath(-4.0, 44.0),
        ),
        Record::with_footprint(
            RecordId::composite(["S1B", "0107"]),
            TimeInterval::from_unix_seconds(1_640_995_700, 1_640_996_000),
            swath(-3.0, 48.0),
        ),
    ]);

    // Optical scenes: a clean, non-self-overlapping chain.
    let scenes = Collection::from_records(vec![
        Record::with_footprint(
            "scene-a",
            TimeInterval::from_unix_seconds(1_640_995_400, 1_640_995_700),
            swath(-4.5, 42.0),
        ),
        Record::with_footprint(
            "scene-b",
            TimeInterval::from_unix_seconds(1_640_995_800, 1_640_996_100),
            swath(-2.5, 47.0),
        ),
        Record::with_footprint(
            "scene-c",
            TimeInterval::from_unix_seconds(1_641_000_000, 1_641_000_300),
            swath(-80.0, 30.0),
        ),
    ]);

    println!("   {} products, {} scenes", products.len(), scenes.len());
    println!(
        "   products self-overlapping: {}\n",
        products.is_self_overlapping()
    );

    // === COLOCATE ===
    println!("2. Colocation");
    println!("-------------");

    let matches = colocate(&products, &scenes)?;
    println!("   Found {} colocated pairs:", matches.len());
    for (i, j) in matches.iter() {
        println!(
            "     - {:?} <-> {:?}",
            products.get(i).unwrap().id,
            scenes.get(j).unwrap().id
        );
    }
    println!();

    // === TUNING THE FALLBACK THRESHOLD ===
    println!("3. Fallback Threshold");
    println!("---------------------");

    // A threshold of 0.0 sends every self-overlapping remainder straight to
    // the brute-force matcher; the result set is identical.
    let options = ColocOptions::default().with_overlap_fallback_threshold(0.0);
    let brute_only = colocate_with(&products, &scenes, &options)?;
    println!(
        "   Same pairs with brute-force fallback forced: {}",
        brute_only.sorted_pairs() == matches.sorted_pairs()
    );
    println!();

    // === ORACLE CHECK ===
    println!("4. Brute-Force Oracle");
    println!("---------------------");

    let oracle = match_all(&products, &scenes)?;
    println!(
        "   colocate agrees with match_all: {}",
        oracle.sorted_pairs() == matches.sorted_pairs()
    );

    println!("\n=== Getting Started Complete! ===");

    Ok(())
}
