use data_loader::{Catalog, CatalogSchema, ContentIndex};
use std::path::Path;
use std::time::Instant;

fn main() {
    let catalog_path = Path::new("data/CONTENT_based_filtering.csv");
    let matrix_path = Path::new("data/similarity_matrix.npy");
    let cold_path = Path::new("data/completed_data_for_cold_start.csv");

    println!("Loading content catalog and similarity matrix...\n");

    let start = Instant::now();
    let index = ContentIndex::load_from_files(catalog_path, matrix_path)
        .expect("Failed to load content index");
    let content_elapsed = start.elapsed();

    let start = Instant::now();
    let cold = Catalog::load_from_file(cold_path, CatalogSchema::ColdStart)
        .expect("Failed to load cold-start catalog");
    let cold_elapsed = start.elapsed();

    let (rows, titles, viewers) = index.catalog().counts();

    println!("\n=== Load Complete ===");
    println!("Content index: {:?}", content_elapsed);
    println!("Cold-start catalog: {:?}", cold_elapsed);
    println!("Rows: {}", rows);
    println!("Titles: {}", titles);
    println!("Viewers: {}", viewers);
    println!("Matrix cells: {}", index.similarity().len().pow(2));
    println!("Cold-start rows: {}", cold.len());
}
