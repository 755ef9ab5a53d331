use data_loader::CatalogHandle;
use std::time::Instant;

fn main() {
    let handle = CatalogHandle::new("data");

    println!("Loading movie catalog...\n");

    let start = Instant::now();
    let store = handle.get().expect("Failed to load catalog");
    let cold = start.elapsed();

    let start = Instant::now();
    let _ = handle.get().expect("Failed to reuse catalog");
    let warm = start.elapsed();

    println!("=== Load Complete ===");
    println!("Cold load: {:?}", cold);
    println!("Cached access: {:?}", warm);
    println!("Movies: {}", store.len());
    println!(
        "Matrix: {}x{} ({} scores)",
        store.similarity().dim(),
        store.similarity().dim(),
        store.similarity().dim() * store.similarity().dim()
    );
}
