use crate::index::build::DataIndex;
use crate::index::types::Facet;

/// Number of values listed per facet before eliding the rest
const TOP_VALUES: usize = 15;

/// Count how many items carry each value of `facet`.
///
/// Sorted by descending count; ties keep first-seen order.
pub fn facet_counts(index: &DataIndex, facet: Facet) -> Vec<(String, usize)> {
    let mut sorted: Vec<_> = index
        .facet_universe(facet)
        .iter()
        .map(|value| {
            let count = index.postings(facet, value).map_or(0, |p| p.len() as usize);
            (value.clone(), count)
        })
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Display collection statistics
pub fn show_stats(index: &DataIndex) {
    println!("Collection Statistics");
    println!("=====================");
    println!();
    println!("Item count:       {}", index.len());

    let total_time: u64 = index.items().iter().map(|i| i.time as u64).sum();
    if !index.is_empty() {
        println!("Average time:     {} min", total_time / index.len() as u64);
    }

    for facet in Facet::ALL {
        let counts = facet_counts(index, facet);
        println!();
        println!("{} ({} distinct):", facet, counts.len());

        for (value, count) in counts.iter().take(TOP_VALUES) {
            println!("  {:30} {}", value, count);
        }

        if counts.len() > TOP_VALUES {
            println!("  ... and {} more", counts.len() - TOP_VALUES);
        }
    }
}
