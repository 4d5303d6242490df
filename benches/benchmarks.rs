//! Performance benchmarks for tagsieve
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tagsieve::bench::DEFAULT_INPUTS;
use tagsieve::engine::SearchEngine;
use tagsieve::index::DataIndex;
use tagsieve::index::types::{EngineConfig, Facet, Ingredient, Item};

const INGREDIENTS: [&str; 12] = [
    "chocolat", "sucre", "farine", "oeuf", "lait", "beurre", "tomate", "thon", "riz",
    "citron", "coco", "pommes",
];
const APPLIANCES: [&str; 5] = ["Four", "Blender", "Casserole", "Saladier", "Cocotte"];
const UTENSILS: [&str; 6] = ["fouet", "couteau", "moule", "spatule", "saladier", "passoire"];

/// Deterministic synthetic collection of `n` items
fn collection(n: u32) -> Vec<Item> {
    (0..n)
        .map(|id| {
            let i = id as usize;
            Item {
                id,
                name: format!("Recette {} au {}", id, INGREDIENTS[i % INGREDIENTS.len()]),
                description: format!("Melanger le {} et cuire", INGREDIENTS[(i * 7) % INGREDIENTS.len()]),
                time: (i % 90) as u32,
                ingredients: (0..4)
                    .map(|k| Ingredient::new(INGREDIENTS[(i + k * 5) % INGREDIENTS.len()]))
                    .collect(),
                appliance: APPLIANCES[i % APPLIANCES.len()].to_string(),
                utensils: (0..2)
                    .map(|k| UTENSILS[(i * 3 + k) % UTENSILS.len()].to_string())
                    .collect(),
                servings: None,
                image: None,
            }
        })
        .collect()
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    for size in [1_000u32, 10_000] {
        let items = collection(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| DataIndex::build(black_box(items.clone())))
        });
    }
    group.finish();
}

fn bench_text_search(c: &mut Criterion) {
    let mut engine = SearchEngine::new(collection(10_000)).expect("Failed to build engine");

    let mut group = c.benchmark_group("text_search");
    for input in DEFAULT_INPUTS {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{:?}", input)), &input, |b, &q| {
            b.iter(|| engine.set_text(black_box(q), &mut |_| {}))
        });
    }
    group.finish();
}

fn bench_tag_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("tag_toggle");

    for (facet, tag) in [
        (Facet::Ingredients, "chocolat"),
        (Facet::Appliances, "Four"),
        (Facet::Utensils, "fouet"),
    ] {
        let mut engine = SearchEngine::new(collection(10_000)).expect("Failed to build engine");
        engine.set_text("recette", &mut |_| {});

        group.bench_function(facet.as_str(), |b| {
            b.iter(|| {
                engine.add_tag(facet, black_box(tag), &mut |_| {});
                engine.remove_tag(facet, black_box(tag), &mut |_| {});
            })
        });
    }
    group.finish();
}

fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming");

    for streaming in [true, false] {
        let config = EngineConfig {
            streaming,
            ..EngineConfig::default()
        };
        let mut engine =
            SearchEngine::with_config(collection(10_000), config).expect("Failed to build engine");
        engine.add_tag(Facet::Ingredients, "sucre", &mut |_| {});

        group.bench_function(if streaming { "on" } else { "off" }, |b| {
            b.iter(|| {
                let mut batches = 0;
                engine.set_text(black_box("re"), &mut |_| batches += 1);
                batches
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_index_build,
    bench_text_search,
    bench_tag_toggle,
    bench_streaming,
);

criterion_main!(benches);
