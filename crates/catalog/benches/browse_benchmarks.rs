use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use bazaar_catalog::{
    FacetCounter, FacetValue, FacetVocabulary, FilterState, IsolatedFacetCounter,
    NarrowingFacetCounter, Paginator, PriceBucketizer, filter_products,
};
use bazaar_core::ProductId;
use bazaar_products::{Product, StockStatus};

const BRANDS: [&str; 8] = ["Sony", "JBL", "Apple", "Walton", "Samsung", "Xiaomi", "Anker", "Vivo"];
const CONDITIONS: [&str; 3] = ["new", "used", "refurbished"];

fn listing(count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| {
            Product::new(ProductId::new(), format!("listing {i}"))
                .with_price(200.0 + (i * 7919 % 50_000) as f64)
                .with_brand(BRANDS[i % BRANDS.len()])
                .with_condition(CONDITIONS[i % CONDITIONS.len()])
                .with_stock(if i % 4 == 0 { StockStatus::OutOfStock } else { StockStatus::InStock })
        })
        .collect()
}

fn selection(vocabulary: &FacetVocabulary) -> FilterState {
    let mut state = FilterState::only(FacetValue::Brand("Sony".into()));
    state.select(FacetValue::Brand("Apple".into()));
    state.select(FacetValue::Condition("new".into()));
    if let Some(range) = vocabulary.price_ranges.get(1) {
        state.select(FacetValue::PriceRange(range.key.clone()));
    }
    state.in_stock = true;
    state
}

fn bench_vocabulary_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("vocabulary_build");
    let bucketizer = PriceBucketizer::default();

    for size in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("build", size), size, |b, &size| {
            let products = listing(size);
            b.iter(|| black_box(FacetVocabulary::build(&products, &bucketizer)));
        });
    }

    group.finish();
}

fn bench_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtering");
    let bucketizer = PriceBucketizer::default();

    for size in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("filter_products", size), size, |b, &size| {
            let products = listing(size);
            let vocabulary = FacetVocabulary::build(&products, &bucketizer);
            let state = selection(&vocabulary);

            b.iter(|| black_box(filter_products(&products, &state, &vocabulary.price_ranges)));
        });
    }

    group.finish();
}

fn bench_facet_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("facet_counts");
    let bucketizer = PriceBucketizer::default();
    let products = listing(5_000);
    let vocabulary = FacetVocabulary::build(&products, &bucketizer);
    let state = selection(&vocabulary);

    group.bench_function("isolated", |b| {
        b.iter(|| black_box(IsolatedFacetCounter.count(&products, &vocabulary, &state)));
    });
    group.bench_function("narrowing", |b| {
        b.iter(|| black_box(NarrowingFacetCounter.count(&products, &vocabulary, &state)));
    });

    group.finish();
}

fn bench_pagination(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagination");
    let paginator = Paginator::default();
    let items: Vec<usize> = (0..10_000).collect();

    for page in [1, 250, 500].iter() {
        group.bench_with_input(BenchmarkId::new("paginate", page), page, |b, &page| {
            b.iter(|| black_box(paginator.paginate(&items, page)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_vocabulary_build,
    bench_filtering,
    bench_facet_counts,
    bench_pagination
);
criterion_main!(benches);
