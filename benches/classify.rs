//! Benchmarks for token classification
//!
//! Run with: cargo bench --bench classify

use typemark::profile::Profile;
use typemark::{Classifier, TypeNames};

fn main() {
    divan::main();
}

fn pmemobj() -> Classifier {
    Classifier::new(Profile::from_builtin("libpmemobj").unwrap().names)
}

#[divan::bench(args = ["PMEMobjpool", "TOID", "pop", ""])]
fn classify_token(bencher: divan::Bencher, token: &str) {
    let classifier = pmemobj();
    bencher.bench_local(|| {
        divan::black_box(classifier.classify(divan::black_box(token), Some("(")));
    });
}

#[divan::bench(args = [10, 1000, 100_000])]
fn classify_with_large_profile(bencher: divan::Bencher, size: usize) {
    let known: Vec<String> = (0..size).map(|i| format!("type_{i}")).collect();
    let classifier = Classifier::new(TypeNames::new(known, ["TOID"]));
    bencher.bench_local(|| {
        divan::black_box(classifier.classify(divan::black_box("type_7"), None));
    });
}
