//! Benchmarks for forwarded calls
//!
//! This benchmark measures:
//! - Unmounted fast path
//! - Dynamic forwarding through `DynamicObject` and a macro-built member table
//! - Typed forwarding through a generated action handle

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use instance_actions::prelude::*;

struct Grid {
    rows: Vec<u64>,
}

impl Grid {
    fn sum(&self, from: usize) -> u64 {
        self.rows.iter().skip(from).sum()
    }
}

impl_reflect! {
    Grid {
        fn sum(from: usize);
    }
}

instance_actions! {
    struct GridActions for Grid {
        fn sum(&self, from: usize) -> u64;
    }
}

fn bench_unmounted(c: &mut Criterion) {
    let (_cell, handle) = use_instance::<DynamicObject>("Table");
    c.bench_function("call_unmounted", |b| {
        b.iter(|| black_box(handle.call("reload", Args::new()).is_err()))
    });
}

fn bench_dynamic_object(c: &mut Criterion) {
    let (cell, handle) = use_instance::<DynamicObject>("Table");
    cell.mount(DynamicObject::new().with_fn("reload", |_| Ok(Outcome::ready("ok"))));
    c.bench_function("call_dynamic_object", |b| {
        b.iter(|| black_box(handle.call("reload", Args::new()).unwrap()))
    });
}

fn bench_member_table(c: &mut Criterion) {
    let (cell, handle) = use_instance::<Grid>("Grid");
    cell.mount(Grid {
        rows: (0..64).collect(),
    });
    c.bench_function("call_member_table", |b| {
        b.iter(|| black_box(handle.call("sum", args![8]).unwrap()))
    });
}

fn bench_typed(c: &mut Criterion) {
    let (cell, handle) = use_instance::<Grid>("Grid");
    let actions = GridActions::new(handle);
    cell.mount(Grid {
        rows: (0..64).collect(),
    });
    c.bench_function("call_typed", |b| {
        b.iter(|| black_box(actions.sum(black_box(8)).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_unmounted,
    bench_dynamic_object,
    bench_member_table,
    bench_typed
);
criterion_main!(benches);
