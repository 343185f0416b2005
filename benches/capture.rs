use std::hint::black_box;

use {
    criterion::{Criterion, criterion_group, criterion_main},
    ctxerror::{Context, Key, SharedError, capture, handler, new_context},
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
#[error("shard {0} unavailable")]
struct ShardError(u32);

struct Depth;

impl Key for Depth {
    type Value = usize;
}

fn bench_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture");

    group.bench_function("duplicate_value_error", |b| {
        let ctx = new_context(&Context::background(), Some(handler(|_, _, _| {})));
        let err = ShardError(3);
        capture(&ctx, &err);
        b.iter(|| capture(black_box(&ctx), black_box(&err)));
    });

    group.bench_function("duplicate_shared_error", |b| {
        let ctx = new_context(&Context::background(), Some(handler(|_, _, _| {})));
        let err = SharedError::from(std::io::Error::other("reset"));
        capture(&ctx, &err);
        b.iter(|| capture(black_box(&ctx), black_box(&err)));
    });

    group.bench_function("first_report", |b| {
        let ctx = new_context(&Context::background(), Some(handler(|_, _, _| {})));
        let mut next = 0;
        b.iter(|| {
            next += 1;
            capture(black_box(&ctx), &ShardError(next));
        });
    });

    group.bench_function("deep_context_lookup", |b| {
        let bound = new_context(&Context::background(), Some(handler(|_, _, _| {})));
        let ctx = (0..32).fold(bound, |ctx, depth| ctx.with_value::<Depth>(depth));
        let err = ShardError(7);
        capture(&ctx, &err);
        b.iter(|| capture(black_box(&ctx), black_box(&err)));
    });

    group.bench_function("unbound", |b| {
        let ctx = Context::background();
        let err = ShardError(1);
        b.iter(|| capture(black_box(&ctx), black_box(&err)));
    });

    group.finish();
}

criterion_group!(benches, bench_capture);
criterion_main!(benches);
