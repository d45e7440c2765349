use criterion::{Criterion, criterion_group, criterion_main};
use jsonmend::{Options, repair, repair_to_value};

fn bench_repair(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair");
    let cases = vec![
        r#"{a:1}"#,
        r#"// comment
        {"a": 1, /*b*/ "b": 2,}
        "#,
        r#"```json
        {c:3}
        ```
        "#,
        r#"{"text": "The quick brown fox, \n jumps""#,
        r#"Here is the JSON: {"items": [1, 2, 3,], "done": True}"#,
    ];
    let opts = Options::default();
    for (i, s) in cases.into_iter().enumerate() {
        group.bench_function(format!("case_{}", i), |b| {
            b.iter(|| {
                let out = repair(std::hint::black_box(s), &opts).unwrap();
                std::hint::black_box(out);
            })
        });
    }
    group.finish();
}

fn bench_valid_fast_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_path");
    let mut payload = String::from("[");
    for i in 0..1_000 {
        if i > 0 {
            payload.push(',');
        }
        payload.push_str(&format!(r#"{{"id":{i},"name":"item {i}","ok":true}}"#));
    }
    payload.push(']');
    let opts = Options::default();
    let engine = Options {
        skip_initial_validation: true,
        ..Options::default()
    };
    group.bench_function("validated", |b| {
        b.iter(|| std::hint::black_box(repair_to_value(std::hint::black_box(&payload), &opts)))
    });
    group.bench_function("engine_only", |b| {
        b.iter(|| std::hint::black_box(repair_to_value(std::hint::black_box(&payload), &engine)))
    });
    group.finish();
}

criterion_group!(benches, bench_repair, bench_valid_fast_path);
criterion_main!(benches);
