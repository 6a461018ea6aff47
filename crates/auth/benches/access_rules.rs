use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use shopgate_auth::{
    AccessRules, AuthoritySet, Method, Principal, Requirement, authorize, default_rules,
};
use shopgate_core::UserId;

/// Wide table where the interesting rule sits at the end.
fn wide_rules(n: usize) -> AccessRules {
    let mut builder = AccessRules::builder();
    for i in 0..n {
        builder = builder.rule(Method::Get, &format!("/area{i}/**"), Requirement::Authenticated);
    }
    builder
        .rule(Method::Get, "/admin/**", Requirement::has_authority("ROLE_ADMIN"))
        .build()
}

fn bench_evaluate(c: &mut Criterion) {
    let rules = default_rules();
    let mut group = c.benchmark_group("evaluate_default_rules");
    for (name, method, path) in [
        ("first_rule", Method::Get, "/health"),
        ("pattern_rule", Method::Get, "/admin/home"),
        ("fallthrough", Method::Delete, "/Products/apple"),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(rules.evaluate(black_box(method), black_box(path))))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("evaluate_wide_rules");
    for n in [8usize, 64, 256] {
        let rules = wide_rules(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &rules, |b, rules| {
            b.iter(|| black_box(rules.evaluate(Method::Get, black_box("/admin/deep/path/home"))))
        });
    }
    group.finish();
}

fn bench_authorize(c: &mut Criterion) {
    let principal = Principal::new(
        UserId::from_i64(1),
        "alice",
        "",
        AuthoritySet::parse("ROLE_USER,ROLE_AUDITOR,ROLE_ADMIN"),
    );
    let req = Requirement::has_any_role(&["ROLE_OPS", "ROLE_ADMIN"]);

    c.bench_function("authorize_has_any_role", |b| {
        b.iter(|| black_box(authorize(black_box(&req), Some(black_box(&principal)))))
    });
}

criterion_group!(benches, bench_evaluate, bench_authorize);
criterion_main!(benches);
