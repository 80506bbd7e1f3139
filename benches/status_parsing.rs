use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ghpush::git::parser::parse_status_porcelain_v2;
use ghpush::git::remote::build_remote_url;

// A typical first push: a few edits plus many untracked files
const MIXED_STATUS: &str = "# branch.oid (initial)
# branch.head main
1 M. N... 100644 100644 100644 abc123 def456 README.md
1 .M N... 100644 100644 100644 abc123 def456 src/main.rs
1 MM N... 100644 100644 100644 abc123 def456 src/lib.rs
1 .D N... 100644 100644 100644 abc123 def456 old_file.rs
2 R. N... 100644 100644 100644 abc123 def456 R100 src/new.rs\tsrc/old.rs
? untracked1.txt
? untracked2.txt
? assets/logo.png";

fn untracked_status(num_files: usize) -> String {
    (0..num_files)
        .map(|i| format!("? dir_{}/file_{}.rs\n", i % 50, i))
        .collect()
}

fn bench_parse_status(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_status");

    group.bench_function("mixed", |b| {
        b.iter(|| parse_status_porcelain_v2(black_box(MIXED_STATUS)))
    });

    for size in [100, 1_000, 10_000] {
        let output = untracked_status(size);
        group.bench_with_input(BenchmarkId::new("untracked", size), &output, |b, output| {
            b.iter(|| parse_status_porcelain_v2(black_box(output)))
        });
    }

    group.finish();
}

fn bench_remote_url(c: &mut Criterion) {
    c.bench_function("build_remote_url_with_token", |b| {
        b.iter(|| {
            build_remote_url(
                black_box("https://github.com"),
                black_box("octocat"),
                black_box("hello-world"),
                Some((black_box("octocat"), black_box("ghp_a/b:c@d0123456789"))),
            )
        })
    });
}

criterion_group!(benches, bench_parse_status, bench_remote_url);
criterion_main!(benches);
