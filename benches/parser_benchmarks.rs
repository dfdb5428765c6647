use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use snapconfig::{ConfigOptions, EscapeTable, LineParser, assemble};

/// Generate a flat configuration with the given number of variables
fn generate_flat_config(variables: usize) -> String {
    let mut content = String::from("# generated configuration\n\n");
    for i in 0..variables {
        content.push_str(&format!("key_{}: value number {}\n", i, i));
        if i % 10 == 0 {
            content.push_str("# section comment\n\n");
        }
    }
    content
}

/// Generate a configuration where every value spans several lines and carries escapes
fn generate_multiline_config(variables: usize, lines_per_value: usize) -> String {
    let mut content = String::new();
    for i in 0..variables {
        content.push_str(&format!("multi_{}: first\\tline \\\n", i));
        for line in 1..lines_per_value {
            if line + 1 == lines_per_value {
                content.push_str(&format!("    last line {}\\n\n", line));
            } else {
                content.push_str(&format!("    middle line {} \\\n", line));
            }
        }
    }
    content
}

/// Benchmark assembling flat configurations of growing size
fn bench_assemble_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble_flat");
    let options = ConfigOptions::default();
    let escapes = EscapeTable::new(options.escape);

    for size in [10, 100, 1_000, 10_000] {
        let content = generate_flat_config(size);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            b.iter(|| assemble(black_box(content).lines(), &options, &escapes));
        });
    }

    group.finish();
}

/// Benchmark continuation joining and escape decoding
fn bench_assemble_multiline(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble_multiline");
    let options = ConfigOptions::default();
    let escapes = EscapeTable::new(options.escape);

    for lines in [2, 8, 32] {
        let content = generate_multiline_config(500, lines);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &content, |b, content| {
            b.iter(|| assemble(black_box(content).lines(), &options, &escapes));
        });
    }

    group.finish();
}

/// Benchmark single line parsing and escape resolution
fn bench_line_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_primitives");
    let parser = LineParser::default();
    let escapes = EscapeTable::default();

    group.bench_function("parse_simple", |b| {
        b.iter(|| parser.parse(black_box("  server name  :  example.org  "), 1));
    });
    group.bench_function("parse_no_strip", |b| {
        b.iter(|| parser.parse(black_box("banner::   keep   this   "), 1));
    });
    group.bench_function("resolve_escapes", |b| {
        b.iter(|| escapes.resolve(black_box("tab\\there\\nnewline \\\\ backslash \\q")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_assemble_flat,
    bench_assemble_multiline,
    bench_line_primitives
);
criterion_main!(benches);
