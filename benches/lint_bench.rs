//! Rule throughput on synthetic sources with many loops and closures.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use loopguard::binder::{BinderOptions, BinderState};
use loopguard::lint::NoLoopFuncState;
use loopguard::parser::ParserState;
use loopguard::{LintOptions, lint_source};

/// A file with `count` functions, each holding nested loops whose closures
/// mix safe and unsafe captures and immediately invoked wrappers.
fn generate_loops(count: usize) -> String {
    let mut source = String::with_capacity(count * 400);
    for i in 0..count {
        source.push_str(&format!(
            r#"
function batch{i}(items, handlers) {{
    var total = 0;
    const limit = items.length;
    for (var j = 0; j < limit; j++) {{
        let item = items[j];
        handlers.push(() => item + limit);
        handlers.push(function () {{ return total + j; }});
        (function () {{ total += item; }})();
        for (const key of Object.keys(item)) {{
            while (total < limit) {{
                handlers.push(() => key + total);
                total++;
            }}
        }}
    }}
    return total;
}}
"#
        ));
    }
    source
}

fn bench_lint_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("lint_source");
    for count in [10, 100, 500] {
        let source = generate_loops(count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(format!("{count}_functions"), |b| {
            b.iter(|| {
                let result = lint_source("bench.js", black_box(&source), &LintOptions::default());
                black_box(result.findings.len())
            })
        });
    }
    group.finish();
}

/// Rule cost alone, with parsing and binding done up front.
fn bench_check_only(c: &mut Criterion) {
    let source = generate_loops(500);
    let mut parser = ParserState::new("bench.js".to_string(), source);
    let root = parser.parse_source_file();
    let arena = parser.get_arena();
    let mut binder = BinderState::new(BinderOptions::default());
    binder.bind_source_file(arena, root);

    c.bench_function("check_file_500_functions", |b| {
        b.iter(|| {
            let mut state = NoLoopFuncState::new(arena, &binder);
            black_box(state.check_file().len())
        })
    });
}

criterion_group!(benches, bench_lint_source, bench_check_only);
criterion_main!(benches);
