use chrono::Local;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use logx::formatter::{JsonFormatterConfig, TextFormatterConfig};
use logx::{JsonFormatter, Level, LogEvent, LogFormatter, Location, TextFormatter};

fn benchmark_formatter(c: &mut Criterion) {
    let formatter_colored = TextFormatter::new(TextFormatterConfig { colored: true });
    let formatter_plain = TextFormatter::new(TextFormatterConfig { colored: false });
    let formatter_json = JsonFormatter::new(JsonFormatterConfig::default());

    // 基础事件
    let basic_event = LogEvent::new(
        Level::Info,
        "This is a test message".to_string(),
        Location::new("src/handler.rs", 42),
        Local::now(),
    );

    // 长路径
    let deep_location_event = LogEvent::new(
        Level::Error,
        "Error occurred in module".to_string(),
        Location::new("src/very/deep/nested/module/with_a_long_file_name.rs", 1024),
        Local::now(),
    );

    // 长消息
    let long_message_event = LogEvent::new(
        Level::Warn,
        "A".repeat(1000),
        Location::new("src/handler.rs", 7),
        Local::now(),
    );

    let mut group = c.benchmark_group("formatter");

    // Baseline: 什么都不做的基准测试
    group.bench_function("baseline", |b| {
        b.iter(|| {
            black_box(());
        })
    });

    let cases: [(&str, &LogEvent); 3] = [
        ("basic", &basic_event),
        ("deep_location", &deep_location_event),
        ("long_message", &long_message_event),
    ];

    for (name, event) in cases {
        group.bench_with_input(BenchmarkId::new("plain", name), event, |b, event: &LogEvent| {
            b.iter(|| black_box(formatter_plain.format(black_box(event)).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("colored", name), event, |b, event: &LogEvent| {
            b.iter(|| black_box(formatter_colored.format(black_box(event)).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("json", name), event, |b, event: &LogEvent| {
            b.iter(|| black_box(formatter_json.format(black_box(event)).unwrap()))
        });
    }

    group.finish();
}

fn benchmark_throughput(c: &mut Criterion) {
    let formatter = TextFormatter::new(TextFormatterConfig { colored: false });

    let mut group = c.benchmark_group("throughput");
    group.throughput(criterion::Throughput::Elements(1));

    for level in [Level::Error, Level::Warn, Level::Info, Level::Debug] {
        let event = LogEvent::new(
            level,
            "Benchmark message".to_string(),
            Location::new("src/bench.rs", 1),
            Local::now(),
        );

        group.bench_with_input(
            BenchmarkId::from_parameter(level.tag()),
            &event,
            |b, event| b.iter(|| black_box(formatter.format(black_box(event)).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_formatter, benchmark_throughput);
criterion_main!(benches);
