use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::ephemeris::{Body, GeoLocation, MeanElements, PositionProvider, DEFAULT_SPEED_STEP};
use urania::houses::{houses, HouseSystem};
use urania::time::{JulianDay, Timestamp, DEFAULT_OBLIQUITY};
use urania::{Chart, ChartSettings};

fn bench_positions(c: &mut Criterion) {
    let jd = JulianDay(2_460_410.5);

    c.bench_function("positions_all_bodies", |b| {
        b.iter(|| MeanElements.positions(black_box(&Body::ALL), black_box(jd), DEFAULT_SPEED_STEP))
    });
}

fn bench_houses(c: &mut Criterion) {
    for system in HouseSystem::ALL {
        c.bench_function(&format!("houses_{system}"), |b| {
            b.iter(|| houses(system, black_box(123.4), black_box(40.7128), DEFAULT_OBLIQUITY))
        });
    }
}

fn bench_natal_chart(c: &mut Criterion) {
    let settings = ChartSettings::default();
    let location = GeoLocation::new(40.7128, -74.0060).unwrap();
    let timestamp = Timestamp::new(2024, 4, 10, 15, 30, 0.0).unwrap();

    c.bench_function("natal_chart", |b| {
        b.iter(|| Chart::natal(black_box(timestamp), black_box(location), black_box(&settings)))
    });
}

criterion_group!(benches, bench_positions, bench_houses, bench_natal_chart);
criterion_main!(benches);
