//! Benchmarks for the fitlog aggregation engine
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fitlog::aggregate::{activity_dates, compute_streak, merge_recent, Aggregator};
use fitlog::store::{Meal, NewMeal, NewWeight, NewWorkout, Store, Weight, Workout};
use std::sync::Arc;
use tempfile::tempdir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn workouts(count: usize) -> Vec<Workout> {
    (0..count)
        .map(|i| {
            let when = Utc.from_utc_datetime(
                &(today() - Duration::days(i as i64))
                    .and_hms_opt(7, 0, 0)
                    .unwrap(),
            );
            Workout::from_new(
                NewWorkout {
                    kind: "cardio".into(),
                    name: format!("Run {}", i),
                    duration: 30,
                    calories_burned: 250,
                    notes: None,
                    date: Some(when),
                },
                when,
            )
        })
        .collect()
}

fn meals(count: usize) -> Vec<Meal> {
    (0..count)
        .map(|i| {
            let when = Utc.from_utc_datetime(
                &(today() - Duration::days(i as i64))
                    .and_hms_opt(12, 30, 0)
                    .unwrap(),
            );
            Meal::from_new(
                NewMeal {
                    kind: "lunch".into(),
                    description: format!("Meal {}", i),
                    calories: 600,
                    protein: 40,
                    carbs: Some(50),
                    fat: Some(20),
                    notes: None,
                    date: Some(when),
                },
                when,
            )
        })
        .collect()
}

fn weights(count: usize) -> Vec<Weight> {
    (0..count)
        .map(|i| {
            Weight::from_new(
                NewWeight {
                    weight: 180.0 + (i % 5) as f64 * 0.4,
                    date: Some(today() - Duration::days(i as i64)),
                },
                Utc::now(),
            )
        })
        .collect()
}

fn bench_streak(c: &mut Criterion) {
    let mut group = c.benchmark_group("streak");

    for size in [30, 365, 3650] {
        let instants: Vec<_> = workouts(size).into_iter().map(|w| w.date).collect();
        let dates = activity_dates(instants.iter().copied());

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("activity_dates_{}", size), |b| {
            b.iter(|| activity_dates(black_box(instants.iter().copied())))
        });

        group.bench_function(format!("compute_streak_{}", size), |b| {
            b.iter(|| compute_streak(black_box(&dates), today()))
        });
    }

    group.finish();
}

fn bench_recent_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("recent_feed");

    for limit in [10, 50] {
        let w = workouts(limit);
        let m = meals(limit);
        let wt = weights(limit);

        group.bench_function(format!("merge_recent_{}", limit), |b| {
            b.iter(|| merge_recent(black_box(&w), black_box(&m), black_box(&wt), limit))
        });
    }

    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    let dir = tempdir().unwrap();
    let store = Arc::new(Store::open(dir.path()).unwrap());
    for workout in workouts(365) {
        store.insert(workout).unwrap();
    }
    for meal in meals(365) {
        store.insert(meal).unwrap();
    }
    for weight in weights(365) {
        store.insert(weight).unwrap();
    }
    let aggregator = Aggregator::new(Arc::clone(&store));

    group.bench_function("dashboard_stats", |b| {
        b.iter(|| aggregator.dashboard_stats(black_box(today())).unwrap())
    });

    group.bench_function("streak_365", |b| {
        b.iter(|| aggregator.streak(black_box(today())).unwrap())
    });

    group.bench_function("recent_activity_10", |b| {
        b.iter(|| aggregator.recent_activity(black_box(10)).unwrap())
    });

    group.bench_function("weight_trend_30", |b| {
        b.iter(|| aggregator.weight_trend(today(), black_box(30)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_streak, bench_recent_feed, bench_store);
criterion_main!(benches);
