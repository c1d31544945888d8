use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ecotrack::carbon;
use ecotrack::models::{Activity, ActivityType};

/// Build a month of synthetic activities: a commute, a daily meal, and a
/// weekly electricity reading.
fn month_of_activities() -> Vec<Activity> {
    let mut activities = Vec::new();

    for day in 1..=30u32 {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 1, day).unwrap();

        let mode = if day % 2 == 0 { "car" } else { "metro_train" };
        let commute = carbon::transportation(mode, 14.0);
        activities.push(Activity {
            id: format!("commute-{}", day),
            user_id: "bench-user".to_string(),
            activity_type: ActivityType::Transportation,
            transportation_mode: Some(mode.to_string()),
            distance_km: Some(14.0),
            energy_kwh: None,
            diet_type: None,
            carbon_kg: commute.carbon_kg,
            points_earned: commute.points_earned,
            activity_date: date,
            created_at: "2026-01-31T00:00:00Z".to_string(),
        });

        let meal = carbon::food("traditional-vegetarian");
        activities.push(Activity {
            id: format!("meal-{}", day),
            user_id: "bench-user".to_string(),
            activity_type: ActivityType::Food,
            transportation_mode: None,
            distance_km: None,
            energy_kwh: None,
            diet_type: Some("traditional-vegetarian".to_string()),
            carbon_kg: meal.carbon_kg,
            points_earned: meal.points_earned,
            activity_date: date,
            created_at: "2026-01-31T00:00:00Z".to_string(),
        });

        if day % 7 == 0 {
            let reading = carbon::energy(180.0);
            activities.push(Activity {
                id: format!("energy-{}", day),
                user_id: "bench-user".to_string(),
                activity_type: ActivityType::Energy,
                transportation_mode: None,
                distance_km: None,
                energy_kwh: Some(180.0),
                diet_type: None,
                carbon_kg: reading.carbon_kg,
                points_earned: reading.points_earned,
                activity_date: date,
                created_at: "2026-01-31T00:00:00Z".to_string(),
            });
        }
    }

    activities
}

fn benchmark_calculator(c: &mut Criterion) {
    c.bench_function("transportation_conversion", |b| {
        b.iter(|| carbon::transportation(black_box("auto_rickshaw"), black_box(12.5)))
    });

    let activities = month_of_activities();
    let total_carbon: f64 = activities.iter().map(|a| a.carbon_kg).sum();

    c.bench_function("recommendations_month_window", |b| {
        b.iter(|| carbon::recommendations(black_box(&activities), black_box(total_carbon)))
    });
}

criterion_group!(benches, benchmark_calculator);
criterion_main!(benches);
