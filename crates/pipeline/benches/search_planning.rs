use criterion::{Criterion, black_box, criterion_group, criterion_main};
use data_loader::{RawRecipe, Recipe, shape_record};
use pipeline::{Filter, SearchParams, SearchPlan};
use serde_json::json;

fn create_recipes(count: usize) -> Vec<Recipe> {
    (0..count)
        .map(|i| {
            let record = shape_record(&RawRecipe::from(json!({
                "title": format!("Recipe {i}"),
                "rating": (i % 50) as f64 / 10.0,
                "nutrients": { "calories": format!("{} kcal", 100 + i % 700) }
            })));
            Recipe::new(i.to_string(), record)
        })
        .collect()
}

fn bench_search_planning(c: &mut Criterion) {
    let params = SearchParams {
        title: Some("pie".into()),
        cuisine: Some("southern".into()),
        rating: Some(">=4.5".into()),
        total_time: Some("<=60".into()),
        calories: Some("<=300".into()),
    };

    c.bench_function("build_search_plan", |b| {
        b.iter(|| SearchPlan::build(black_box(&params)))
    });

    let plan = SearchPlan::build(&params);
    let calories = *plan.deferred().expect("calories filter is deferred");
    let recipes = create_recipes(2_000);

    c.bench_function("calories_filter_2000", |b| {
        b.iter(|| calories.apply(black_box(recipes.clone())))
    });
}

criterion_group!(benches, bench_search_planning);
criterion_main!(benches);
