//! Server-rendered HTML for the recipe detail page.

use data_loader::Recipe;
use html_escape::encode_text;

const NOT_AVAILABLE: &str = "N/A";

/// Nutrition table rows, in display order.
const NUTRIENT_LABELS: &[(&str, &str)] = &[
    ("calories", "Calories"),
    ("carbohydrateContent", "Carbohydrates"),
    ("cholesterolContent", "Cholesterol"),
    ("fiberContent", "Fiber"),
    ("proteinContent", "Protein"),
    ("saturatedFatContent", "Saturated Fat"),
    ("sodiumContent", "Sodium"),
    ("sugarContent", "Sugar"),
    ("fatContent", "Fat"),
];

const STYLE: &str = "body{font-family:sans-serif;background:#f3f4f6;margin:0}\
main{max-width:56rem;margin:0 auto;padding:2rem 1.5rem}\
.card{background:#fff;border:1px solid #e5e7eb;border-radius:.5rem;padding:1.5rem}\
.box{border:1px solid #e5e7eb;border-radius:.5rem;padding:1rem;margin:1.5rem 0}\
table{width:100%;border-collapse:collapse}td,th{padding:.5rem .75rem;border-bottom:1px solid #f3f4f6}\
td.amount,th.amount{text-align:right}";

/// "115 min", or N/A when the time is missing or zero.
fn minutes(value: Option<f64>) -> String {
    match value {
        Some(m) if m != 0.0 => format!("{m} min"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn text_or_blank(value: Option<&str>) -> String {
    encode_text(value.unwrap_or_default()).into_owned()
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n\
         <a href=\"/\">&larr; Back to Recipes</a>\n{body}</main>\n</body>\n</html>\n",
        encode_text(title)
    )
}

/// Full detail page for one recipe.
pub fn render_recipe_page(recipe: &Recipe) -> String {
    let title = recipe.title.as_deref().unwrap_or("Untitled recipe");

    let nutrient_rows: String = NUTRIENT_LABELS
        .iter()
        .map(|(key, label)| {
            let amount = recipe
                .nutrients
                .get(*key)
                .filter(|amount| !amount.is_empty())
                .map_or(NOT_AVAILABLE, String::as_str);
            format!(
                "<tr><td>{label}</td><td class=\"amount\">{}</td></tr>\n",
                encode_text(amount)
            )
        })
        .collect();

    let body = format!(
        "<div class=\"card\">\n<h1>{title}</h1>\n<p class=\"cuisine\">{cuisine}</p>\n\
         <h3>Description</h3>\n<p>{description}</p>\n\
         <div class=\"box\">\n<h3>Total Time: <span>{total}</span></h3>\n\
         <p>Prep Time: <strong>{prep}</strong></p>\n<p>Cook Time: <strong>{cook}</strong></p>\n</div>\n\
         <h3>Nutrition</h3>\n<table>\n\
         <thead><tr><th>Nutrient</th><th class=\"amount\">Amount</th></tr></thead>\n\
         <tbody>\n{nutrient_rows}</tbody>\n</table>\n\
         <div class=\"box\">\n<h3>Ingredients</h3>\n<ul>\n{ingredients}</ul>\n</div>\n\
         <div class=\"box\">\n<h3>Instructions</h3>\n<ol>\n{instructions}</ol>\n</div>\n\
         <div class=\"box\"><p><strong>Serves:</strong> {serves}</p></div>\n</div>\n",
        title = encode_text(title),
        cuisine = text_or_blank(recipe.cuisine.as_deref()),
        description = text_or_blank(recipe.description.as_deref()),
        total = minutes(recipe.total_time),
        prep = minutes(recipe.prep_time),
        cook = minutes(recipe.cook_time),
        ingredients = list_items(&recipe.ingredients),
        instructions = list_items(&recipe.instructions),
        serves = text_or_blank(recipe.serves.as_deref()),
    );

    page(title, &body)
}

/// One escaped `<li>` per entry, in order.
fn list_items(entries: &[String]) -> String {
    entries
        .iter()
        .map(|entry| format!("<li>{}</li>\n", encode_text(entry)))
        .collect()
}

/// Page shown for an unknown or malformed recipe id.
pub fn render_not_found(id: &str) -> String {
    page(
        "Recipe not found",
        &format!(
            "<div class=\"card\">\n<h1>Recipe not found</h1>\n<p>No recipe with id <code>{}</code>.</p>\n</div>\n",
            encode_text(id)
        ),
    )
}
