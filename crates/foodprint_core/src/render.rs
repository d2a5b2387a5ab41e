//! HTML fragments for the analysis and leaderboard sections
//!
//! Markup is replaced wholesale on every render. All server-supplied text is
//! escaped before interpolation.

use crate::messages::Messages;
use crate::types::{AnalysisReport, DetectedItem, EmissionResults, LeaderboardEntry, Recipe};

/// Id of the button rendered inside the emission summary
pub const CONTRIBUTE_BUTTON_ID: &str = "contribute-btn";

/// Escape text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format with exactly one decimal place, rounding like `toFixed(1)`
///
/// Magnitudes of 1e21 and above fall back to [`format_number`], as
/// `toFixed` does.
pub fn fixed1(value: f64) -> String {
    if value == 0.0 {
        return "0.0".to_string();
    }
    if !value.is_finite() || value.abs() >= 1e21 {
        return format_number(value);
    }

    // x.25 and x.75 are the only exact ties; those round away from zero.
    let quarters = value.abs() * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return format!("{:.1}", (value * 10.0).round() / 10.0);
    }

    format!("{:.1}", value)
}

/// Format a plain number the way the page prints it
///
/// Integers come out without a fraction and others in shortest form.
/// Magnitudes of 1e21 and above or below 1e-6 use exponent notation
/// (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }

    format!("{}", value)
}

/// Render the detected items, recipes and emission summary blocks
pub fn analysis_html(report: &AnalysisReport, messages: &Messages) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        "<h3>{}</h3>\n<div class=\"item-list\">\n",
        messages.detected_items_heading
    ));
    for item in &report.detected_items {
        html.push_str(&item_card(item, messages));
    }
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<h3>{}</h3>\n<div class=\"recipe-list\">\n",
        messages.recipes_heading
    ));
    for recipe in &report.recommended_recipes {
        html.push_str(&recipe_card(recipe, messages));
    }
    html.push_str("</div>\n");

    html.push_str(&emission_summary(&report.emission_results, messages));
    html
}

fn item_card(item: &DetectedItem, messages: &Messages) -> String {
    let class = if item.is_expiring() {
        "item-card expiring"
    } else {
        "item-card"
    };

    format!(
        "<div class=\"{class}\">\n\
         <h4>{name}</h4>\n\
         <p>{quantity_label} {quantity}</p>\n\
         <p>{expires_label} {days} {days_unit}</p>\n\
         </div>\n",
        name = escape_html(&item.name),
        quantity_label = messages.quantity_label,
        quantity = format_number(item.quantity),
        expires_label = messages.expires_in_label,
        days = item.days_until_expiry,
        days_unit = messages.days_unit,
    )
}

fn recipe_card(recipe: &Recipe, messages: &Messages) -> String {
    format!(
        "<div class=\"recipe-card\">\n\
         <h4>{name}</h4>\n\
         <p>{time_label} {time} {minutes}</p>\n\
         <p>{ingredients_label} {ingredients}</p>\n\
         <p>{instructions_label} {instructions}</p>\n\
         </div>\n",
        name = escape_html(&recipe.name),
        time_label = messages.preparation_time_label,
        time = format_number(recipe.preparation_time),
        minutes = messages.minutes_unit,
        ingredients_label = messages.ingredients_label,
        ingredients = escape_html(&recipe.ingredients.join(", ")),
        instructions_label = messages.instructions_label,
        instructions = escape_html(&recipe.instructions),
    )
}

fn emission_summary(results: &EmissionResults, messages: &Messages) -> String {
    format!(
        "<div class=\"emission-summary\">\n\
         <h3>{heading}</h3>\n\
         <p>{avoided_label} <strong>{avoided} kg CO2</strong></p>\n\
         <p>{saved_label} <strong>{saved} {of} {total} {items}</strong></p>\n\
         <p>{prevented_label} <strong>{percentage}%</strong></p>\n\
         <button id=\"{button_id}\">{button}</button>\n\
         </div>\n",
        heading = messages.impact_heading,
        avoided_label = messages.avoided_emissions_label,
        avoided = format_number(results.avoided_emissions_kg),
        saved_label = messages.items_saved_label,
        saved = format_number(results.items_saved),
        of = messages.items_of,
        total = format_number(results.total_items),
        items = messages.items_unit,
        prevented_label = messages.waste_prevented_label,
        percentage = fixed1(results.waste_prevented_percentage),
        button_id = CONTRIBUTE_BUTTON_ID,
        button = messages.contribute_button,
    )
}

/// Render the leaderboard rows in server order, first row marked as top
pub fn leaderboard_html(entries: &[LeaderboardEntry], messages: &Messages) -> String {
    let mut html = String::from("<div class=\"leaderboard-list\">\n");

    if entries.is_empty() {
        html.push_str(&format!("<p>{}</p>\n", messages.no_contributors));
    }

    for (index, entry) in entries.iter().enumerate() {
        let span = if index == 0 {
            "<span class=\"top-contributor\">"
        } else {
            "<span>"
        };
        html.push_str(&format!(
            "<div class=\"leaderboard-item\">\n\
             {span}{rank}. {username}</span>\n\
             {span}{total} kg CO2</span>\n\
             </div>\n",
            rank = index + 1,
            username = escape_html(&entry.username),
            total = fixed1(entry.total_emissions_avoided),
        ));
    }

    html.push_str("</div>\n");
    html
}
