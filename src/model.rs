use serde::Deserialize;
use std::collections::HashMap;

/// Number of ingredient/measure slot pairs the catalog exposes per recipe
pub const INGREDIENT_SLOTS: usize = 20;

/// Label shown on a card when the catalog omits the category
pub const DEFAULT_CATEGORY: &str = "Main Dish";

/// One entry from an ingredient search
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumbnail_url: String,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
}

impl RecipeSummary {
    /// Category shown on the card, with a fallback for absent or blank values
    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }
}

/// Full recipe as returned by lookup-by-id.
///
/// The catalog flattens ingredients into 20 numbered `strIngredientN` /
/// `strMeasureN` field pairs; those are captured as-is in `slots` and
/// reassembled by [`RecipeDetail::ingredient_lines`].
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeDetail {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumbnail_url: String,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strYoutube", default)]
    video_url: Option<String>,
    #[serde(flatten)]
    slots: HashMap<String, Option<String>>,
}

impl RecipeDetail {
    /// Free-text cooking instructions; may embed newlines
    pub fn instructions(&self) -> &str {
        self.instructions.as_deref().unwrap_or_default()
    }

    /// Video tutorial link, treating an empty string as absent
    pub fn video_link(&self) -> Option<&str> {
        self.video_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Derive the displayable ingredient list from the numbered slots.
    ///
    /// Slots are scanned in order 1..=20. A slot whose ingredient is empty or
    /// whitespace-only is excluded entirely, even if its measure is present.
    /// A present measure is combined measure-first with the ingredient.
    pub fn ingredient_lines(&self) -> Vec<String> {
        (1..=INGREDIENT_SLOTS)
            .filter_map(|idx| {
                let ingredient = self.slot("strIngredient", idx)?;
                Some(match self.slot("strMeasure", idx) {
                    Some(measure) => format!("{measure} {ingredient}"),
                    None => ingredient.to_string(),
                })
            })
            .collect()
    }

    fn slot(&self, prefix: &str, idx: usize) -> Option<&str> {
        self.slots
            .get(&format!("{prefix}{idx}"))
            .and_then(|value| value.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(category: serde_json::Value) -> RecipeSummary {
        serde_json::from_value(json!({
            "idMeal": "52940",
            "strMeal": "Brown Stew Chicken",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/sypxpx1515365095.jpg",
            "strCategory": category,
        }))
        .unwrap()
    }

    fn detail(extra: serde_json::Value) -> RecipeDetail {
        let mut body = json!({
            "idMeal": "52940",
            "strMeal": "Brown Stew Chicken",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/sypxpx1515365095.jpg",
            "strCategory": "Chicken",
            "strArea": "Jamaican",
            "strInstructions": "Squeeze lime.\nRub chicken.",
            "strYoutube": null,
        });
        body.as_object_mut()
            .unwrap()
            .extend(extra.as_object().unwrap().clone());
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn category_label_falls_back_when_absent_or_blank() {
        assert_eq!(summary(json!("Chicken")).category_label(), "Chicken");
        assert_eq!(summary(json!(null)).category_label(), "Main Dish");
        assert_eq!(summary(json!("   ")).category_label(), "Main Dish");
    }

    #[test]
    fn ingredient_lines_combine_measure_first() {
        let detail = detail(json!({
            "strIngredient1": "Chicken",
            "strMeasure1": "1 whole",
            "strIngredient2": "Salt",
            "strMeasure2": "1 tsp",
        }));
        assert_eq!(detail.ingredient_lines(), vec!["1 whole Chicken", "1 tsp Salt"]);
    }

    #[test]
    fn ingredient_without_measure_keeps_bare_name() {
        let detail = detail(json!({
            "strIngredient1": "Salt",
            "strMeasure1": null,
            "strIngredient2": " Thyme ",
            "strMeasure2": "  ",
        }));
        assert_eq!(detail.ingredient_lines(), vec!["Salt", "Thyme"]);
    }

    #[test]
    fn blank_ingredient_slot_is_excluded_even_with_measure() {
        let detail = detail(json!({
            "strIngredient1": "Chicken",
            "strMeasure1": "1 whole",
            "strIngredient3": " ",
            "strMeasure3": "2 cups",
            "strIngredient4": "",
            "strMeasure4": "1 tbsp",
        }));
        assert_eq!(detail.ingredient_lines(), vec!["1 whole Chicken"]);
    }

    #[test]
    fn slots_keep_catalog_order() {
        let detail = detail(json!({
            "strIngredient2": "Second",
            "strMeasure2": null,
            "strIngredient10": "Tenth",
            "strMeasure10": null,
            "strIngredient1": "First",
            "strMeasure1": null,
        }));
        assert_eq!(detail.ingredient_lines(), vec!["First", "Second", "Tenth"]);
    }

    #[test]
    fn blank_video_url_reads_as_absent() {
        assert_eq!(detail(json!({})).video_link(), None);
        assert_eq!(detail(json!({ "strYoutube": "" })).video_link(), None);
        assert_eq!(
            detail(json!({ "strYoutube": "https://youtu.be/_gFB1fkNhXs" })).video_link(),
            Some("https://youtu.be/_gFB1fkNhXs")
        );
    }
}
