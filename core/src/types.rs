//! Domain DTOs for Brewfather batch documents.
//!
//! # Design
//! Brewfather has shipped several shapes of the same documents over time
//! (style references on recipes, extra fermentable and yeast attributes,
//! additional batch metrics). These types are the union of all of them and
//! every field defaults, so older and partial documents decode cleanly.
//!
//! Brewing metrics are `Option<f64>` because the API emits `null` for values
//! it has not computed. Every other field also accepts `null` and falls back
//! to its default, so one null never sinks a whole list. The derived getters on `Batch` treat `None` and `0.0`
//! the same way: both mean "not set".

use serde::{Deserialize, Deserializer, Serialize};

use crate::datetime::DateTime;

/// A single brew run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Batch {
    #[serde(rename = "_id", deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "batchNo", deserialize_with = "nullable")]
    pub batch_number: i64,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub brewer: String,
    #[serde(deserialize_with = "nullable")]
    pub author: String,
    pub brew_date: Option<DateTime>,
    pub fermentation_start_date: Option<DateTime>,
    pub bottling_date: Option<DateTime>,
    // Brewfather's own spelling.
    #[serde(rename = "carboationType", deserialize_with = "nullable")]
    pub carbonation_type: String,

    pub og: Option<f64>,
    pub og_plato: Option<f64>,
    pub fg: Option<f64>,
    pub abv: Option<f64>,
    pub ibu: Option<f64>,
    pub bu_gu_ratio: Option<f64>,
    pub color: Option<f64>,

    pub estimated_og: Option<f64>,
    pub estimated_fg: Option<f64>,
    pub estimated_ibu: Option<f64>,
    pub estimated_bu_gu_ratio: Option<f64>,
    pub estimated_color: Option<f64>,
    pub estimated_rb_ratio: Option<f64>,

    pub measured_og: Option<f64>,
    pub measured_fg: Option<f64>,
    pub measured_abv: Option<f64>,
    pub measured_attenuation: Option<f64>,
    pub measured_batch_size: Option<f64>,
    pub measured_efficiency: Option<f64>,
    pub measured_mash_efficiency: Option<f64>,

    #[serde(deserialize_with = "nullable")]
    pub nutrition: Nutrition,
    #[serde(deserialize_with = "nullable")]
    pub batch_notes: String,
    #[serde(deserialize_with = "nullable")]
    pub notes: Vec<Note>,
    pub recipe: Option<Recipe>,

    #[serde(rename = "batchHops", deserialize_with = "nullable")]
    pub hops: Vec<Hop>,
    #[serde(rename = "batchFermentables", deserialize_with = "nullable")]
    pub fermentables: Vec<Fermentable>,
    #[serde(rename = "batchYeasts", deserialize_with = "nullable")]
    pub yeasts: Vec<Yeast>,
    #[serde(rename = "batchMiscsLocal", deserialize_with = "nullable")]
    pub miscs: Vec<Miscs>,
}

/// Decodes JSON `null` as the field's default, the same as a missing key.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Non-zero value, with `None` and `0.0` both counting as unset.
fn set(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

impl Batch {
    /// Measured ABV if set, otherwise the plain ABV.
    pub fn abv(&self) -> f64 {
        set(self.measured_abv).or(self.abv).unwrap_or_default()
    }

    /// Plain OG if set, otherwise the estimate.
    pub fn og(&self) -> f64 {
        set(self.og).or(self.estimated_og).unwrap_or_default()
    }

    /// Measured FG, then estimated FG, then the plain field.
    pub fn fg(&self) -> f64 {
        set(self.measured_fg)
            .or(set(self.estimated_fg))
            .or(self.fg)
            .unwrap_or_default()
    }

    /// Plain IBU if set, otherwise the estimate.
    pub fn ibu(&self) -> f64 {
        set(self.ibu).or(self.estimated_ibu).unwrap_or_default()
    }

    /// Plain BU:GU ratio if set, otherwise the estimate.
    pub fn bu_gu_ratio(&self) -> f64 {
        set(self.bu_gu_ratio)
            .or(self.estimated_bu_gu_ratio)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrition {
    #[serde(deserialize_with = "nullable")]
    pub calories: Total,
    #[serde(deserialize_with = "nullable")]
    pub carbs: Total,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Total {
    #[serde(deserialize_with = "nullable")]
    pub total: f64,
}

/// A timestamped status annotation on a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    pub timestamp: Option<DateTime>,
    // Capitalised on the wire.
    #[serde(rename = "Status", deserialize_with = "nullable")]
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub note: String,
}

/// The recipe a batch was brewed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    #[serde(rename = "_id", deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub author: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub attenuation: f64,
    #[serde(deserialize_with = "nullable")]
    pub data: RecipeData,
    #[serde(deserialize_with = "nullable")]
    pub fermentables: Vec<Fermentable>,
    #[serde(deserialize_with = "nullable")]
    pub hops: Vec<Hop>,
    #[serde(deserialize_with = "nullable")]
    pub yeasts: Vec<Yeast>,
    #[serde(deserialize_with = "nullable")]
    pub miscs: Vec<Miscs>,
    #[serde(deserialize_with = "nullable")]
    pub sum_dry_hop_per_liter: f64,
    pub style: Option<Style>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeData {
    #[serde(deserialize_with = "nullable")]
    pub mash_fermentables: Vec<Fermentable>,
}

/// A beer style and its target ranges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    #[serde(rename = "_id", deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub category: String,
    #[serde(deserialize_with = "nullable")]
    pub category_number: String,
    #[serde(deserialize_with = "nullable")]
    pub style_letter: String,
    #[serde(deserialize_with = "nullable")]
    pub style_guide: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub og_min: f64,
    #[serde(deserialize_with = "nullable")]
    pub og_max: f64,
    #[serde(deserialize_with = "nullable")]
    pub fg_min: f64,
    #[serde(deserialize_with = "nullable")]
    pub fg_max: f64,
    #[serde(deserialize_with = "nullable")]
    pub ibu_min: f64,
    #[serde(deserialize_with = "nullable")]
    pub ibu_max: f64,
    #[serde(deserialize_with = "nullable")]
    pub color_min: f64,
    #[serde(deserialize_with = "nullable")]
    pub color_max: f64,
    #[serde(deserialize_with = "nullable")]
    pub abv_min: f64,
    #[serde(deserialize_with = "nullable")]
    pub abv_max: f64,
    #[serde(deserialize_with = "nullable")]
    pub bu_gu_min: f64,
    #[serde(deserialize_with = "nullable")]
    pub bu_gu_max: f64,
    #[serde(deserialize_with = "nullable")]
    pub carb_min: f64,
    #[serde(deserialize_with = "nullable")]
    pub carb_max: f64,
}

impl Style {
    /// Whether `og` falls inside the style's OG range, bounds included.
    pub fn og_in_range(&self, og: f64) -> bool {
        (self.og_min..=self.og_max).contains(&og)
    }

    pub fn abv_in_range(&self, abv: f64) -> bool {
        (self.abv_min..=self.abv_max).contains(&abv)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hop {
    #[serde(rename = "_id", deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "_rev", deserialize_with = "nullable")]
    pub rev: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub origin: String,
    /// Grams.
    #[serde(deserialize_with = "nullable")]
    pub amount: f64,
    #[serde(deserialize_with = "nullable")]
    pub alpha: f64,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(rename = "use", deserialize_with = "nullable")]
    pub usage_stage: String,
    #[serde(deserialize_with = "nullable")]
    pub usage: String,
    /// Minutes.
    #[serde(deserialize_with = "nullable")]
    pub time: f64,
    #[serde(deserialize_with = "nullable")]
    pub ibu: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fermentable {
    #[serde(rename = "_id", deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "_rev", deserialize_with = "nullable")]
    pub rev: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub supplier: String,
    #[serde(deserialize_with = "nullable")]
    pub origin: String,
    #[serde(deserialize_with = "nullable")]
    pub notes: String,
    #[serde(deserialize_with = "nullable")]
    pub grain_category: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub color: f64,
    #[serde(rename = "amount", deserialize_with = "nullable")]
    pub amount_kg: f64,
    #[serde(deserialize_with = "nullable")]
    pub potential: f64,
    #[serde(deserialize_with = "nullable")]
    pub potential_percentage: f64,
    #[serde(deserialize_with = "nullable")]
    pub attenuation: f64,
    #[serde(deserialize_with = "nullable")]
    pub percentage: f64,
    #[serde(deserialize_with = "nullable")]
    pub moisture: f64,
    #[serde(deserialize_with = "nullable")]
    pub diastatic_power: f64,
    #[serde(deserialize_with = "nullable")]
    pub protein: f64,
    #[serde(deserialize_with = "nullable")]
    pub not_fermentable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Yeast {
    #[serde(rename = "_id", deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "_rev", deserialize_with = "nullable")]
    pub rev: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub laboratory: String,
    #[serde(deserialize_with = "nullable")]
    pub product_id: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub form: String,
    #[serde(deserialize_with = "nullable")]
    pub flocculation: String,
    #[serde(deserialize_with = "nullable")]
    pub attenuation: f64,
    #[serde(deserialize_with = "nullable")]
    pub min_attenuation: f64,
    #[serde(deserialize_with = "nullable")]
    pub max_attenuation: f64,
    #[serde(deserialize_with = "nullable")]
    pub amount: f64,
    #[serde(deserialize_with = "nullable")]
    pub unit: String,
    #[serde(deserialize_with = "nullable")]
    pub min_temp: f64,
    #[serde(deserialize_with = "nullable")]
    pub max_temp: f64,
    #[serde(deserialize_with = "nullable")]
    pub max_abv: f64,
}

/// A miscellaneous ingredient (salts, finings, spices, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Miscs {
    #[serde(rename = "_id", deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub amount: f64,
    #[serde(rename = "use", deserialize_with = "nullable")]
    pub usage_stage: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub unit: String,
}
