use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of an item, as supplied by the data source
pub type ItemId = u32;

/// Dense position of an item in registration order
pub type Slot = u32;

/// Insertion-ordered set of facet values
pub type TagSet = IndexSet<String, ahash::RandomState>;

/// A filterable dimension of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Ingredients,
    Appliances,
    Utensils,
}

impl Facet {
    /// All facets in their canonical order
    pub const ALL: [Facet; 3] = [Facet::Ingredients, Facet::Appliances, Facet::Utensils];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Ingredients => "ingredients",
            Facet::Appliances => "appliances",
            Facet::Utensils => "utensils",
        }
    }

    /// Position of the facet in [`Facet::ALL`]
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Facet::Ingredients => 0,
            Facet::Appliances => 1,
            Facet::Utensils => 2,
        }
    }

    /// Whether an item holds at most one value for this facet.
    ///
    /// Single-valued facets match by membership in the selection (OR),
    /// multi-valued facets require every selected tag (AND).
    pub fn is_single_valued(&self) -> bool {
        matches!(self, Facet::Appliances)
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a facet name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFacet(pub String);

impl fmt::Display for UnknownFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown facet '{}'", self.0)
    }
}

impl std::error::Error for UnknownFacet {}

impl FromStr for Facet {
    type Err = UnknownFacet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ingredients" => Ok(Facet::Ingredients),
            "appliances" => Ok(Facet::Appliances),
            "utensils" => Ok(Facet::Utensils),
            other => Err(UnknownFacet(other.to_string())),
        }
    }
}

/// One ingredient line of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "ingredient")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
        }
    }
}

/// An immutable entry of the searchable collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Preparation time in minutes
    #[serde(default)]
    pub time: u32,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub appliance: String,
    #[serde(default)]
    pub utensils: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Item {
    /// Values this item carries for `facet`, in declaration order
    pub fn facet_values(&self, facet: Facet) -> FacetValues<'_> {
        match facet {
            Facet::Ingredients => FacetValues::Ingredients(self.ingredients.iter()),
            Facet::Appliances => FacetValues::Single(Some(self.appliance.as_str())),
            Facet::Utensils => FacetValues::Strings(self.utensils.iter()),
        }
    }
}

/// Iterator over the values of one facet of an [`Item`]
pub enum FacetValues<'a> {
    Ingredients(std::slice::Iter<'a, Ingredient>),
    Strings(std::slice::Iter<'a, String>),
    Single(Option<&'a str>),
}

impl<'a> Iterator for FacetValues<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        match self {
            FacetValues::Ingredients(iter) => iter.next().map(|i| i.name.as_str()),
            FacetValues::Strings(iter) => iter.next().map(String::as_str),
            // An absent appliance carries no facet value
            FacetValues::Single(value) => value.take().filter(|v| !v.is_empty()),
        }
    }
}

/// Engine tuning knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of confirmed matches flushed early as a partial batch
    #[serde(default = "default_partial_batch_size")]
    pub partial_batch_size: usize,
    /// Emit a partial batch before the scan completes
    #[serde(default = "default_streaming")]
    pub streaming: bool,
}

fn default_partial_batch_size() -> usize {
    3
}

fn default_streaming() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            partial_batch_size: default_partial_batch_size(),
            streaming: default_streaming(),
        }
    }
}
