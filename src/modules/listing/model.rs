use serde::{Deserialize, Serialize};

use crate::modules::ai::schema::ItemDescription;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Electronics,
    Books,
    Sports,
    Furniture,
    Appliances,
    Clothing,
    Vehicles,
    #[serde(rename = "Study Materials")]
    StudyMaterials,
    #[serde(rename = "Musical Instruments")]
    MusicalInstruments,
    Other,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Electronics => "Electronics",
            ItemCategory::Books => "Books",
            ItemCategory::Sports => "Sports",
            ItemCategory::Furniture => "Furniture",
            ItemCategory::Appliances => "Appliances",
            ItemCategory::Clothing => "Clothing",
            ItemCategory::Vehicles => "Vehicles",
            ItemCategory::StudyMaterials => "Study Materials",
            ItemCategory::MusicalInstruments => "Musical Instruments",
            ItemCategory::Other => "Other",
        }
    }

    pub fn all() -> Vec<ItemCategory> {
        vec![
            ItemCategory::Electronics,
            ItemCategory::Books,
            ItemCategory::Sports,
            ItemCategory::Furniture,
            ItemCategory::Appliances,
            ItemCategory::Clothing,
            ItemCategory::Vehicles,
            ItemCategory::StudyMaterials,
            ItemCategory::MusicalInstruments,
            ItemCategory::Other,
        ]
    }

    pub fn parse(label: &str) -> Option<ItemCategory> {
        Self::all().into_iter().find(|c| c.as_str() == label)
    }

    /// The model is not trusted to stay in-domain; anything unrecognized
    /// lands in Other.
    pub fn coerce(label: &str) -> ItemCategory {
        Self::parse(label).unwrap_or(ItemCategory::Other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCondition {
    #[serde(rename = "Like New")]
    LikeNew,
    Good,
    Fair,
    Worn,
}

impl ItemCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCondition::LikeNew => "Like New",
            ItemCondition::Good => "Good",
            ItemCondition::Fair => "Fair",
            ItemCondition::Worn => "Worn",
        }
    }

    pub fn all() -> Vec<ItemCondition> {
        vec![
            ItemCondition::LikeNew,
            ItemCondition::Good,
            ItemCondition::Fair,
            ItemCondition::Worn,
        ]
    }

    pub fn parse(label: &str) -> Option<ItemCondition> {
        Self::all().into_iter().find(|c| c.as_str() == label)
    }

    pub fn coerce(label: &str) -> ItemCondition {
        Self::parse(label).unwrap_or(ItemCondition::Good)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingImage {
    pub data_base64: String,
    pub mime_type: String,
}

/// The accumulating state of a listing under construction. All fields stay
/// directly editable until submission; AI assistance populates them but
/// never locks them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDraft {
    pub image: Option<ListingImage>,
    pub title: String,
    pub description: String,
    pub category: Option<ItemCategory>,
    pub condition: Option<ItemCondition>,
    pub price_per_day: f64,
    pub tags: Vec<String>,
}

impl ListingDraft {
    pub fn apply_description(&mut self, generated: &ItemDescription) {
        self.title = generated.title.clone();
        self.description = generated.description.clone();
        self.category = Some(ItemCategory::coerce(&generated.category));
        self.condition = Some(ItemCondition::coerce(&generated.condition));
        self.price_per_day = generated.suggested_price.per_day;
        self.tags = generated.tags.clone();
    }

    pub fn details_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.description.is_empty()
            && self.category.is_some()
            && self.condition.is_some()
            && self.price_per_day > 0.0
    }
}
