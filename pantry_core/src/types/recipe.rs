//! Recipe records as held by the recipe repository.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ImageId, RecipeId, UserId};

/// Publication state of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeStatus {
    Draft,
    Published,
}

impl fmt::Display for RecipeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
        }
    }
}

/// Recipe category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Starter,
    MainCourse,
    Dessert,
    Beverage,
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starter => write!(f, "starter"),
            Self::MainCourse => write!(f, "main_course"),
            Self::Dessert => write!(f, "dessert"),
            Self::Beverage => write!(f, "beverage"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A recipe record.
///
/// Owned exclusively by the user that created it; `owner` never changes
/// after creation and is the ground truth for edit capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe identifier.
    pub id: RecipeId,

    /// Recipe title.
    pub title: String,

    /// Short description.
    #[serde(default)]
    pub description: String,

    /// Ingredient list, free text.
    pub ingredients: String,

    /// Preparation instructions, markdown.
    pub instructions: String,

    /// Category.
    pub category: Category,

    /// Preparation time in minutes.
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,

    /// Date the recipe is filed under; listings sort on this, newest first.
    pub date: NaiveDate,

    /// Publication state.
    pub status: RecipeStatus,

    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// The user that created the recipe.
    pub owner: UserId,

    /// Attached photo, if any.
    #[serde(default)]
    pub image_id: Option<ImageId>,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
