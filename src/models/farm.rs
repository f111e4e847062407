use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropType {
    Corn,
    Wheat,
    Rice,
    Soybean,
    Tomato,
    Potato,
    Lettuce,
    Mixed,
}

impl CropType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Corn => "Corn",
            CropType::Wheat => "Wheat",
            CropType::Rice => "Rice",
            CropType::Soybean => "Soybean",
            CropType::Tomato => "Tomato",
            CropType::Potato => "Potato",
            CropType::Lettuce => "Lettuce",
            CropType::Mixed => "Mixed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "corn" | "maize" => Some(CropType::Corn),
            "wheat" => Some(CropType::Wheat),
            "rice" | "paddy" => Some(CropType::Rice),
            "soybean" | "soy" => Some(CropType::Soybean),
            "tomato" => Some(CropType::Tomato),
            "potato" => Some(CropType::Potato),
            "lettuce" => Some(CropType::Lettuce),
            "mixed" => Some(CropType::Mixed),
            _ => None,
        }
    }

    pub fn all() -> &'static [CropType] {
        &[
            CropType::Corn,
            CropType::Wheat,
            CropType::Rice,
            CropType::Soybean,
            CropType::Tomato,
            CropType::Potato,
            CropType::Lettuce,
            CropType::Mixed,
        ]
    }

    /// Legumes fix atmospheric nitrogen and tolerate leaner soil N.
    pub fn is_nitrogen_fixing(&self) -> bool {
        matches!(self, CropType::Soybean)
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub crop_type: CropType,
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Farm {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, crop_type: CropType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            name: name.into(),
            crop_type,
            location: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl Default for Farm {
    fn default() -> Self {
        Self::new("demo", "Main Farm", CropType::Mixed)
    }
}
