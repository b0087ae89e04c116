use serde::{Deserialize, Serialize};

/// Customer contact details attached to an order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Stock material for the block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    /// Cast 5000-series aluminum plate
    #[default]
    #[serde(rename = "cast5000")]
    Cast5000,
}

impl Material {
    /// Wire name, as sent in the order payload
    pub fn name(&self) -> &'static str {
        match self {
            Material::Cast5000 => "cast5000",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Material::Cast5000 => "Cast 5000",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.name() == name)
    }

    pub fn all() -> &'static [Material] {
        &[Material::Cast5000]
    }
}

/// Manufacturing parameters of one custom block (dimensions in inches)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSpec {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub quantity: u32,
    pub material: Material,
    pub rough_cutting: bool,
    pub eye_bolt_holes: bool,
    pub mounting_holes: bool,
    pub additional_comments: String,
}

impl Default for OrderSpec {
    fn default() -> Self {
        Self {
            length: 10.0,
            width: 5.0,
            height: 2.0,
            quantity: 1,
            material: Material::Cast5000,
            rough_cutting: false,
            eye_bolt_holes: false,
            mounting_holes: false,
            additional_comments: String::new(),
        }
    }
}

/// Body of the order POST: `{ "contactInfo": ..., "order": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub contact_info: ContactInfo,
    pub order: OrderSpec,
}
