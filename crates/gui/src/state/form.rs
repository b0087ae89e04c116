//! Contact and order form state.
//!
//! Updates arrive keyed by field name, the same camelCase names the order
//! payload uses. Text updates replace the stored raw value verbatim; checkbox
//! updates toggle. Typed values only exist after going through
//! [`crate::validation`].

use shared::{ContactInfo, Material, OrderSpec, OrderSubmission};
use thiserror::Error;

use crate::validation::{self, ValidationError};

/// Every editable form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Length,
    Width,
    Height,
    Quantity,
    Material,
    RoughCutting,
    EyeBoltHoles,
    MountingHoles,
    AdditionalComments,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Length,
        Field::Width,
        Field::Height,
        Field::Quantity,
        Field::Material,
        Field::RoughCutting,
        Field::EyeBoltHoles,
        Field::MountingHoles,
        Field::AdditionalComments,
    ];

    /// Form/wire name of the field
    pub fn name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Length => "length",
            Field::Width => "width",
            Field::Height => "height",
            Field::Quantity => "quantity",
            Field::Material => "material",
            Field::RoughCutting => "roughCutting",
            Field::EyeBoltHoles => "eyeBoltHoles",
            Field::MountingHoles => "mountingHoles",
            Field::AdditionalComments => "additionalComments",
        }
    }

    /// English label, used in validation messages
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Length => "Length",
            Field::Width => "Width",
            Field::Height => "Height",
            Field::Quantity => "Quantity",
            Field::Material => "Material",
            Field::RoughCutting => "Rough cutting",
            Field::EyeBoltHoles => "Eye bolt holes",
            Field::MountingHoles => "Mounting holes",
            Field::AdditionalComments => "Additional comments",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(
            self,
            Field::RoughCutting | Field::EyeBoltHoles | Field::MountingHoles
        )
    }

    pub fn is_dimension(&self) -> bool {
        matches!(self, Field::Length | Field::Width | Field::Height)
    }
}

/// A field-level edit coming from the UI
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Replace a text/number/select value
    Input { name: String, value: String },
    /// Flip a checkbox
    Toggle { name: String },
}

impl FormEvent {
    pub fn input(name: &str, value: impl Into<String>) -> Self {
        FormEvent::Input {
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn toggle(name: &str) -> Self {
        FormEvent::Toggle {
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown form field \"{0}\"")]
    UnknownField(String),

    #[error("field \"{0}\" is a checkbox and can only be toggled")]
    NotText(&'static str),

    #[error("field \"{0}\" is not a checkbox")]
    NotCheckbox(&'static str),

    #[error("unknown material \"{0}\"")]
    UnknownMaterial(String),
}

/// Raw order form values, exactly as typed
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub length: String,
    pub width: String,
    pub height: String,
    pub quantity: String,
    pub material: Material,
    pub rough_cutting: bool,
    pub eye_bolt_holes: bool,
    pub mounting_holes: bool,
    pub additional_comments: String,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self::from_spec(&OrderSpec::default())
    }
}

impl OrderDraft {
    /// Pre-fill a draft from typed values
    pub fn from_spec(spec: &OrderSpec) -> Self {
        Self {
            length: spec.length.to_string(),
            width: spec.width.to_string(),
            height: spec.height.to_string(),
            quantity: spec.quantity.to_string(),
            material: spec.material,
            rough_cutting: spec.rough_cutting,
            eye_bolt_holes: spec.eye_bolt_holes,
            mounting_holes: spec.mounting_holes,
            additional_comments: spec.additional_comments.clone(),
        }
    }

    /// Parse only the three dimensions. Sign is not checked.
    pub fn dimensions(&self) -> Result<BlockDimensions, ValidationError> {
        Ok(BlockDimensions {
            length: validation::parse_number(Field::Length, &self.length)?,
            width: validation::parse_number(Field::Width, &self.width)?,
            height: validation::parse_number(Field::Height, &self.height)?,
        })
    }

    /// Parse the full order. Dimensions must be positive, quantity >= 1.
    pub fn order_spec(&self) -> Result<OrderSpec, ValidationError> {
        Ok(OrderSpec {
            length: validation::parse_positive(Field::Length, &self.length)?,
            width: validation::parse_positive(Field::Width, &self.width)?,
            height: validation::parse_positive(Field::Height, &self.height)?,
            quantity: validation::parse_quantity(&self.quantity)?,
            material: self.material,
            rough_cutting: self.rough_cutting,
            eye_bolt_holes: self.eye_bolt_holes,
            mounting_holes: self.mounting_holes,
            additional_comments: self.additional_comments.clone(),
        })
    }

    fn flag_mut(&mut self, field: Field) -> Option<&mut bool> {
        match field {
            Field::RoughCutting => Some(&mut self.rough_cutting),
            Field::EyeBoltHoles => Some(&mut self.eye_bolt_holes),
            Field::MountingHoles => Some(&mut self.mounting_holes),
            _ => None,
        }
    }
}

/// Parsed block size in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl BlockDimensions {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    pub fn max_dimension(&self) -> f64 {
        self.length.max(self.width).max(self.height)
    }

    /// Zero or negative sides render as an empty or inside-out box
    pub fn is_degenerate(&self) -> bool {
        self.length <= 0.0 || self.width <= 0.0 || self.height <= 0.0
    }
}

/// Form state holder: contact record plus order draft
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub contact: ContactInfo,
    pub order: OrderDraft,
}

impl FormState {
    /// Apply one field-level edit
    pub fn apply(&mut self, event: FormEvent) -> Result<Field, FormError> {
        let result = match event {
            FormEvent::Input { name, value } => self.set_text(&name, value),
            FormEvent::Toggle { name } => self.toggle(&name),
        };
        if let Err(e) = &result {
            tracing::warn!("Rejected form update: {e}");
        }
        result
    }

    fn set_text(&mut self, name: &str, value: String) -> Result<Field, FormError> {
        let field = Field::from_name(name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        match field {
            Field::Name => self.contact.name = value,
            Field::Email => self.contact.email = value,
            Field::Phone => self.contact.phone = value,
            Field::Length => self.order.length = value,
            Field::Width => self.order.width = value,
            Field::Height => self.order.height = value,
            Field::Quantity => self.order.quantity = value,
            Field::Material => {
                self.order.material =
                    Material::from_name(&value).ok_or(FormError::UnknownMaterial(value))?;
            }
            Field::AdditionalComments => self.order.additional_comments = value,
            Field::RoughCutting | Field::EyeBoltHoles | Field::MountingHoles => {
                return Err(FormError::NotText(field.name()));
            }
        }
        Ok(field)
    }

    fn toggle(&mut self, name: &str) -> Result<Field, FormError> {
        let field = Field::from_name(name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        let flag = self
            .order
            .flag_mut(field)
            .ok_or(FormError::NotCheckbox(field.name()))?;
        *flag = !*flag;
        Ok(field)
    }

    /// Current dimensions for the preview
    pub fn dimensions(&self) -> Result<BlockDimensions, ValidationError> {
        self.order.dimensions()
    }

    /// Validate everything and build the order payload
    pub fn submission(&self) -> Result<OrderSubmission, ValidationError> {
        validation::require(Field::Name, &self.contact.name)?;
        validation::check_email(&self.contact.email)?;
        validation::require(Field::Phone, &self.contact.phone)?;
        let order = self.order.order_spec()?;
        Ok(OrderSubmission {
            contact_info: self.contact.clone(),
            order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft_values() {
        let f = FormState::default();
        assert_eq!(f.order.length, "10");
        assert_eq!(f.order.width, "5");
        assert_eq!(f.order.height, "2");
        assert_eq!(f.order.quantity, "1");
        assert_eq!(f.order.material, Material::Cast5000);
        assert!(f.contact.name.is_empty());
    }

    #[test]
    fn test_text_update_is_verbatim() {
        let mut f = FormState::default();
        f.apply(FormEvent::input("length", " 12.50")).unwrap();
        f.apply(FormEvent::input("name", "Jane Doe")).unwrap();
        assert_eq!(f.order.length, " 12.50");
        assert_eq!(f.contact.name, "Jane Doe");
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut f = FormState::default();
        let before = f.order.clone();
        f.apply(FormEvent::toggle("eyeBoltHoles")).unwrap();
        assert!(f.order.eye_bolt_holes);
        f.apply(FormEvent::toggle("eyeBoltHoles")).unwrap();
        assert_eq!(f.order, before);
    }

    #[test]
    fn test_rejected_updates_leave_state_untouched() {
        let mut f = FormState::default();
        let before = f.clone();
        assert_eq!(
            f.apply(FormEvent::input("colour", "red")),
            Err(FormError::UnknownField("colour".into()))
        );
        assert_eq!(
            f.apply(FormEvent::input("roughCutting", "true")),
            Err(FormError::NotText("roughCutting"))
        );
        assert_eq!(
            f.apply(FormEvent::toggle("length")),
            Err(FormError::NotCheckbox("length"))
        );
        assert_eq!(
            f.apply(FormEvent::input("material", "titanium")),
            Err(FormError::UnknownMaterial("titanium".into()))
        );
        assert_eq!(f, before);
    }

    #[test]
    fn test_dimensions_pass_through_non_positive() {
        let mut f = FormState::default();
        f.apply(FormEvent::input("height", "-1")).unwrap();
        let d = f.dimensions().unwrap();
        assert_eq!(d, BlockDimensions::new(10.0, 5.0, -1.0));
        assert!(d.is_degenerate());
    }

    #[test]
    fn test_dimensions_reject_non_numeric() {
        let mut f = FormState::default();
        f.apply(FormEvent::input("width", "5in")).unwrap();
        assert!(matches!(
            f.dimensions(),
            Err(ValidationError::NotANumber { field: Field::Width, .. })
        ));
    }

    #[test]
    fn test_submission_requires_contact() {
        let f = FormState::default();
        assert_eq!(
            f.submission(),
            Err(ValidationError::Required { field: Field::Name })
        );
    }

    #[test]
    fn test_submission_rejects_zero_dimension() {
        let mut f = FormState::default();
        f.apply(FormEvent::input("name", "Jane")).unwrap();
        f.apply(FormEvent::input("email", "jane@x.com")).unwrap();
        f.apply(FormEvent::input("phone", "555-0100")).unwrap();
        f.apply(FormEvent::input("length", "0")).unwrap();
        assert!(matches!(
            f.submission(),
            Err(ValidationError::NonPositive { field: Field::Length, .. })
        ));
    }

    #[test]
    fn test_field_names_roundtrip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::ALL.iter().filter(|f| f.is_checkbox()).count(), 3);
        assert_eq!(Field::ALL.iter().filter(|f| f.is_dimension()).count(), 3);
    }

    #[test]
    fn test_max_dimension() {
        assert_eq!(BlockDimensions::new(10.0, 5.0, 2.0).max_dimension(), 10.0);
        assert_eq!(BlockDimensions::new(1.0, 5.0, 7.5).max_dimension(), 7.5);
    }
}
