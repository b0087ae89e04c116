//! Factory functions for creating test data.
//!
//! Provides ready-made contacts, orders and filled-in forms for tests.

use shared::{ContactInfo, Material, OrderSpec, OrderSubmission};

use crate::state::form::{FormEvent, FormState};

/// The reference customer
pub fn jane_doe() -> ContactInfo {
    ContactInfo {
        name: "Jane Doe".to_string(),
        email: "jane@x.com".to_string(),
        phone: "555-0100".to_string(),
    }
}

/// 10 x 5 x 2 block with eye bolt holes
pub fn sample_order() -> OrderSpec {
    OrderSpec {
        length: 10.0,
        width: 5.0,
        height: 2.0,
        quantity: 1,
        material: Material::Cast5000,
        rough_cutting: false,
        eye_bolt_holes: true,
        mounting_holes: false,
        additional_comments: String::new(),
    }
}

pub fn sample_submission() -> OrderSubmission {
    OrderSubmission {
        contact_info: jane_doe(),
        order: sample_order(),
    }
}

/// Edits that turn a default form into [`sample_submission`]
pub fn sample_edits() -> Vec<FormEvent> {
    let contact = jane_doe();
    vec![
        FormEvent::input("name", contact.name),
        FormEvent::input("email", contact.email),
        FormEvent::input("phone", contact.phone),
        FormEvent::toggle("eyeBoltHoles"),
    ]
}

/// A form filled in the way a user would, one field at a time
pub fn filled_form() -> FormState {
    let mut form = FormState::default();
    for event in sample_edits() {
        // Fixture edits are all valid field names.
        let _ = form.apply(event);
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_form_matches_sample() {
        assert_eq!(filled_form().submission(), Ok(sample_submission()));
    }
}
