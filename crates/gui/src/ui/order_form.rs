//! Contact and order form. Widgets edit scratch copies of the current values
//! and report changes as [`FormEvent`]s; the form state is only touched when
//! the app applies them.

use egui::Ui;
use shared::Material;

use crate::i18n::{field_label, t};
use nox_configurator_lib::state::form::{Field, FormEvent, FormState};
use nox_configurator_lib::validation;

pub fn show(ui: &mut Ui, form: &FormState, events: &mut Vec<FormEvent>) {
    section(ui, t("form.contact"));
    egui::Grid::new("contact_fields")
        .num_columns(2)
        .spacing([10.0, 6.0])
        .show(ui, |ui| {
            text_row(ui, Field::Name, &form.contact.name, events);
            text_row(ui, Field::Email, &form.contact.email, events);
            text_row(ui, Field::Phone, &form.contact.phone, events);
        });

    ui.add_space(10.0);
    section(ui, t("form.order"));
    egui::Grid::new("order_fields")
        .num_columns(2)
        .spacing([10.0, 6.0])
        .show(ui, |ui| {
            number_row(ui, Field::Length, &form.order.length, "in", events);
            number_row(ui, Field::Width, &form.order.width, "in", events);
            number_row(ui, Field::Height, &form.order.height, "in", events);
            number_row(ui, Field::Quantity, &form.order.quantity, "", events);
            material_row(ui, form.order.material, events);
        });

    ui.add_space(10.0);
    section(ui, t("form.options"));
    checkbox(ui, Field::RoughCutting, form.order.rough_cutting, events);
    checkbox(ui, Field::EyeBoltHoles, form.order.eye_bolt_holes, events);
    checkbox(ui, Field::MountingHoles, form.order.mounting_holes, events);

    ui.add_space(6.0);
    ui.label(field_label(Field::AdditionalComments));
    let mut comments = form.order.additional_comments.clone();
    let response = ui.add(
        egui::TextEdit::multiline(&mut comments)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        events.push(FormEvent::input(Field::AdditionalComments.name(), comments));
    }
}

/// Submit button, disabled while a request is in flight
pub fn submit_button(ui: &mut Ui, in_flight: bool) -> bool {
    let label = if in_flight {
        t("form.submitting")
    } else {
        t("form.submit")
    };
    let button = egui::Button::new(egui::RichText::new(label).strong())
        .min_size(egui::vec2(160.0, 30.0))
        .fill(egui::Color32::from_rgb(40, 80, 140));
    ui.add_enabled(!in_flight, button).clicked()
}

fn section(ui: &mut Ui, title: &str) {
    ui.heading(title);
    ui.separator();
}

fn text_row(ui: &mut Ui, field: Field, value: &str, events: &mut Vec<FormEvent>) {
    ui.label(field_label(field));
    let mut scratch = value.to_string();
    if ui
        .add(egui::TextEdit::singleline(&mut scratch).desired_width(240.0))
        .changed()
    {
        events.push(FormEvent::input(field.name(), scratch));
    }
    ui.end_row();
}

/// Free text entry for numbers; anything that does not parse gets a red
/// frame but is still stored as typed.
fn number_row(ui: &mut Ui, field: Field, raw: &str, unit: &str, events: &mut Vec<FormEvent>) {
    ui.label(field_label(field));
    ui.horizontal(|ui| {
        let parsed_ok = match field {
            Field::Quantity => validation::parse_quantity(raw).is_ok(),
            _ => validation::parse_positive(field, raw).is_ok(),
        };
        let mut scratch = raw.to_string();
        let mut edit = egui::TextEdit::singleline(&mut scratch).desired_width(90.0);
        if !parsed_ok {
            edit = edit.text_color(egui::Color32::from_rgb(230, 110, 110));
        }
        if ui.add(edit).changed() {
            events.push(FormEvent::input(field.name(), scratch));
        }
        if !unit.is_empty() {
            ui.weak(unit);
        }
    });
    ui.end_row();
}

fn material_row(ui: &mut Ui, current: Material, events: &mut Vec<FormEvent>) {
    ui.label(field_label(Field::Material));
    let mut selected = current;
    egui::ComboBox::from_id_salt("material_combo")
        .selected_text(selected.display_name())
        .show_ui(ui, |ui| {
            for material in Material::all() {
                ui.selectable_value(&mut selected, *material, material.display_name());
            }
        });
    if selected != current {
        events.push(FormEvent::input(Field::Material.name(), selected.name()));
    }
    ui.end_row();
}

fn checkbox(ui: &mut Ui, field: Field, checked: bool, events: &mut Vec<FormEvent>) {
    let mut scratch = checked;
    if ui.checkbox(&mut scratch, field_label(field)).changed() {
        events.push(FormEvent::toggle(field.name()));
    }
}
