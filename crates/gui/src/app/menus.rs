//! Settings window

use eframe::egui;

use crate::i18n::{self, t};
use nox_configurator_lib::state::settings::{AppSettings, Language};
use nox_configurator_lib::state::AppState;

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_general_settings(ui, state);
                show_background_settings(ui, state);
                show_preview_settings(ui, state);
                show_ui_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = state.show_settings_window && open;
}

fn show_general_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.general"));
    ui.horizontal(|ui| {
        ui.label(t("settings.endpoint"));
        ui.text_edit_singleline(&mut state.settings.order_endpoint);
    });
    ui.weak(t("settings.endpoint_note"));
    ui.add_space(10.0);
}

fn show_background_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.background"));
    ui.checkbox(&mut state.settings.background.visible, t("settings.background_visible"));
    ui.horizontal(|ui| {
        ui.label(t("settings.background_opacity"));
        ui.add(egui::Slider::new(&mut state.settings.background.opacity, 0.05..=1.0));
    });
    ui.add_space(10.0);
}

/// Applied to the next preview session
fn show_preview_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.preview"));
    ui.horizontal(|ui| {
        ui.label(t("settings.rotation_speed"));
        ui.add(
            egui::DragValue::new(&mut state.settings.preview.rotation_speed)
                .speed(0.001)
                .range(0.0..=0.1),
        );
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.damping"));
        ui.add(egui::Slider::new(&mut state.settings.preview.damping_factor, 0.05..=1.0));
    });
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(10.0..=24.0),
        );
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.language"));
        let before = state.settings.ui.language;
        egui::ComboBox::from_id_salt("language_combo")
            .selected_text(state.settings.ui.language.display_name())
            .show_ui(ui, |ui| {
                for language in Language::all() {
                    ui.selectable_value(
                        &mut state.settings.ui.language,
                        *language,
                        language.display_name(),
                    );
                }
            });
        if state.settings.ui.language != before {
            i18n::set_lang(state.settings.ui.language.into());
        }
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.reset")).clicked() {
            let endpoint = std::mem::take(&mut state.settings.order_endpoint);
            state.settings = AppSettings {
                order_endpoint: endpoint,
                ..AppSettings::default()
            };
            i18n::set_lang(state.settings.ui.language.into());
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}
