use egui::Color32;

use crate::i18n::{t, validation_reason};
use nox_configurator_lib::state::SubmissionState;
use nox_configurator_lib::submit::Notification;

/// Modal-style window with the outcome of the last submit
pub fn show(ctx: &egui::Context, submission: &mut SubmissionState) {
    let Some(notification) = submission.notification.clone() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new(t("notify.title"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            let (color, text) = message(&notification);
            ui.colored_label(color, text);
            if let Notification::Invalid { error } = &notification {
                ui.label(validation_reason(error));
            }
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button(t("notify.ok")).clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        submission.dismiss();
    }
}

fn message(notification: &Notification) -> (Color32, &'static str) {
    match notification {
        Notification::Submitted => (Color32::from_rgb(120, 200, 120), t("notify.success")),
        Notification::Rejected { .. } => (Color32::from_rgb(230, 170, 90), t("notify.rejected")),
        Notification::Failed { .. } => (Color32::from_rgb(230, 110, 110), t("notify.failed")),
        Notification::Invalid { .. } => (Color32::from_rgb(230, 170, 90), t("notify.invalid")),
    }
}
