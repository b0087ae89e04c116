//! Main application module

mod menus;
mod styles;

use eframe::egui;

use crate::i18n::{self, t};
use crate::ui::{notifications, order_form};
use crate::viewport::ViewportPanel;
use nox_configurator_lib::preview::MountPoint;
use nox_configurator_lib::session::RenderSession;
use nox_configurator_lib::state::settings::AppSettings;
use nox_configurator_lib::state::{AppState, SubmissionState};
use nox_configurator_lib::submit::SubmissionDispatcher;

/// Main application
pub struct ConfiguratorApp {
    state: AppState,
    session: RenderSession,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

/// Where the preview went in this frame's layout
struct PreviewSlot {
    painter: egui::Painter,
    rect: egui::Rect,
    mount: Option<MountPoint>,
}

impl ConfiguratorApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: AppSettings,
        dispatcher: SubmissionDispatcher,
    ) -> Self {
        let state = AppState::new(settings, SubmissionState::new(dispatcher));

        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);
        i18n::set_lang(state.settings.ui.language.into());

        let mut viewport = ViewportPanel::new();
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        let session = RenderSession::start(
            window_size(&cc.egui_ctx),
            &state.settings,
            &mut rand::rng(),
        );

        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            session,
            viewport,
            last_font_size,
        }
    }
}

impl eframe::App for ConfiguratorApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        // ── Background overlay ───────────────────────────────
        self.session
            .set_background(&self.state.settings.background, &mut rand::rng());
        if let Some(bg) = &mut self.session.background {
            bg.opacity = self.state.settings.background.opacity;
        }
        self.session.resize(window_size(ctx));
        self.viewport
            .paint_background(ctx, self.session.background.as_ref());

        self.state.submission.poll();

        // ── Header ───────────────────────────────────────────
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::NONE.inner_margin(egui::Margin::symmetric(20, 12)))
            .show(ctx, |ui| {
                show_header(ui, &mut self.state);
            });

        // ── Form and preview ─────────────────────────────────
        let mut events = Vec::new();
        let mut submit_clicked = false;
        let mut slot = None;
        let in_flight = self.state.submission.is_in_flight();
        let preview_size = self.state.settings.preview.size;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.inner_margin(egui::Margin::same(20)))
            .show(ctx, |ui| {
                ui.horizontal_top(|ui| {
                    card().show(ui, |ui| {
                        ui.set_width(440.0);
                        egui::ScrollArea::vertical()
                            .id_salt("order_form_scroll")
                            .show(ui, |ui| {
                                order_form::show(ui, &self.state.form, &mut events);
                                ui.add_space(14.0);
                                submit_clicked = order_form::submit_button(ui, in_flight);
                            });
                    });

                    ui.add_space(20.0);

                    card().show(ui, |ui| {
                        ui.heading(t("preview.title"));
                        ui.add_space(6.0);
                        let (rect, response, mount) = self.viewport.allocate(ui, preview_size);
                        self.viewport
                            .handle_input(ui, &response, self.session.preview.session_mut());
                        ui.add_space(4.0);
                        ui.weak(t("preview.hint"));
                        slot = Some(PreviewSlot {
                            painter: ui.painter_at(rect),
                            rect,
                            mount,
                        });
                    });
                });
            });

        self.state.apply_edits(events);
        if submit_clicked {
            self.state.submit();
        }

        // ── Preview lifecycle ────────────────────────────────
        let dims = self.state.form.dimensions().ok();
        let mount = slot.as_ref().and_then(|s| s.mount);
        self.session
            .sync_preview(dims, mount, &self.state.settings);
        if let Some(gl) = frame.gl() {
            self.viewport.release_stale(gl, &self.session.compositor);
        }
        if let Some(slot) = &slot {
            self.viewport
                .paint_preview(&slot.painter, slot.rect, self.session.preview.session());
        }

        self.session.frame();

        // ── Windows ──────────────────────────────────────────
        menus::settings_window(ctx, &mut self.state);
        notifications::show(ctx, &mut self.state.submission);

        if self.session.is_animating() || self.state.submission.is_in_flight() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        self.session.shutdown();
        if let Some(gl) = gl {
            self.viewport.destroy(gl);
        }
        self.state.settings.save();
        tracing::info!(
            attempts = self.state.submission.attempts(),
            "Configurator closed"
        );
    }
}

fn show_header(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(t("header.brand"))
                .size(22.0)
                .strong()
                .color(egui::Color32::WHITE),
        );
        ui.add_space(12.0);
        ui.label(egui::RichText::new(t("header.title")).size(16.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(t("header.settings")).clicked() {
                state.show_settings_window = !state.show_settings_window;
            }
        });
    });
}

fn card() -> egui::Frame {
    egui::Frame::NONE
        .fill(styles::CARD_FILL)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::same(16))
}

fn window_size(ctx: &egui::Context) -> [f32; 2] {
    let rect = ctx.screen_rect();
    [rect.width(), rect.height()]
}
