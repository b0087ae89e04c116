//! On-screen half of the preview and the background: input mapping and GL
//! paint callbacks. Lifecycles live in the library's `RenderSession`; this
//! module only reads sessions and draws them.

pub mod gl_renderer;

use std::sync::{Arc, Mutex};

use eframe::egui::{self, Ui};
use glam::Vec3;

use crate::i18n::t;
use gl_renderer::{BlockFrame, FieldFrame, GlRenderer};
use nox_configurator_lib::background::BackgroundLayer;
use nox_configurator_lib::compositor::Compositor;
use nox_configurator_lib::preview::{MountPoint, PreviewSession};

pub struct ViewportPanel {
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self { gl_renderer: None }
    }

    pub fn init_gl(&mut self, gl: &glow::Context) {
        match GlRenderer::new(gl) {
            Ok(renderer) => self.gl_renderer = Some(Arc::new(Mutex::new(renderer))),
            Err(e) => tracing::error!("GL renderer unavailable, preview disabled: {e}"),
        }
    }

    pub fn has_gl(&self) -> bool {
        self.gl_renderer.is_some()
    }

    /// Reserve the fixed-size preview rect. The mount point is only offered
    /// when something can actually render into it.
    pub fn allocate(&self, ui: &mut Ui, size: f32) -> (egui::Rect, egui::Response, Option<MountPoint>) {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click_and_drag());
        let mount = if self.has_gl() && ui.is_rect_visible(rect) {
            MountPoint::new([rect.width(), rect.height()])
        } else {
            None
        };
        (rect, response, mount)
    }

    /// Route pointer input to the session's orbit controls
    pub fn handle_input(&self, ui: &Ui, response: &egui::Response, session: Option<&mut PreviewSession>) {
        let Some(session) = session else {
            return;
        };

        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            session.controls.rotate(delta.x, delta.y);
        }
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            let camera = session.camera.clone();
            session.controls.pan(delta.x, delta.y, &camera);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                session.controls.zoom(scroll);
            }
        }
    }

    /// Paint the preview into `rect`, or a placeholder when there is no
    /// live session
    pub fn paint_preview(&self, painter: &egui::Painter, rect: egui::Rect, session: Option<&PreviewSession>) {
        let (Some(renderer), Some(session)) = (&self.gl_renderer, session) else {
            paint_placeholder(painter, rect, self.has_gl());
            return;
        };

        let frame = block_frame(session, rect);
        let renderer = renderer.clone();
        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                let clip = info.clip_rect_in_pixels();
                let viewport = [clip.left_px, clip.from_bottom_px, clip.width_px, clip.height_px];
                if let Ok(mut r) = renderer.lock() {
                    r.paint_block(painter.gl(), viewport, &frame);
                }
            })),
        };
        painter.add(callback);
    }

    /// Paint the line field behind everything else
    pub fn paint_background(&self, ctx: &egui::Context, layer: Option<&BackgroundLayer>) {
        let (Some(renderer), Some(layer)) = (&self.gl_renderer, layer) else {
            return;
        };

        let frame = FieldFrame {
            surface: layer.surface(),
            lines: layer.line_mesh(),
            view_projection: layer.camera.view_projection(),
            clear_color: layer.clear_color,
        };
        let renderer = renderer.clone();
        let callback = egui::PaintCallback {
            rect: ctx.screen_rect(),
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                let vp = info.viewport_in_pixels();
                let viewport = [vp.left_px, vp.from_bottom_px, vp.width_px, vp.height_px];
                if let Ok(mut r) = renderer.lock() {
                    r.paint_field(painter.gl(), viewport, &frame);
                }
            })),
        };
        ctx.layer_painter(egui::LayerId::background()).add(callback);
    }

    /// Drop GPU buffers for surfaces the compositor no longer has
    pub fn release_stale(&self, gl: &glow::Context, compositor: &Compositor) {
        if let Some(renderer) = &self.gl_renderer {
            if let Ok(mut r) = renderer.lock() {
                r.release_stale(gl, |id| compositor.is_mounted(id));
            }
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        if let Some(renderer) = &self.gl_renderer {
            if let Ok(mut r) = renderer.lock() {
                r.destroy(gl);
            }
        }
    }
}

fn block_frame(session: &PreviewSession, rect: egui::Rect) -> BlockFrame {
    let scene = &session.scene;
    let aspect = if rect.height() > 0.0 {
        rect.width() / rect.height()
    } else {
        1.0
    };
    let light = |color: [f32; 3], intensity: f32| Vec3::from(color) * intensity;

    BlockFrame {
        surface: session.surface(),
        mesh: session.mesh().clone(),
        view_projection: session.camera.view_projection(aspect),
        model: scene.model_matrix(),
        eye: session.camera.eye_position(),
        ambient: light(scene.ambient.color, scene.ambient.intensity),
        key_dir: scene.key_light.direction(),
        key_color: light(scene.key_light.color, scene.key_light.intensity),
        fill_dir: scene.fill_light.direction(),
        fill_color: light(scene.fill_light.color, scene.fill_light.intensity),
        roughness: scene.material.roughness,
        background: scene.background,
    }
}

fn paint_placeholder(painter: &egui::Painter, rect: egui::Rect, has_gl: bool) {
    painter.rect_filled(rect, 4.0, egui::Color32::from_rgb(0xe0, 0xde, 0xde));
    let hint = if has_gl {
        t("preview.waiting")
    } else {
        t("preview.unavailable")
    };
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        hint,
        egui::FontId::proportional(12.0),
        egui::Color32::from_rgb(90, 90, 100),
    );
}
