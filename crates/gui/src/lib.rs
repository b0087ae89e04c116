// Library crate: exposes testable modules for integration tests.
// GUI-specific modules (app, ui, GL rendering) remain in the binary crate.

pub mod background;
pub mod compositor;
pub mod fixtures;
pub mod harness;
pub mod preview;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod submit;
pub mod validation;

/// CPU-side mesh types shared by the scenes and the GL renderer.
/// The GL renderer itself stays in the binary crate.
pub mod viewport {
    pub mod mesh;
}
