//! Mod Entry Point
//!
//! The loader calls [`ModBehaviour::on_after_setup`] once after the game has
//! finished its own setup. The entry point builds the controller and parks it
//! in the [`ModRuntime`], the long-lived slot that survives scene changes and
//! forwards the host's per-frame callbacks to it.
//!
//! Nothing that goes wrong in here may take the host down: construction
//! errors and panics are logged and swallowed, and the mod simply stays
//! inactive.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{error, info, warn};

use super::hijack::{HijackError, SpectatorHijackController};
use crate::host::HostFrame;
use crate::render::OverlaySurface;

/// Lifecycle hook a mod loader looks for.
pub trait ModBehaviour {
    fn name(&self) -> &str;

    /// Called once, after the host has finished setting itself up.
    fn on_after_setup(&mut self, runtime: &mut ModRuntime);
}

/// Process-lifetime home of the controller. Holds at most one.
#[derive(Default)]
pub struct ModRuntime {
    controller: Option<SpectatorHijackController>,
}

impl ModRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `controller`. A second install is rejected and the
    /// rejected controller is dropped.
    pub fn install(&mut self, controller: SpectatorHijackController) -> Result<(), HijackError> {
        if self.controller.is_some() {
            return Err(HijackError::AlreadyInstalled);
        }
        self.controller = Some(controller);
        Ok(())
    }

    pub fn is_installed(&self) -> bool {
        self.controller.is_some()
    }

    pub fn controller(&self) -> Option<&SpectatorHijackController> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut SpectatorHijackController> {
        self.controller.as_mut()
    }

    /// Per-frame update callback.
    pub fn update(&mut self, frame: &mut HostFrame<'_>) {
        if let Some(controller) = self.controller.as_mut() {
            controller.tick(frame);
        }
    }

    /// Per-frame GUI callback.
    pub fn draw(&mut self, surface: &mut dyn OverlaySurface) {
        if let Some(controller) = self.controller.as_mut() {
            controller.render(surface);
        }
    }
}

type ControllerFactory = Box<dyn Fn() -> Result<SpectatorHijackController, HijackError>>;

pub struct ModEntryPoint {
    factory: ControllerFactory,
}

impl Default for ModEntryPoint {
    fn default() -> Self {
        Self::new()
    }
}

impl ModEntryPoint {
    pub fn new() -> Self {
        Self::with_factory(|| Ok(SpectatorHijackController::new()))
    }

    /// Use `factory` to build the controller instead of the default one.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Result<SpectatorHijackController, HijackError> + 'static,
    {
        Self {
            factory: Box::new(factory),
        }
    }

    fn setup(&self, runtime: &mut ModRuntime) -> Result<(), HijackError> {
        let controller = (self.factory)()?;
        runtime.install(controller)
    }
}

impl ModBehaviour for ModEntryPoint {
    fn name(&self) -> &str {
        "spectator_hijack"
    }

    fn on_after_setup(&mut self, runtime: &mut ModRuntime) {
        info!("{}: setting up", self.name());

        match panic::catch_unwind(AssertUnwindSafe(|| self.setup(runtime))) {
            Ok(Ok(())) => info!("{}: controller installed", self.name()),
            Ok(Err(err)) => warn!("{}: setup failed: {}", self.name(), err),
            Err(payload) => {
                let panic_message = panic_message(payload.as_ref());
                error!(panic_message, "{}: setup panicked", self.name());
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_rejected() {
        let mut runtime = ModRuntime::new();
        assert!(runtime.install(SpectatorHijackController::with_seed(1)).is_ok());
        assert_eq!(
            runtime.install(SpectatorHijackController::with_seed(2)),
            Err(HijackError::AlreadyInstalled)
        );
        assert!(runtime.is_installed());
    }

    #[test]
    fn test_panic_message_payloads() {
        let text: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(text.as_ref()), "boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(owned.as_ref()), "bang");
        let other: Box<dyn Any + Send> = Box::new(7u32);
        assert_eq!(panic_message(other.as_ref()), "unknown panic payload");
    }
}
