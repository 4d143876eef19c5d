//! Shared device handles
//!
//! The radar is a single device shared by every gauge that talks to it.
//! Gauges reach it through a [`SurfaceHandle`] obtained from the
//! [`SurfaceRegistry`]. Whoever initializes the device through a handle
//! receives the only [`InitToken`] for it, and only that token may
//! deinitialize it again.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use radar_protocol::ControlSurface;
use tracing::info;

use crate::controller::GaugeConfig;

/// Service id the simulated radar is registered under
pub const SIMULATED_RADAR_SERVICE: &str = "SimulatedRadar";

/// Shared, reference-counted access to a radar device
#[derive(Clone)]
pub struct SurfaceHandle {
    inner: Rc<RefCell<dyn ControlSurface>>,
}

impl SurfaceHandle {
    /// Wrap a device in a new handle
    pub fn new<S: ControlSurface + 'static>(surface: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(surface)),
        }
    }

    /// Wrap an already shared device
    ///
    /// Lets the creator keep a typed reference next to the handle.
    pub fn from_shared(inner: Rc<RefCell<dyn ControlSurface>>) -> Self {
        Self { inner }
    }

    /// Whether the device reports itself initialized
    pub fn is_initialized(&self) -> bool {
        self.inner.borrow().is_initialized()
    }

    /// Run `f` with shared access to the device
    pub fn with<R>(&self, f: impl FnOnce(&dyn ControlSurface) -> R) -> R {
        f(&*self.inner.borrow())
    }

    /// Run `f` with exclusive access to the device
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut dyn ControlSurface) -> R) -> R {
        f(&mut *self.inner.borrow_mut())
    }

    /// Initialize the device unless it already is
    ///
    /// Returns a token only when this call performed the initialization.
    pub fn ensure_initialized(&self, config: &GaugeConfig) -> Option<InitToken> {
        if self.is_initialized() {
            return None;
        }
        self.with_mut(|s| {
            s.init(
                &config.texture_name,
                config.texture_width,
                config.texture_height,
            )
        });
        info!(
            "Initialized radar with texture {} ({}x{})",
            config.texture_name, config.texture_width, config.texture_height
        );
        Some(InitToken {
            surface: self.clone(),
        })
    }

    /// Whether two handles refer to the same device
    pub fn same_device(&self, other: &SurfaceHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of handles (and tokens) sharing the device
    pub fn share_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }
}

impl fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceHandle")
            .field("initialized", &self.is_initialized())
            .field("shares", &self.share_count())
            .finish()
    }
}

/// Proof that its holder initialized the device
///
/// Only [`SurfaceHandle::ensure_initialized`] creates tokens. Dropping a
/// token without calling [`InitToken::release`] leaves the device running.
#[derive(Debug)]
#[must_use = "dropping the token forfeits the right to deinitialize the device"]
pub struct InitToken {
    surface: SurfaceHandle,
}

impl InitToken {
    /// Deinitialize the device if it is still initialized
    ///
    /// Returns whether a deinitialization was performed.
    pub fn release(self) -> bool {
        if !self.surface.is_initialized() {
            return false;
        }
        self.surface.with_mut(|s| s.deinit());
        info!("Deinitialized radar");
        true
    }

    /// Whether the token belongs to the device behind `handle`
    pub fn is_for(&self, handle: &SurfaceHandle) -> bool {
        self.surface.same_device(handle)
    }
}

/// Named devices available to panels
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    services: HashMap<String, SurfaceHandle>,
}

impl SurfaceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device under a service id
    ///
    /// Returns the handle previously registered under that id, if any.
    pub fn register(
        &mut self,
        service_id: impl Into<String>,
        handle: SurfaceHandle,
    ) -> Option<SurfaceHandle> {
        let service_id = service_id.into();
        info!("Registered radar service: {}", service_id);
        self.services.insert(service_id, handle)
    }

    /// Look up a device by service id
    pub fn query(&self, service_id: &str) -> Option<SurfaceHandle> {
        self.services.get(service_id).cloned()
    }

    /// Remove a device from the registry
    pub fn unregister(&mut self, service_id: &str) -> Option<SurfaceHandle> {
        self.services.remove(service_id)
    }

    /// Number of registered services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
