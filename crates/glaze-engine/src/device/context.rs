use std::fmt;
use std::rc::Rc;

use super::driver::Driver;
use super::types::{gl_int, ClearFlags};
use crate::resource::DefaultTarget;

/// Shared handle to the active graphics driver.
///
/// Cloning is cheap. Every resource keeps a clone so it can release itself on
/// drop. `Rc` keeps the context and everything built from it on one thread.
#[derive(Clone)]
pub struct GpuContext {
    driver: Rc<dyn Driver>,
}

impl GpuContext {
    pub fn new(driver: impl Driver + 'static) -> Self {
        Self {
            driver: Rc::new(driver),
        }
    }

    /// Wraps a driver the caller also keeps a reference to.
    pub fn from_shared(driver: Rc<dyn Driver>) -> Self {
        Self { driver }
    }

    #[inline]
    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    /// The on-screen render target.
    pub fn default_target(&self) -> DefaultTarget {
        DefaultTarget::new(self.clone())
    }

    /// Clears the buffers of the currently bound render target.
    pub fn clear(&self, flags: ClearFlags) {
        self.driver.clear(flags);
    }

    pub fn clear_color(&self, rgba: [f32; 4]) {
        self.driver.clear_color(rgba);
    }

    pub fn viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        self.driver
            .viewport(x, y, gl_int(width.into()), gl_int(height.into()));
    }
}

impl fmt::Debug for GpuContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpuContext").finish_non_exhaustive()
    }
}
