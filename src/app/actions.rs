//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin shim executes them in order against the host API; nothing in the
//! library performs I/O itself.

use crate::catalog::CatalogRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Issues a catalog request through the host's web-request API.
    ///
    /// The request's context map must be passed through unchanged so the
    /// response can be matched to the key that asked for it.
    FetchCatalog(CatalogRequest),

    /// Asks the host for a timer that expires one toast.
    ScheduleToastExpiry {
        /// Delay before the timer fires.
        seconds: f64,
    },
}
