use shared::AbortHandle;
use web_sys::{AbortController, AbortSignal};

use crate::services::logging::Logger;

/// `AbortController` tracked by a [`shared::RequestSlot`]
pub struct BrowserAbort(AbortController);

impl BrowserAbort {
    /// New controller plus the signal to hand to the request
    pub fn new() -> Option<(Self, AbortSignal)> {
        match AbortController::new() {
            Ok(controller) => {
                let signal = controller.signal();
                Some((Self(controller), signal))
            }
            Err(e) => {
                Logger::error_with_component("abort", &format!("AbortController unavailable: {:?}", e));
                None
            }
        }
    }
}

impl AbortHandle for BrowserAbort {
    fn abort(&self) {
        self.0.abort();
    }
}
