use log::trace;
use windows::Win32::System::Com;

use crate::connections::errors::SharingError;

/// Enforces the initialize-use-uninitialize order for COM on one thread.
///
/// Every COM interface pointer must be released before this guard drops.
pub(super) struct ComGuard {
    _unsend_unsync: PhantomUnsendUnsync,
}

/// Marks a type as !Send and !Sync without nightly features.
type PhantomUnsendUnsync = std::marker::PhantomData<*const ()>;

impl ComGuard {
    pub(super) fn new() -> Result<Self, SharingError> {
        // SAFETY: COM is initialized per thread, and the guard is !Send so it
        // is uninitialized on the same thread.
        unsafe { Com::CoInitializeEx(None, Com::COINIT_MULTITHREADED) }
            .ok()
            .map_err(|e| SharingError::service_failure("CoInitializeEx", e.to_string()))?;
        trace!("Initialized COM");
        Ok(Self {
            _unsend_unsync: Default::default(),
        })
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        // SAFETY: `IcsBackend` declares this guard after its COM fields, so
        // they are released before we get here.
        unsafe { Com::CoUninitialize() };
        trace!("Uninitialized COM");
    }
}
