use std::{ffi::c_void, mem::size_of};

use windows::Win32::{
    Foundation::{CloseHandle, HANDLE},
    Security::{GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY},
    System::Threading::{GetCurrentProcess, OpenProcessToken},
};

use crate::connections::errors::SharingError;

/// Returns true if the current process token is elevated.
pub(super) fn is_elevated() -> Result<bool, SharingError> {
    ProcessToken::our_process()?.is_elevated()
}

// https://stackoverflow.com/questions/8046097/how-to-check-if-a-process-has-the-administrative-rights/8196291#8196291
struct ProcessToken {
    inner: HANDLE,
}

impl ProcessToken {
    fn our_process() -> Result<Self, SharingError> {
        // SAFETY: `GetCurrentProcess` returns a pseudo-handle which does not need to be closed.
        let our_proc = unsafe { GetCurrentProcess() };
        let mut inner = HANDLE::default();
        // SAFETY: We just created `inner`. If `OpenProcessToken` fails there is nothing to close.
        unsafe { OpenProcessToken(our_proc, TOKEN_QUERY, &mut inner) }
            .map_err(|e| SharingError::service_failure("OpenProcessToken", e.to_string()))?;
        Ok(Self { inner })
    }

    fn is_elevated(&self) -> Result<bool, SharingError> {
        let mut elevation = TOKEN_ELEVATION::default();
        let token_elevation_sz = size_of::<TOKEN_ELEVATION>() as u32;
        let mut return_size = 0u32;
        // SAFETY: The type of `elevation` matches the hard-coded `TokenElevation` class.
        unsafe {
            GetTokenInformation(
                self.inner,
                TokenElevation,
                Some(&mut elevation as *mut _ as *mut c_void),
                token_elevation_sz,
                &mut return_size as *mut _,
            )
        }
        .map_err(|e| SharingError::service_failure("GetTokenInformation", e.to_string()))?;
        Ok(elevation.TokenIsElevated != 0)
    }
}

impl Drop for ProcessToken {
    fn drop(&mut self) {
        // SAFETY: We got `inner` from `OpenProcessToken` and didn't mutate it after that.
        let _ = unsafe { CloseHandle(self.inner) };
        self.inner = HANDLE::default();
    }
}
