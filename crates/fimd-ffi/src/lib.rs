//! C ABI surface for `fimd-core`, exposing an `fimd_init` / `fimd_detect`
//! / `fimd_destroy` handle lifecycle plus introspection getters, named
//! after the original CPU reference's header but under the `fimd_`
//! prefix.
//!
//! All entry points are `extern "C"`, take/return only `#[repr(C)]`-safe
//! types, and never unwind across the FFI boundary: panics are caught
//! and translated into a negative status code.

use std::panic::{self, AssertUnwindSafe};

use fimd_core::{Caps, Detector, DetectorParams, FimdError, Thresholds};

/// Status codes returned by [`fimd_init`] and [`fimd_detect`].
pub const FIMD_OK: i32 = 0;
pub const FIMD_ERR_ALLOCATION: i32 = -1;
pub const FIMD_ERR_INVALID_RADIUS: i32 = -2;
pub const FIMD_ERR_INVALID_DIMENSIONS: i32 = -3;
pub const FIMD_ERR_INVALID_THRESHOLDS: i32 = -4;
pub const FIMD_ERR_BUFFER_SIZE: i32 = -5;
pub const FIMD_ERR_NULL_POINTER: i32 = -6;
pub const FIMD_ERR_PANIC: i32 = -7;

fn status_of(err: &FimdError) -> i32 {
    match err {
        FimdError::AllocationFailed => FIMD_ERR_ALLOCATION,
        FimdError::InvalidRadius { .. } => FIMD_ERR_INVALID_RADIUS,
        FimdError::InvalidDimensions { .. } => FIMD_ERR_INVALID_DIMENSIONS,
        FimdError::InvalidThresholds { .. } => FIMD_ERR_INVALID_THRESHOLDS,
        FimdError::BufferSizeMismatch { .. } => FIMD_ERR_BUFFER_SIZE,
    }
}

/// Opaque handle wrapping one [`Detector`] instance.
pub struct FimdHandle {
    detector: Detector,
}

/// Constructs a detector handle for the given image size, radius,
/// thresholds, and result caps. On success, writes a non-null handle to
/// `out_handle` and returns `FIMD_OK`; the caller must eventually pass
/// the handle to [`fimd_destroy`].
///
/// # Safety
/// `out_handle` must be a valid, writable pointer to a `*mut FimdHandle`.
#[no_mangle]
pub unsafe extern "C" fn fimd_init(
    width: u32,
    height: u32,
    radius: u32,
    threshold_center: u8,
    threshold_diff: u8,
    threshold_sun: u8,
    max_markers: u32,
    max_sun_points: u32,
    out_handle: *mut *mut FimdHandle,
) -> i32 {
    if out_handle.is_null() {
        return FIMD_ERR_NULL_POINTER;
    }

    let result = panic::catch_unwind(|| {
        let thresholds = Thresholds::new(threshold_center, threshold_diff, threshold_sun)?;
        let caps = Caps {
            max_markers: max_markers as usize,
            max_sun_points: max_sun_points as usize,
        };
        let params = DetectorParams::new(width as usize, height as usize, radius, thresholds, caps)?;
        Ok::<_, FimdError>(Detector::new(params))
    });

    match result {
        Ok(Ok(detector)) => {
            let handle = Box::new(FimdHandle { detector });
            *out_handle = Box::into_raw(handle);
            FIMD_OK
        }
        Ok(Err(err)) => {
            *out_handle = std::ptr::null_mut();
            status_of(&err)
        }
        Err(_) => {
            *out_handle = std::ptr::null_mut();
            FIMD_ERR_PANIC
        }
    }
}

/// Runs one detection pass on `img_ptr` (exactly `width * height` bytes,
/// mutated in place per `fimd-core`'s destructive scan contract) and
/// writes results into the caller-owned `markers`/`sun_pts` arrays.
///
/// # Safety
/// `handle` must be a live handle from [`fimd_init`]. `img_ptr` must
/// point to exactly `width * height` readable+writable bytes. `markers`
/// and `sun_pts` must point to arrays of at least `markers_cap` /
/// `sun_pts_cap` `[u32; 2]` slots; `markers_num`/`sun_pts_num` must be
/// valid writable pointers.
#[no_mangle]
pub unsafe extern "C" fn fimd_detect(
    handle: *mut FimdHandle,
    img_ptr: *mut u8,
    img_len: usize,
    markers: *mut [u32; 2],
    markers_cap: u32,
    markers_num: *mut u32,
    sun_pts: *mut [u32; 2],
    sun_pts_cap: u32,
    sun_pts_num: *mut u32,
) -> i32 {
    if handle.is_null()
        || img_ptr.is_null()
        || markers.is_null()
        || sun_pts.is_null()
        || markers_num.is_null()
        || sun_pts_num.is_null()
    {
        return FIMD_ERR_NULL_POINTER;
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let handle = &*handle;
        let image = std::slice::from_raw_parts_mut(img_ptr, img_len);
        let detections = handle.detector.detect(image)?;
        Ok::<_, FimdError>(detections)
    }));

    match result {
        Ok(Ok(detections)) => {
            let markers_to_write = detections.markers.len().min(markers_cap as usize);
            let markers_out = std::slice::from_raw_parts_mut(markers, markers_to_write);
            for (slot, &(x, y)) in markers_out.iter_mut().zip(&detections.markers) {
                *slot = [x, y];
            }
            *markers_num = markers_to_write as u32;

            let sun_to_write = detections.sun_pts.len().min(sun_pts_cap as usize);
            let sun_out = std::slice::from_raw_parts_mut(sun_pts, sun_to_write);
            for (slot, &(x, y)) in sun_out.iter_mut().zip(&detections.sun_pts) {
                *slot = [x, y];
            }
            *sun_pts_num = sun_to_write as u32;

            FIMD_OK
        }
        Ok(Err(err)) => status_of(&err),
        Err(_) => FIMD_ERR_PANIC,
    }
}

/// Releases a handle returned by [`fimd_init`]. Passing `NULL` is a
/// no-op; passing the same non-null handle twice is undefined behavior.
///
/// # Safety
/// `handle` must be either null or a live handle from [`fimd_init`] not
/// already destroyed.
#[no_mangle]
pub unsafe extern "C" fn fimd_destroy(handle: *mut FimdHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// # Safety
/// `handle` must be a live handle from [`fimd_init`].
#[no_mangle]
pub unsafe extern "C" fn fimd_image_width(handle: *const FimdHandle) -> u32 {
    (*handle).detector.width() as u32
}

/// # Safety
/// `handle` must be a live handle from [`fimd_init`].
#[no_mangle]
pub unsafe extern "C" fn fimd_image_height(handle: *const FimdHandle) -> u32 {
    (*handle).detector.height() as u32
}

/// Returns the number of radii this build supports.
#[no_mangle]
pub extern "C" fn fimd_get_radii_count() -> u32 {
    fimd_core::SUPPORTED_RADII.len() as u32
}

/// Returns a pointer to the static array of supported radii, of length
/// [`fimd_get_radii_count`].
#[no_mangle]
pub extern "C" fn fimd_get_radii() -> *const u32 {
    fimd_core::SUPPORTED_RADII.as_ptr()
}

/// # Safety
/// `handle` must be a live handle from [`fimd_init`].
#[no_mangle]
pub unsafe extern "C" fn fimd_get_max_markers_count(handle: *const FimdHandle) -> u32 {
    (*handle).detector.caps().max_markers as u32
}

/// # Safety
/// `handle` must be a live handle from [`fimd_init`].
#[no_mangle]
pub unsafe extern "C" fn fimd_get_max_sun_points_count(handle: *const FimdHandle) -> u32 {
    (*handle).detector.caps().max_sun_points as u32
}

/// # Safety
/// `handle` must be a live handle from [`fimd_init`].
#[no_mangle]
pub unsafe extern "C" fn fimd_get_threshold_marker(handle: *const FimdHandle) -> u8 {
    (*handle).detector.thresholds().center
}

/// # Safety
/// `handle` must be a live handle from [`fimd_init`].
#[no_mangle]
pub unsafe extern "C" fn fimd_get_threshold_sun(handle: *const FimdHandle) -> u8 {
    (*handle).detector.thresholds().sun
}

/// # Safety
/// `handle` must be a live handle from [`fimd_init`].
#[no_mangle]
pub unsafe extern "C" fn fimd_get_threshold_diff(handle: *const FimdHandle) -> u8 {
    (*handle).detector.thresholds().diff
}

/// Writes the two-byte termination sentinel into `out[0..2]`.
///
/// # Safety
/// `out` must point to at least 2 writable bytes.
#[no_mangle]
pub unsafe extern "C" fn fimd_get_termination_sequence(out: *mut u8) {
    let seq = fimd_core::TERM_SEQ;
    std::ptr::copy_nonoverlapping(seq.as_ptr(), out, seq.len());
}
