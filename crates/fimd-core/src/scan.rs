//! The single-pass scan engine.
//!
//! Implements the SCAN / SUN_TEST / MARKER_TEST decision cascade of the
//! detector as a tight loop with inlined early-return boundary checks,
//! rather than the original's labeled jumps (see `DESIGN.md`). The
//! ordering guarantees, the termination-sentinel trick, and the
//! destructive interior zeroing as in-place non-maximum suppression are
//! all preserved exactly.

use crate::bresenham;
use crate::error::FimdError;
use crate::offsets::OffsetTable;
use crate::params::{Caps, Thresholds, TERM_SEQ};

/// Bounded detection output of one scan: marker peaks and sun-pixel
/// centers, in raster order of their decision site.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Detections {
    pub markers: Vec<(u32, u32)>,
    pub sun_pts: Vec<(u32, u32)>,
}

/// Runs one detection pass over `buf` in place.
///
/// `buf` must have exactly `width * height` bytes. On success, returns
/// the detections and the number of bytes the cursor actually advanced
/// over before the scan terminated (via the sentinel, whether because
/// the image was exhausted or because a cap forced early termination).
///
/// Mutates `buf`: writes the termination sentinel near its end, and
/// zeroes the interior of every accepted marker/sun candidate.
pub fn scan(
    buf: &mut [u8],
    width: usize,
    height: usize,
    radius: u32,
    thresholds: Thresholds,
    caps: Caps,
) -> Result<(Detections, usize), FimdError> {
    let len = width
        .checked_mul(height)
        .ok_or(FimdError::InvalidDimensions {
            width,
            height,
            radius,
        })?;
    if buf.len() != len {
        return Err(FimdError::BufferSizeMismatch {
            expected: len,
            actual: buf.len(),
        });
    }
    if len < 2 {
        return Err(FimdError::InvalidDimensions {
            width,
            height,
            radius,
        });
    }

    let points = bresenham::tables_for(radius).ok_or(FimdError::InvalidRadius {
        radius,
        supported: crate::params::SUPPORTED_RADII,
    })?;
    let offsets = OffsetTable::build(points, width);

    buf[len - 2] = TERM_SEQ[0];
    buf[len - 1] = TERM_SEQ[1];

    let offset = radius as usize * width + radius as usize;
    let mut cursor = offset - 1;

    let tc = thresholds.center as i32;
    let td = thresholds.diff as i32;
    let ts = thresholds.sun as i32;

    let mut markers = Vec::new();
    let mut sun_pts = Vec::new();

    loop {
        let sentinel = cursor + offset;
        if sentinel + 1 >= buf.len() || (buf[sentinel] == TERM_SEQ[0] && buf[sentinel + 1] == TERM_SEQ[1]) {
            break;
        }

        cursor += 1;
        let pc = buf[cursor] as i32;
        if pc <= tc {
            continue;
        }

        let delta0 = pc - at(buf, cursor, offsets.boundary[0]) as i32;

        if delta0 <= td && pc >= ts {
            if sun_pts.len() == caps.max_sun_points {
                inject_term_seq(buf, cursor, offset);
                continue;
            }

            let ring_is_bright = offsets.boundary[1..]
                .iter()
                .all(|&off| pc - at(buf, cursor, off) as i32 <= td);
            if !ring_is_bright {
                continue;
            }

            for &off in &offsets.interior {
                set_at(buf, cursor, off, 0);
            }
            sun_pts.push(coords(cursor, width));
            if sun_pts.len() == caps.max_sun_points {
                #[cfg(feature = "tracing")]
                tracing::trace!(cursor, "sun-point cap reached, forcing termination");
                inject_term_seq(buf, cursor, offset);
            }
        } else if delta0 > td {
            let ring_is_dark = offsets.boundary[1..]
                .iter()
                .all(|&off| pc - at(buf, cursor, off) as i32 > td);
            if !ring_is_dark {
                continue;
            }

            let mut peak_val = 0u8;
            let mut peak_off = offsets.interior[0];
            for &off in &offsets.interior {
                let v = at(buf, cursor, off);
                if v > peak_val {
                    peak_val = v;
                    peak_off = off;
                }
                set_at(buf, cursor, off, 0);
            }

            let peak_idx = (cursor as i64 + peak_off as i64) as usize;
            markers.push(coords(peak_idx, width));
            if markers.len() == caps.max_markers {
                #[cfg(feature = "tracing")]
                tracing::trace!(cursor, "marker cap reached, forcing termination");
                inject_term_seq(buf, cursor, offset);
            }
        }
    }

    log::debug!(
        "scan complete: {} markers, {} sun points, cursor at {}",
        markers.len(),
        sun_pts.len(),
        cursor
    );

    Ok((Detections { markers, sun_pts }, cursor + 1))
}

#[inline]
fn at(buf: &[u8], cursor: usize, offset: i32) -> u8 {
    buf[(cursor as i64 + offset as i64) as usize]
}

#[inline]
fn set_at(buf: &mut [u8], cursor: usize, offset: i32, value: u8) {
    let idx = (cursor as i64 + offset as i64) as usize;
    buf[idx] = value;
}

#[inline]
fn inject_term_seq(buf: &mut [u8], cursor: usize, offset: usize) {
    let idx = cursor + offset;
    buf[idx] = TERM_SEQ[0];
    buf[idx + 1] = TERM_SEQ[1];
}

#[inline]
fn coords(idx: usize, width: usize) -> (u32, u32) {
    ((idx % width) as u32, (idx / width) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: usize, height: usize) -> Vec<u8> {
        vec![0u8; width * height]
    }

    fn set_pixel(buf: &mut [u8], width: usize, x: usize, y: usize, v: u8) {
        buf[y * width + x] = v;
    }

    const THRESHOLDS: Thresholds = Thresholds {
        center: 120,
        diff: 60,
        sun: 240,
    };
    const CAPS: Caps = Caps {
        max_markers: 16,
        max_sun_points: 64,
    };

    #[test]
    fn s1_empty_image_has_no_detections() {
        let mut buf = blank(32, 32);
        let (det, _) = scan(&mut buf, 32, 32, 3, THRESHOLDS, CAPS).unwrap();
        assert!(det.markers.is_empty());
        assert!(det.sun_pts.is_empty());
    }

    #[test]
    fn s2_single_isolated_marker_is_detected_and_erased() {
        let mut buf = blank(32, 32);
        set_pixel(&mut buf, 32, 16, 16, 200);
        let (det, _) = scan(&mut buf, 32, 32, 3, THRESHOLDS, CAPS).unwrap();
        assert_eq!(det.markers, vec![(16, 16)]);
        assert!(det.sun_pts.is_empty());
        assert_eq!(buf[16 * 32 + 16], 0);
    }

    #[test]
    fn s3_saturated_patch_is_a_sun_point() {
        let mut buf = blank(32, 32);
        for dy in -3i32..=3 {
            for dx in -3i32..=3 {
                let x = (16 + dx) as usize;
                let y = (16 + dy) as usize;
                buf[y * 32 + x] = 255;
            }
        }
        let (det, _) = scan(&mut buf, 32, 32, 3, THRESHOLDS, CAPS).unwrap();
        assert_eq!(det.sun_pts, vec![(16, 16)]);
        assert!(det.markers.is_empty());
    }

    #[test]
    fn s4_marker_cap_stops_at_mmax() {
        let mut buf = blank(64, 64);
        let mut expected = Vec::new();
        for i in 0..20u32 {
            let x = 4 + (i % 10) * 6;
            let y = 4 + (i / 10) * 6;
            if x < 3 || y < 3 || x >= 61 || y >= 61 {
                continue;
            }
            set_pixel(&mut buf, 64, x as usize, y as usize, 200);
            expected.push((x, y));
        }
        let caps = Caps {
            max_markers: 5,
            max_sun_points: 64,
        };
        let (det, _) = scan(&mut buf, 64, 64, 3, THRESHOLDS, caps).unwrap();
        assert_eq!(det.markers.len(), 5);
        assert_eq!(det.markers, expected[..5]);
    }

    #[test]
    fn s5_near_duplicate_centers_suppress_to_one_marker() {
        let mut buf = blank(32, 32);
        set_pixel(&mut buf, 32, 16, 16, 200);
        set_pixel(&mut buf, 32, 16, 17, 200);
        let (det, _) = scan(&mut buf, 32, 32, 3, THRESHOLDS, CAPS).unwrap();
        assert_eq!(det.markers.len(), 1);
    }

    #[test]
    fn s6_pattern_outside_scan_region_is_ignored() {
        let mut buf = blank(32, 32);
        // (2,2) with radius 3 is outside the [R, W-R) scan band.
        set_pixel(&mut buf, 32, 2, 2, 200);
        let (det, _) = scan(&mut buf, 32, 32, 3, THRESHOLDS, CAPS).unwrap();
        assert!(det.markers.is_empty());
        assert!(det.sun_pts.is_empty());
    }

    #[test]
    fn idempotent_after_mutation() {
        let mut buf = blank(32, 32);
        set_pixel(&mut buf, 32, 16, 16, 200);
        let (first, _) = scan(&mut buf, 32, 32, 3, THRESHOLDS, CAPS).unwrap();
        assert_eq!(first.markers.len(), 1);
        let (second, _) = scan(&mut buf, 32, 32, 3, THRESHOLDS, CAPS).unwrap();
        assert!(second.markers.is_empty());
        assert!(second.sun_pts.is_empty());
    }

    #[test]
    fn every_detection_is_within_the_valid_band() {
        let mut buf = blank(40, 40);
        for i in 0..8u32 {
            set_pixel(&mut buf, 40, (5 + i * 4) as usize, (5 + i * 3) as usize, 220);
        }
        let (det, _) = scan(&mut buf, 40, 40, 3, THRESHOLDS, CAPS).unwrap();
        for (x, y) in det.markers {
            assert!((3..40 - 3).contains(&(x as i32)));
            assert!((3..40 - 3).contains(&(y as i32)));
        }
    }

    #[test]
    fn detections_are_in_nondecreasing_raster_order() {
        let mut buf = blank(48, 48);
        set_pixel(&mut buf, 48, 10, 10, 210);
        set_pixel(&mut buf, 48, 30, 10, 210);
        set_pixel(&mut buf, 48, 20, 20, 210);
        let (det, _) = scan(&mut buf, 48, 48, 3, THRESHOLDS, CAPS).unwrap();
        let mut prev = 0u32;
        for (x, y) in det.markers {
            let pos = y * 48 + x;
            assert!(pos >= prev);
            prev = pos;
        }
    }

    #[test]
    fn raising_center_threshold_never_increases_marker_count() {
        let mut lo_buf = blank(32, 32);
        set_pixel(&mut lo_buf, 32, 16, 16, 150);
        let mut hi_buf = lo_buf.clone();

        let lo = Thresholds {
            center: 120,
            ..THRESHOLDS
        };
        let hi = Thresholds {
            center: 200,
            ..THRESHOLDS
        };
        let (lo_det, _) = scan(&mut lo_buf, 32, 32, 3, lo, CAPS).unwrap();
        let (hi_det, _) = scan(&mut hi_buf, 32, 32, 3, hi, CAPS).unwrap();
        assert!(hi_det.markers.len() <= lo_det.markers.len());
    }

    #[test]
    fn buffer_size_mismatch_is_rejected() {
        let mut buf = vec![0u8; 10];
        let err = scan(&mut buf, 32, 32, 3, THRESHOLDS, CAPS).unwrap_err();
        assert!(matches!(err, FimdError::BufferSizeMismatch { .. }));
    }
}
