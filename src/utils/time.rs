//! Time utilities: second clamping, mm:ss formatting and parsing.

use crate::errors::{AppError, AppResult};

/// Floor a (possibly fractional, negative or non-finite) second value into
/// the non-negative integer domain used by the lap log.
pub fn clamp_seconds(v: f64) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    if v >= u32::MAX as f64 {
        return u32::MAX;
    }
    v.floor() as u32
}

/// `mm:ss` with unbounded minutes and zero-padded seconds.
pub fn format_mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Parse a playback position typed by the user.
///
/// Accepts plain seconds (`"75"`, `"75.6"`) or `mm:ss` (`"01:15"`).
pub fn parse_playback(s: &str) -> AppResult<f64> {
    let t = s.trim();

    if let Some((mm, ss)) = t.split_once(':') {
        let m: u32 = mm
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidSeconds(s.to_string()))?;
        let sec: f64 = ss
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidSeconds(s.to_string()))?;
        if !sec.is_finite() || !(0.0..60.0).contains(&sec) {
            return Err(AppError::InvalidSeconds(s.to_string()));
        }
        return Ok(m as f64 * 60.0 + sec);
    }

    let v: f64 = t
        .parse()
        .map_err(|_| AppError::InvalidSeconds(s.to_string()))?;
    if !v.is_finite() || v < 0.0 {
        return Err(AppError::InvalidSeconds(s.to_string()));
    }
    Ok(v)
}

/// Seconds → Excel time serial (1 day = 1.0), as written in the Time column
/// of legacy project files.
pub fn sec_to_excel_serial(sec: u32) -> String {
    let v = sec as f64 / 86_400.0;
    let s = format!("{:.12}", v);
    // trim like %g would
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() { "0".to_string() } else { s.to_string() }
}
