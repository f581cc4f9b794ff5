//! Critical hit rate.
//!
//! The extra rate bonus is single-source: it is read from the resolving
//! skill or item only and is never aggregated across sources.

use crate::annotation::AnnotationTag;
use crate::battler::ActionItem;

/// Final critical chance: `(base_rate + extra_bonus) × (1 − defender_evasion)`
/// clamped to `[0, 1]`.
///
/// A NaN result is treated as `0`.
///
/// # Examples
///
/// ```rust
/// use critstat::rate::resolve;
///
/// assert!((resolve(0.1, 0.2, 0.5) - 0.15).abs() < 1e-12);
/// assert_eq!(resolve(0.9, 0.9, 0.0), 1.0);
/// assert_eq!(resolve(0.1, -0.5, 0.0), 0.0);
/// ```
pub fn resolve(base_rate: f64, extra_bonus: f64, defender_evasion: f64) -> f64 {
    let rate = (base_rate + extra_bonus) * (1.0 - defender_evasion);
    if rate.is_nan() {
        return 0.0;
    }
    rate.clamp(0.0, 1.0)
}

/// The `extCriticalRate` bonus of a skill or item; `0` when absent.
///
/// # Examples
///
/// ```rust
/// use critstat::rate::extra_rate_bonus;
/// use critstat::{ActionItem, AnnotationBag};
///
/// let item = ActionItem::new("Aimed Shot")
///     .with_annotations(AnnotationBag::with_note("<extCriticalRate: 0.25>"));
/// assert_eq!(extra_rate_bonus(Some(&item)), 0.25);
/// assert_eq!(extra_rate_bonus(None), 0.0);
/// ```
pub fn extra_rate_bonus(item: Option<&ActionItem>) -> f64 {
    item.and_then(|item| item.annotations.read(AnnotationTag::EXT_CRITICAL_RATE))
        .unwrap_or(0.0)
}
