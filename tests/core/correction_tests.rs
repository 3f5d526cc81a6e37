//! Tests for raw value corrections
//!
//! Tests cover:
//! - Masks for temperatures and head flying hours
//! - Seagate error counter extraction
//! - Ids without a rule

use smartplot::correction::{CorrectionRules, RawCorrection};

#[test]
fn test_rules_per_id() {
    let rules = CorrectionRules::default();
    assert_eq!(rules.rule_for(190), Some(RawCorrection::Mask(0xFF)));
    assert_eq!(rules.rule_for(194), Some(RawCorrection::Mask(0xFF)));
    assert_eq!(rules.rule_for(240), Some(RawCorrection::Mask(0xFFFF_FFFF)));
    assert_eq!(rules.rule_for(5), None);
    assert_eq!(rules.rule_for(6), None);
}

#[test]
fn test_seagate_rules_per_id() {
    let rules = CorrectionRules::new(true);
    assert_eq!(rules.rule_for(1), Some(RawCorrection::ErrorCounter));
    assert_eq!(rules.rule_for(7), Some(RawCorrection::ErrorCounter));
    assert_eq!(rules.rule_for(194), Some(RawCorrection::Mask(0xFF)));
}

#[test]
fn test_temperature_from_packed_min_max() {
    // current 33, min 22, max 40
    let rules = CorrectionRules::default();
    assert_eq!(rules.apply(194, 0x0028_0016_0021), 33);
}

#[test]
fn test_corrected_values_stay_in_range() {
    let rules = CorrectionRules::new(true);
    for raw in [0u64, 1, 0xFFFF, 0xFFFF_FFFF_FFFF, u64::MAX] {
        assert!(rules.apply(190, raw) <= 0xFF);
        assert!(rules.apply(194, raw) <= 0xFF);
        assert!(rules.apply(240, raw) <= 0xFFFF_FFFF);
        assert!(rules.apply(1, raw) <= u64::MAX >> 32);
    }
}

#[test]
fn test_uncorrected_ids_pass_through() {
    let rules = CorrectionRules::new(true);
    assert_eq!(rules.apply(5, 12345), 12345);
    assert_eq!(rules.apply(9, 0xFFFF_FFFF_FFFF), 0xFFFF_FFFF_FFFF);
    assert_eq!(rules.apply(250, 7), 7);
}
