//! Raw value corrections.
//!
//! Several vendors pack more than one quantity into the 48-bit raw field of
//! an attribute. Before a raw value is stored, the rule for its id (if any)
//! extracts the part worth plotting.

use crate::catalog::Attribute;

/// A single rewrite applied to a raw value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawCorrection {
    /// Keep only the bits set in the mask.
    Mask(u64),
    /// Seagate 48-bit layout: 16-bit error counter above a 32-bit
    /// operation counter. Keeps the error counter.
    ErrorCounter,
}

impl RawCorrection {
    #[inline]
    pub fn apply(self, raw: u64) -> u64 {
        match self {
            RawCorrection::Mask(mask) => raw & mask,
            RawCorrection::ErrorCounter => raw >> 32,
        }
    }
}

/// The set of correction rules active for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CorrectionRules {
    /// Interpret read/seek error rates with the Seagate layout.
    pub seagate: bool,
}

impl CorrectionRules {
    pub fn new(seagate: bool) -> Self {
        Self { seagate }
    }

    /// Rule for an attribute id, if one applies.
    pub fn rule_for(&self, id: u8) -> Option<RawCorrection> {
        match Attribute::from_repr(id)? {
            // temperature lives in the low byte
            Attribute::AirflowTemperatureCel | Attribute::TemperatureCelsius => {
                Some(RawCorrection::Mask(0xFF))
            }
            // hours are the low 32 bits
            Attribute::HeadFlyingHours => Some(RawCorrection::Mask(0xFFFF_FFFF)),
            Attribute::RawReadErrorRate | Attribute::SeekErrorRate if self.seagate => {
                Some(RawCorrection::ErrorCounter)
            }
            _ => None,
        }
    }

    /// Corrected raw value for `id`.
    pub fn apply(&self, id: u8, raw: u64) -> u64 {
        match self.rule_for(id) {
            Some(rule) => rule.apply(raw),
            None => raw,
        }
    }
}
