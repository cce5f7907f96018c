//! Risk classification: a pure function of transitive-set sizes.

use stagemap_core::config::{ImpactConfig, RiskBasis, RiskThresholds};

use super::types::{RiskAssessment, RiskLevel};

/// `size > high_above` is high, `size > medium_above` is medium, else low.
pub fn classify_size(size: usize, thresholds: &RiskThresholds) -> RiskLevel {
    if size > thresholds.high_above {
        RiskLevel::High
    } else if size > thresholds.medium_above {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Risk for an entity with the given ancestor/descendant counts. When an
/// entry point is among the ancestors and escalation is on, the level is
/// raised by one.
pub fn assess_risk(
    ancestors: usize,
    descendants: usize,
    entry_point_ancestor: bool,
    config: &ImpactConfig,
) -> RiskAssessment {
    let size = match config.basis {
        RiskBasis::Upstream => ancestors,
        RiskBasis::Combined => ancestors + descendants,
    };
    let base_level = classify_size(size, &config.thresholds);
    let escalated = config.escalate_on_entry_point && entry_point_ancestor && base_level != RiskLevel::High;
    RiskAssessment {
        level: if escalated { base_level.escalate() } else { base_level },
        base_level,
        size,
        escalated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_exclusive() {
        let t = RiskThresholds::default();
        assert_eq!(classify_size(0, &t), RiskLevel::Low);
        assert_eq!(classify_size(5, &t), RiskLevel::Low);
        assert_eq!(classify_size(6, &t), RiskLevel::Medium);
        assert_eq!(classify_size(10, &t), RiskLevel::Medium);
        assert_eq!(classify_size(11, &t), RiskLevel::High);
    }

    #[test]
    fn basis_selects_the_size() {
        let upstream = ImpactConfig::default();
        assert_eq!(assess_risk(2, 20, false, &upstream).size, 2);
        let combined = ImpactConfig {
            basis: RiskBasis::Combined,
            ..Default::default()
        };
        let r = assess_risk(2, 20, false, &combined);
        assert_eq!(r.size, 22);
        assert_eq!(r.level, RiskLevel::High);
    }

    #[test]
    fn entry_point_ancestors_escalate() {
        let config = ImpactConfig::default();
        let r = assess_risk(1, 0, true, &config);
        assert_eq!(r.base_level, RiskLevel::Low);
        assert_eq!(r.level, RiskLevel::Medium);
        assert!(r.escalated);

        let off = ImpactConfig {
            escalate_on_entry_point: false,
            ..Default::default()
        };
        assert_eq!(assess_risk(1, 0, true, &off).level, RiskLevel::Low);
        assert!(!assess_risk(20, 0, true, &config).escalated);
    }
}
