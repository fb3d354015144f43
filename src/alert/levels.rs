//! Risk levels, threshold table, and the classifier.
//!
//! The five levels form a total order, and each non-Safe level carries a
//! pair of thresholds, one on the discomfort index and one on WBGT. A reading
//! escalates to a level when **either** metric meets that level's threshold
//! (OR semantics: a dry 38 °C day can reach Danger on WBGT alone).
//!
//! The numeric table is deployment configuration, not code: different
//! installations have shipped with Caution at DI 70 or 75, so the classifier
//! takes a validated [`ThresholdTable`] rather than baking in literals.

use serde::Deserialize;

use crate::model::ConfigError;

// ---------------------------------------------------------------------------
// Risk levels
// ---------------------------------------------------------------------------

/// Heat-stress risk level, in ascending order of severity.
///
/// Derive order matters: `Ord` follows declaration order, so
/// `Safe < Caution < Warning < SevereWarning < Danger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Safe,
    Caution,
    Warning,
    SevereWarning,
    Danger,
}

impl RiskLevel {
    /// All levels, ascending. Useful for iteration and for tests.
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::Safe,
        RiskLevel::Caution,
        RiskLevel::Warning,
        RiskLevel::SevereWarning,
        RiskLevel::Danger,
    ];

    /// Whether a transition *into* this level should push a notification.
    /// Safe and Caution never notify.
    pub fn is_notify_tier(self) -> bool {
        matches!(
            self,
            RiskLevel::Warning | RiskLevel::SevereWarning | RiskLevel::Danger
        )
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Safe => "ほぼ安全",
            RiskLevel::Caution => "注意",
            RiskLevel::Warning => "警戒",
            RiskLevel::SevereWarning => "厳重警戒",
            RiskLevel::Danger => "危険",
        }
    }

    /// Display color (hex RGB) for dashboards and notification headers.
    pub fn color(self) -> &'static str {
        match self {
            RiskLevel::Safe => "#2ecc71",
            RiskLevel::Caution => "#f1c40f",
            RiskLevel::Warning => "#e67e22",
            RiskLevel::SevereWarning => "#e74c3c",
            RiskLevel::Danger => "#8e44ad",
        }
    }

    /// One-line guidance shown alongside the level.
    pub fn advice(self) -> &'static str {
        match self {
            RiskLevel::Safe => "通常の活動で問題ありません。",
            RiskLevel::Caution => "こまめに水分を補給しましょう。",
            RiskLevel::Warning => "運動や激しい作業の際は定期的に充分に休息を取りましょう。",
            RiskLevel::SevereWarning => "外出時は炎天下を避け、室内では冷房を使用してください。",
            RiskLevel::Danger => "外出はなるべく避け、涼しい室内に移動してください。",
        }
    }

    /// Bulleted precaution text for notification messages. Longer than
    /// `advice`; only the notify-tier levels have level-specific wording.
    pub fn precautions(self) -> &'static str {
        match self {
            RiskLevel::Warning => "・こまめな水分・塩分補給\n・適度な休憩をとる\n・体調の変化に注意",
            RiskLevel::SevereWarning => {
                "・激しい運動は中止\n・15-20分ごとに水分補給\n・涼しい場所で休憩\n・体調不良時は医療機関へ"
            }
            RiskLevel::Danger => {
                "・外出を控える\n・冷房の効いた室内へ\n・緊急時は119番通報\n・高齢者や子供は特に注意"
            }
            _ => "・こまめな水分補給を心がけましょう",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Caution => "caution",
            RiskLevel::Warning => "warning",
            RiskLevel::SevereWarning => "severe_warning",
            RiskLevel::Danger => "danger",
        };
        write!(f, "{}", name)
    }
}

// ---------------------------------------------------------------------------
// Threshold table
// ---------------------------------------------------------------------------

/// Entry thresholds for one non-Safe level. A reading is at least that level
/// when `di >= di_min` or `wbgt >= wbgt_min`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LevelThreshold {
    pub di_min: f64,
    pub wbgt_min: f64,
}

/// Thresholds for the four non-Safe levels, ascending.
///
/// Invariant (checked by [`ThresholdTable::validate`]): both metrics are
/// strictly increasing from Caution through Danger. Safe has no thresholds;
/// it is the fallback when nothing is met.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ThresholdTable {
    pub caution: LevelThreshold,
    pub warning: LevelThreshold,
    pub severe_warning: LevelThreshold,
    pub danger: LevelThreshold,
}

impl Default for ThresholdTable {
    /// The historical deployment table: DI tiers at 70/75/80/85, WBGT tiers
    /// at 21/25/28/31 °C (the standard Japanese heat-stroke guidance bands).
    fn default() -> Self {
        ThresholdTable {
            caution: LevelThreshold { di_min: 70.0, wbgt_min: 21.0 },
            warning: LevelThreshold { di_min: 75.0, wbgt_min: 25.0 },
            severe_warning: LevelThreshold { di_min: 80.0, wbgt_min: 28.0 },
            danger: LevelThreshold { di_min: 85.0, wbgt_min: 31.0 },
        }
    }
}

impl ThresholdTable {
    /// Threshold for entering `level`, or `None` for Safe.
    pub fn threshold(&self, level: RiskLevel) -> Option<LevelThreshold> {
        match level {
            RiskLevel::Safe => None,
            RiskLevel::Caution => Some(self.caution),
            RiskLevel::Warning => Some(self.warning),
            RiskLevel::SevereWarning => Some(self.severe_warning),
            RiskLevel::Danger => Some(self.danger),
        }
    }

    /// Check that every threshold is a finite number and that both metrics
    /// are strictly increasing across levels.
    ///
    /// A non-monotone table would make `classify` non-monotone too, so this
    /// is a fatal configuration error. Non-finite values get an explicit
    /// check because NaN compares false against everything and would
    /// otherwise sail through the ordering checks below.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rows = [
            ("caution", self.caution),
            ("warning", self.warning),
            ("severe_warning", self.severe_warning),
            ("danger", self.danger),
        ];
        for (name, row) in rows {
            if !row.di_min.is_finite() {
                return Err(ConfigError::NonMonotoneThresholds(format!(
                    "di_min for {} is not a finite number ({})",
                    name, row.di_min
                )));
            }
            if !row.wbgt_min.is_finite() {
                return Err(ConfigError::NonMonotoneThresholds(format!(
                    "wbgt_min for {} is not a finite number ({})",
                    name, row.wbgt_min
                )));
            }
        }
        for pair in rows.windows(2) {
            let (lo_name, lo) = pair[0];
            let (hi_name, hi) = pair[1];
            if hi.di_min <= lo.di_min {
                return Err(ConfigError::NonMonotoneThresholds(format!(
                    "di_min: {} ({}) must exceed {} ({})",
                    hi_name, hi.di_min, lo_name, lo.di_min
                )));
            }
            if hi.wbgt_min <= lo.wbgt_min {
                return Err(ConfigError::NonMonotoneThresholds(format!(
                    "wbgt_min: {} ({}) must exceed {} ({})",
                    hi_name, hi.wbgt_min, lo_name, lo.wbgt_min
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Classify an index pair against the table.
///
/// Scans from Danger down and returns the first level whose DI threshold
/// *or* WBGT threshold is met; Safe when none is. Pure, no hysteresis:
/// identical inputs always yield the identical level, and raising either
/// metric can never lower the result (given a validated table).
pub fn classify(table: &ThresholdTable, di: f64, wbgt: f64) -> RiskLevel {
    for level in RiskLevel::ALL.iter().rev() {
        if let Some(t) = table.threshold(*level) {
            if di >= t.di_min || wbgt >= t.wbgt_min {
                return *level;
            }
        }
    }
    RiskLevel::Safe
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(RiskLevel::Safe < RiskLevel::Caution);
        assert!(RiskLevel::Caution < RiskLevel::Warning);
        assert!(RiskLevel::Warning < RiskLevel::SevereWarning);
        assert!(RiskLevel::SevereWarning < RiskLevel::Danger);
    }

    #[test]
    fn test_notify_tier_membership() {
        assert!(!RiskLevel::Safe.is_notify_tier());
        assert!(!RiskLevel::Caution.is_notify_tier());
        assert!(RiskLevel::Warning.is_notify_tier());
        assert!(RiskLevel::SevereWarning.is_notify_tier());
        assert!(RiskLevel::Danger.is_notify_tier());
    }

    #[test]
    fn test_default_table_is_valid() {
        ThresholdTable::default()
            .validate()
            .expect("shipped default table must be monotone");
    }

    #[test]
    fn test_non_monotone_table_rejected() {
        let mut table = ThresholdTable::default();
        table.warning.di_min = 60.0; // below caution's 70
        assert!(matches!(
            table.validate(),
            Err(ConfigError::NonMonotoneThresholds(_))
        ));
    }

    #[test]
    fn test_non_finite_thresholds_rejected() {
        // NaN compares false against everything, so the ordering checks
        // alone would accept it; the finiteness check must catch it.
        let mut table = ThresholdTable::default();
        table.danger.di_min = f64::NAN;
        assert!(matches!(
            table.validate(),
            Err(ConfigError::NonMonotoneThresholds(_))
        ));

        let mut table = ThresholdTable::default();
        table.caution.wbgt_min = f64::INFINITY;
        assert!(matches!(
            table.validate(),
            Err(ConfigError::NonMonotoneThresholds(_))
        ));
    }

    #[test]
    fn test_classify_below_all_thresholds_is_safe() {
        let t = ThresholdTable::default();
        assert_eq!(classify(&t, 65.3, 18.0), RiskLevel::Safe);
    }

    #[test]
    fn test_classify_picks_highest_met_level() {
        let t = ThresholdTable::default();
        assert_eq!(classify(&t, 72.0, 15.0), RiskLevel::Caution);
        assert_eq!(classify(&t, 76.5, 15.0), RiskLevel::Warning);
        assert_eq!(classify(&t, 81.0, 15.0), RiskLevel::SevereWarning);
        assert_eq!(classify(&t, 90.9, 15.0), RiskLevel::Danger);
    }

    #[test]
    fn test_classify_or_semantics_wbgt_alone_escalates() {
        let t = ThresholdTable::default();
        // DI comfortable, WBGT at the danger tier (dry extreme heat).
        assert_eq!(classify(&t, 60.0, 31.0), RiskLevel::Danger);
        // And the other way round.
        assert_eq!(classify(&t, 85.0, 10.0), RiskLevel::Danger);
    }

    #[test]
    fn test_classify_threshold_boundary_is_inclusive() {
        let t = ThresholdTable::default();
        assert_eq!(classify(&t, 70.0, 0.0), RiskLevel::Caution);
        assert_eq!(classify(&t, 69.9, 0.0), RiskLevel::Safe);
    }

    #[test]
    fn test_classify_is_monotone_in_each_argument() {
        let t = ThresholdTable::default();
        // Sweep each argument upward with the other held fixed; the level
        // must never decrease.
        for &fixed_wbgt in &[0.0, 22.0, 26.0, 29.0, 33.0] {
            let mut prev = RiskLevel::Safe;
            let mut di = 50.0;
            while di <= 100.0 {
                let level = classify(&t, di, fixed_wbgt);
                assert!(level >= prev, "level dropped at di={} wbgt={}", di, fixed_wbgt);
                prev = level;
                di += 0.5;
            }
        }
        for &fixed_di in &[50.0, 72.0, 76.0, 81.0, 90.0] {
            let mut prev = RiskLevel::Safe;
            let mut wbgt = 10.0;
            while wbgt <= 40.0 {
                let level = classify(&t, fixed_di, wbgt);
                assert!(level >= prev, "level dropped at di={} wbgt={}", fixed_di, wbgt);
                prev = level;
                wbgt += 0.25;
            }
        }
    }
}
