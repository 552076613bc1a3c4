//! Keyword rules that map alarm descriptions to cause categories.

use crate::models::Category;

/// Ordered `(category, keywords)` rules. Earlier rules take precedence when a
/// description matches keywords from several categories.
///
/// Keywords are lowercase and matched as plain substrings, so short entries
/// such as `"es"` deliberately catch many descriptions.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::E84Handshaking,
        &["e84", "u_req", "l_req", "ready", "ho-avbl", "es"],
    ),
    (Category::FoupHandling, &["foup", "flange", "lock", "loss"]),
    (
        Category::RobotHandMotion,
        &[
            "hand",
            "swing",
            "positioning",
            "vehicle communication connection error",
        ],
    ),
    (
        Category::SensorsDetection,
        &[
            "sensor",
            "detect",
            "detection",
            "sag",
            "presence",
            "look down",
        ],
    ),
    (
        Category::CommunicationPower,
        &["communication", "connection", "voltage"],
    ),
];

/// Category used when no rule matches.
pub const FALLBACK_CATEGORY: Category = Category::Other;

/// Assign `alarm_text` to the first category whose rule has any keyword
/// contained in the lowercased text.
pub fn categorize(alarm_text: &str) -> Category {
    let lower = alarm_text.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── single-rule matches ───────────────────────────────────────────────────

    #[test]
    fn test_categorize_e84() {
        assert_eq!(categorize("E84 timeout"), Category::E84Handshaking);
        assert_eq!(categorize("HO-AVBL signal off"), Category::E84Handshaking);
    }

    #[test]
    fn test_categorize_foup() {
        assert_eq!(categorize("foup lock failure"), Category::FoupHandling);
        assert_eq!(categorize("Flange missing"), Category::FoupHandling);
    }

    #[test]
    fn test_categorize_robot_hand() {
        assert_eq!(categorize("Hand origin fault"), Category::RobotHandMotion);
        assert_eq!(categorize("Swing arm stall"), Category::RobotHandMotion);
    }

    #[test]
    fn test_categorize_sensors() {
        assert_eq!(categorize("Sensor fault"), Category::SensorsDetection);
        assert_eq!(categorize("Look down fault"), Category::SensorsDetection);
    }

    #[test]
    fn test_categorize_communication() {
        assert_eq!(categorize("Low voltage"), Category::CommunicationPower);
        assert_eq!(categorize("Communication lost"), Category::CommunicationPower);
    }

    #[test]
    fn test_categorize_case_insensitive() {
        assert_eq!(categorize("FOUP LOCK FAILURE"), Category::FoupHandling);
        assert_eq!(categorize("e84 TiMeOuT"), Category::E84Handshaking);
    }

    // ── ordering ──────────────────────────────────────────────────────────────

    #[test]
    fn test_categorize_first_rule_wins() {
        // "sensor" (rule 4) and "lock" (rule 2) both match.
        assert_eq!(categorize("Lock sensor fault"), Category::FoupHandling);
        // "hand" (rule 3) and "connection" (rule 5).
        assert_eq!(categorize("Hand connection fault"), Category::RobotHandMotion);
    }

    #[test]
    fn test_categorize_short_keyword_shadows_later_rules() {
        // "presence" contains "es", which belongs to the first rule.
        assert_eq!(categorize("Presence error"), Category::E84Handshaking);
    }

    #[test]
    fn test_vehicle_connection_error_is_robot_hand() {
        assert_eq!(
            categorize("Vehicle communication connection error"),
            Category::RobotHandMotion
        );
    }

    // ── fallback / closure ────────────────────────────────────────────────────

    #[test]
    fn test_categorize_fallback() {
        assert_eq!(categorize("Unknown fault"), Category::Other);
        assert_eq!(categorize(""), Category::Other);
    }

    #[test]
    fn test_categorize_always_returns_known_category() {
        let samples = [
            "E84 timeout",
            "foup lock",
            "",
            "zzz",
            "Ünïcödé ✓",
            "hand sensor voltage",
            "   ",
        ];
        for text in samples {
            assert!(Category::ALL.contains(&categorize(text)), "{text:?}");
        }
    }

    #[test]
    fn test_rules_cover_every_specific_category_once() {
        let rule_categories: Vec<Category> = CATEGORY_RULES.iter().map(|(c, _)| *c).collect();
        assert_eq!(rule_categories, Category::ALL[..5].to_vec());
        assert!(!rule_categories.contains(&FALLBACK_CATEGORY));
    }
}
