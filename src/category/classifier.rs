//! Maps free-text category strings to a small fixed set of display categories.

use serde::Serialize;

/// The display categories a transaction category can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKind {
    /// Groceries, restaurants and eating out.
    Food,
    /// Rides, fares and trips.
    Transport,
    /// Retail purchases.
    Shopping,
    /// Movies, streaming and other subscriptions.
    Entertainment,
    /// Health care and fitness.
    Health,
    /// Bills, utilities and payments.
    Bills,
    /// Anything the rules do not recognise.
    Uncategorized,
}

/// The icon shown next to a transaction, named after its heroicons glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryIcon {
    /// Food.
    ShoppingCart,
    /// Transport.
    PaperAirplane,
    /// Shopping.
    ShoppingBag,
    /// Entertainment.
    Film,
    /// Health.
    Heart,
    /// Bills.
    ClipboardCheck,
    /// Fallback.
    CurrencyDollar,
}

/// How a category is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    /// Which rule matched.
    pub kind: CategoryKind,
    /// The icon to draw.
    pub icon: CategoryIcon,
    /// A CSS hex color.
    pub color: &'static str,
}

/// A set of keywords and the style they select.
#[derive(Debug)]
pub struct CategoryRule {
    /// Lowercase substrings, any of which selects this rule.
    pub keywords: &'static [&'static str],
    /// The style for matching categories.
    pub style: CategoryStyle,
}

const NEUTRAL_COLOR: &str = "#6b7280";

/// The style used when no rule matches.
pub const DEFAULT_STYLE: CategoryStyle = CategoryStyle {
    kind: CategoryKind::Uncategorized,
    icon: CategoryIcon::CurrencyDollar,
    color: NEUTRAL_COLOR,
};

/// Classification rules in priority order. The first rule with a keyword
/// contained in the category wins.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &["food", "restaurant", "dining"],
        style: CategoryStyle {
            kind: CategoryKind::Food,
            icon: CategoryIcon::ShoppingCart,
            color: "#3b82f6",
        },
    },
    CategoryRule {
        keywords: &["transport", "travel", "uber"],
        style: CategoryStyle {
            kind: CategoryKind::Transport,
            icon: CategoryIcon::PaperAirplane,
            color: "#8b5cf6",
        },
    },
    CategoryRule {
        keywords: &["shopping", "retail"],
        style: CategoryStyle {
            kind: CategoryKind::Shopping,
            icon: CategoryIcon::ShoppingBag,
            color: "#10b981",
        },
    },
    CategoryRule {
        keywords: &["entertainment", "movie", "subscription", "recreation"],
        style: CategoryStyle {
            kind: CategoryKind::Entertainment,
            icon: CategoryIcon::Film,
            color: "#f59e0b",
        },
    },
    CategoryRule {
        keywords: &["health", "medical", "fitness"],
        style: CategoryStyle {
            kind: CategoryKind::Health,
            icon: CategoryIcon::Heart,
            color: NEUTRAL_COLOR,
        },
    },
    CategoryRule {
        keywords: &["bill", "utility", "utilities", "payment"],
        style: CategoryStyle {
            kind: CategoryKind::Bills,
            icon: CategoryIcon::ClipboardCheck,
            color: "#ef4444",
        },
    },
];

/// Pick the display style for a category string, ignoring case.
pub fn classify(category: &str) -> CategoryStyle {
    let category = category.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|rule| {
            rule.keywords
                .iter()
                .any(|keyword| category.contains(keyword))
        })
        .map(|rule| rule.style)
        .unwrap_or(DEFAULT_STYLE)
}

#[cfg(test)]
mod tests {
    use super::{CATEGORY_RULES, CategoryIcon, CategoryKind, DEFAULT_STYLE, classify};

    #[test]
    fn every_keyword_selects_its_own_rule() {
        for (index, rule) in CATEGORY_RULES.iter().enumerate() {
            for keyword in rule.keywords {
                let got = classify(keyword);
                let first_match = CATEGORY_RULES
                    .iter()
                    .position(|other| other.keywords.iter().any(|k| keyword.contains(k)))
                    .unwrap();

                assert_eq!(first_match, index, "keyword {keyword} is shadowed");
                assert_eq!(got, rule.style, "keyword {keyword}");
            }
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("FOOD AND DRINK").kind, CategoryKind::Food);
        assert_eq!(classify("Travel").kind, CategoryKind::Transport);
        assert_eq!(classify("General Retail").kind, CategoryKind::Shopping);
    }

    #[test]
    fn earliest_rule_wins() {
        let got = classify("Uber Eats");

        assert_eq!(got.kind, CategoryKind::Transport);
        assert_eq!(got.icon, CategoryIcon::PaperAirplane);
        assert_eq!(got.color, "#8b5cf6");

        // Matches both food and bills.
        assert_eq!(classify("Restaurant bill").kind, CategoryKind::Food);
        // Matches both shopping and entertainment.
        assert_eq!(classify("Subscription shopping").kind, CategoryKind::Shopping);
    }

    #[test]
    fn unmatched_categories_fall_back_to_default() {
        assert_eq!(classify("Other"), DEFAULT_STYLE);
        assert_eq!(classify(""), DEFAULT_STYLE);
        assert_eq!(classify("Transfer"), DEFAULT_STYLE);
    }

    #[test]
    fn health_uses_the_neutral_color() {
        let got = classify("Medical");

        assert_eq!(got.kind, CategoryKind::Health);
        assert_eq!(got.icon, CategoryIcon::Heart);
        assert_eq!(got.color, DEFAULT_STYLE.color);
    }
}
