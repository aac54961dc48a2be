//! Display styling and spending rankings for transaction categories.

mod classifier;
mod ranking;

pub use classifier::{
    CATEGORY_RULES, CategoryIcon, CategoryKind, CategoryRule, CategoryStyle, DEFAULT_STYLE,
    classify,
};
pub use ranking::{CategoryTotal, top_categories};
