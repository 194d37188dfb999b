//! Built-in product catalog.
//!
//! Used when no database is configured, and as fixture data in tests.

use super::{Product, Tier};
use crate::domain::foundation::ProductId;

/// The four standard products, best tier first.
pub fn builtin_products() -> Vec<Product> {
    vec![
        product("Liberty Preferred", Tier::Preferred)
            .with_description(
                "Our premium coverage with the best rates and most comprehensive benefits.",
            )
            .with_benefits([
                "Lowest premium rates",
                "Accelerated underwriting",
                "No medical exam required",
                "Coverage up to $1M",
            ])
            .with_question_texts([
                "Do you have chronic obstructive pulmonary disease?",
                "Do you have chronic bronchitis?",
                "Do you have emphysema?",
                "Do you have an irregular heartbeat?",
                "Have you ever had a heart attack?",
            ]),
        product("Liberty Standard", Tier::Standard)
            .with_description("Quality coverage with competitive rates for most applicants.")
            .with_benefits([
                "Competitive premium rates",
                "Flexible coverage options",
                "Coverage up to $750K",
                "Multiple payment options",
            ])
            .with_question_texts([
                "Do you have lymphedema?",
                "Have you had chemotherapy in the last three years?",
                "Have you had radiation therapy in the last three years?",
                "Do you have leukemia?",
                "Have you been diagnosed with cancer in the past 5 years?",
            ]),
        product("Royal Neighbors Graded", Tier::Graded)
            .with_description("Guaranteed acceptance coverage with graded benefits.")
            .with_benefits([
                "Guaranteed acceptance",
                "No medical questions after qualification",
                "Coverage builds over time",
                "Final expense coverage",
            ])
            .with_question_texts([
                "Do you have chronic kidney disease?",
                "Have you been on dialysis in the last year?",
                "Do you have HIV/AIDS?",
                "Have you had a stroke in the last 2 years?",
                "Have you been hospitalized for a serious illness in the last 6 months?",
            ]),
        product("Assurity Modified", Tier::Modified)
            .with_description("Simplified issue coverage designed for those with health challenges.")
            .with_benefits([
                "Simplified application process",
                "Immediate coverage available",
                "No health exam required",
                "Final expense protection",
            ])
            .with_question_texts([
                "Do you need assistance with daily living activities (eating, bathing)?",
                "Are you currently bedridden or in hospice care?",
                "Do you have Alzheimer's or dementia?",
                "Have you had a major surgery in the past year?",
                "Have you had any organ transplant?",
            ]),
    ]
}

fn product(name: &str, tier: Tier) -> Product {
    Product::new(ProductId::derived(name), name, tier)
}
