use sentimentcore::Category;

pub const SUBJECTS: &[&str] = &[
    "The new release",
    "My morning commute",
    "This coffee",
    "The support team",
    "Today's match",
    "The latest update",
    "Our deploy",
    "The weather",
];

const POSITIVE_PHRASES: &[&str] = &[
    "is awesome",
    "was a great experience",
    "feels fast and smooth",
    "made me really happy",
    "is the best so far",
    "looks beautiful",
];

const NEGATIVE_PHRASES: &[&str] = &[
    "is terrible",
    "crashed twice",
    "was slow and buggy",
    "made me angry",
    "is the worst so far",
    "left me disappointed",
];

const NEUTRAL_PHRASES: &[&str] = &[
    "starts at nine",
    "is scheduled for Tuesday",
    "has three parts",
    "was mentioned in the report",
    "is on the second floor",
    "will be reviewed later",
];

pub const TAGS: &[&str] = &["#monday", "#rustlang", "#news", "#life", "#tech"];

/// Phrases whose wording carries the given sentiment.
pub fn phrases(category: Category) -> &'static [&'static str] {
    match category {
        Category::Positive => POSITIVE_PHRASES,
        Category::Negative => NEGATIVE_PHRASES,
        Category::Neutral => NEUTRAL_PHRASES,
    }
}
