/// Display bucket derived from a task's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Programming and hands-on practice
    Practical,
    SpecializedKnowledge,
    Algorithms,
    /// GATE exam preparation
    Gate,
    /// FHE / ZKP / MPC
    Cryptography,
    SurpriseAcademic,
    SurprisePersonal,
    SurpriseProject,
    Other,
}

/// Keyword rules, checked top to bottom. First rule with any matching keyword wins,
/// so a label containing both "Algorithms" and "GATE" is Algorithms.
const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["Programming", "Practical Application"], Category::Practical),
    (&["Specialized Knowledge"], Category::SpecializedKnowledge),
    (&["Algorithms"], Category::Algorithms),
    (&["GATE"], Category::Gate),
    (&["FHE", "ZKP", "MPC"], Category::Cryptography),
    (&["Surprise: Academic"], Category::SurpriseAcademic),
    (&["Surprise: Personal"], Category::SurprisePersonal),
    (&["Surprise: Project"], Category::SurpriseProject),
];

/// Reference links by keyword, same first-match order as the categories
const RESOURCE_LINKS: &[(&str, &str)] = &[
    ("Programming", "https://www.youtube.com/watch?v=rfscVS0vtbw"),
    ("Specialized Knowledge", "https://doc.rust-lang.org/book/"),
    ("Algorithms", "https://www.coursera.org/specializations/algorithms"),
    ("GATE", "https://gate.iitk.ac.in/gate_syllabus.html"),
    ("FHE", "https://eprint.iacr.org/2011/232.pdf"),
    ("ZKP", "https://zkproof.org/"),
    ("MPC", "https://eprint.iacr.org/2020/300.pdf"),
];

impl Category {
    /// Classify a task label. Matching is literal and case-sensitive.
    pub fn of(text: &str) -> Self {
        CATEGORY_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Other)
    }

    /// Get the display name for this category (used in the legend and agenda)
    pub fn name(&self) -> &'static str {
        match self {
            Category::Practical => "Programming / Practical",
            Category::SpecializedKnowledge => "Specialized Knowledge",
            Category::Algorithms => "Algorithms",
            Category::Gate => "GATE Preparation",
            Category::Cryptography => "Cryptography (FHE/ZKP/MPC)",
            Category::SurpriseAcademic => "Surprise: Academic",
            Category::SurprisePersonal => "Surprise: Personal",
            Category::SurpriseProject => "Surprise: Project",
            Category::Other => "Other",
        }
    }

    /// Get all categories in legend order
    pub fn all() -> &'static [Category] {
        &[
            Category::Practical,
            Category::SpecializedKnowledge,
            Category::Algorithms,
            Category::Gate,
            Category::Cryptography,
            Category::Other,
            Category::SurpriseAcademic,
            Category::SurprisePersonal,
            Category::SurpriseProject,
        ]
    }
}

/// Static reference link for a task label, or "" when no keyword matches
pub fn resource_link_for(text: &str) -> &'static str {
    RESOURCE_LINKS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, url)| *url)
        .unwrap_or("")
}
