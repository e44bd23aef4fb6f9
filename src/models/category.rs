// src/models/category.rs

/// Freelance catalogue: main categories and their subcategories.
/// Button tokens refer to entries by index, so only append to this list.
pub const FREELANCE_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Writing & Content Creation",
        &[
            "Article Writing",
            "Blog Writing",
            "Copywriting",
            "Technical Writing",
            "SEO Content Writing",
            "Script Writing (YouTube, Ads)",
            "Translation",
            "Resume & Cover Letter Writing",
        ],
    ),
    (
        "Graphic Design & Creative",
        &[
            "Logo Design",
            "Poster/Flyer Design",
            "Social Media Post Design",
            "UI/UX Design",
            "Web Design",
            "Infographics",
            "Presentation Design",
            "T-Shirt & Merchandise Design",
        ],
    ),
    (
        "Web Development & Programming",
        &[
            "Frontend Development",
            "Backend Development",
            "Full-Stack Development",
            "WordPress Development",
            "Shopify/E-commerce Development",
            "App Development",
            "Bot Development",
            "API Integration",
        ],
    ),
    (
        "Digital Marketing",
        &[
            "SEO",
            "SMM",
            "SEM",
            "Email Marketing",
            "Affiliate Marketing",
            "Influencer Marketing",
            "Marketing Strategy",
            "Analytics",
        ],
    ),
    (
        "Video & Animation",
        &[
            "Video Editing",
            "Animation",
            "Explainer Videos",
            "Whiteboard Animation",
            "Motion Graphics",
            "YouTube Video Editing",
            "Reels/Shorts Editing",
            "Intro/Outro Creation",
        ],
    ),
    (
        "Audio & Music",
        &[
            "Voice Over",
            "Podcast Editing",
            "Audio Mixing/Mastering",
            "Music Composition",
            "Sound Effects",
            "Background Score",
        ],
    ),
    (
        "Business & Admin Support",
        &[
            "Virtual Assistant",
            "Data Entry",
            "Web Research",
            "Project Management",
            "Customer Support",
            "Email Handling",
            "CRM Management",
            "Lead Generation",
        ],
    ),
    (
        "Finance & Legal",
        &[
            "Accounting & Bookkeeping",
            "Financial Analysis",
            "Business Planning",
            "Tax Consulting",
            "Legal Writing",
            "Contract Drafting",
        ],
    ),
    (
        "Data Science & Analytics",
        &[
            "Data Analysis",
            "Machine Learning",
            "AI Projects",
            "Business Intelligence",
            "Data Visualization",
            "Data Entry & Scraping",
        ],
    ),
    (
        "Education & Coaching",
        &[
            "Online Tutoring",
            "Test Preparation",
            "Language Teaching",
            "Life Coaching",
            "Career Counseling",
            "Technical Training",
        ],
    ),
];

pub fn category_name(index: usize) -> Option<&'static str> {
    FREELANCE_CATEGORIES.get(index).map(|(name, _)| *name)
}

/// Display label for a picked subcategory, e.g. "Audio & Music / Voice Over".
pub fn pick_label(category: usize, subcategory: usize) -> Option<String> {
    let (name, subs) = FREELANCE_CATEGORIES.get(category)?;
    let sub = subs.get(subcategory)?;
    Some(format!("{} / {}", name, sub))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_label_joins_category_and_subcategory() {
        assert_eq!(
            pick_label(5, 0).as_deref(),
            Some("Audio & Music / Voice Over")
        );
    }

    #[test]
    fn out_of_range_picks_are_rejected() {
        assert!(pick_label(FREELANCE_CATEGORIES.len(), 0).is_none());
        assert!(pick_label(0, 99).is_none());
        assert!(category_name(99).is_none());
    }
}
