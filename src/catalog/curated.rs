//! Curated topics shown on the recommendations page.

/// Page size for each curated topic.
pub const SECTION_SIZE: u32 = 6;

/// A fixed `(title, query)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuratedTopic {
    pub title: &'static str,
    pub q: &'static str,
}

/// Topics in display order.
pub static CURATED_TOPICS: [CuratedTopic; 6] = [
    CuratedTopic {
        title: "Trending Fiction",
        q: "subject:fiction bestsellers",
    },
    CuratedTopic {
        title: "Personal Growth",
        q: "subject:self-help",
    },
    CuratedTopic {
        title: "Tech & Programming",
        q: "subject:programming OR subject:technology",
    },
    CuratedTopic {
        title: "Business & Strategy",
        q: "subject:business strategy",
    },
    CuratedTopic {
        title: "Sci\u{2011}Fi Classics",
        q: "subject:science fiction classics",
    },
    CuratedTopic {
        title: "For Kids",
        q: "subject:children",
    },
];
