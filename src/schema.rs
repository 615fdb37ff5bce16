/// Column-name constants for the engagement export schema.
/// Single source of truth for the loader, the chart keys and the Python binding.

// ── Post export columns ─────────────────────────────────────────────────────
pub mod post {
    pub const CREATE_TIME_ISO: &str = "createTimeISO";
    pub const DIGG_COUNT: &str = "diggCount";
    pub const COMMENT_COUNT: &str = "commentCount";
    pub const COLLECT_COUNT: &str = "collectCount";
    pub const PLAY_COUNT: &str = "playCount";
    pub const SHARE_COUNT: &str = "shareCount";

    /// The five engagement counters, in chart order.
    pub const COUNTERS: [&str; 5] = [
        DIGG_COUNT,
        COMMENT_COUNT,
        COLLECT_COUNT,
        PLAY_COUNT,
        SHARE_COUNT,
    ];

    /// Every column a valid export must carry.
    pub const REQUIRED: [&str; 6] = [
        CREATE_TIME_ISO,
        DIGG_COUNT,
        COMMENT_COUNT,
        COLLECT_COUNT,
        PLAY_COUNT,
        SHARE_COUNT,
    ];
}

// ── Derived series keys ─────────────────────────────────────────────────────
pub mod cumulative {
    pub const PREFIX: &str = "cumulative_";
    pub const TOTAL_INSIGHTS: &str = "total_insights";
}

// ── Defaults ────────────────────────────────────────────────────────────────
pub mod defaults {
    pub const INPUT_PATH: &str = "files/dataset_free-tiktok-scraper_2024-09-04_14-57-00-312.csv";
    pub const OUTPUT_PATH: &str = "tiktok_engagement.html";
    pub const TITLE: &str = "Cumulative TikTok Engagement Growth Over Time";
    pub const METRIC: &str = super::post::DIGG_COUNT;
}
