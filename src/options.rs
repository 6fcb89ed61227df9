//! Configuration options for analysis and extraction.
//!
//! The `Options` struct carries every threshold and cap used by the pipeline.
//! It is built once and passed by reference; nothing mutates it afterwards.

use serde::{Deserialize, Serialize};

/// How much filtering the main-content heuristic applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileDepth {
    /// Every candidate is considered regardless of its text length.
    Basic,
    /// Class/id candidates must exceed `main_content_min_text` characters.
    #[default]
    Advanced,
}

/// Configuration options for the analysis and extraction pipeline.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::Options;
///
/// let options = Options {
///     max_listing_records: 20,
///     check_access_wall: false,
///     ..Options::default()
/// };
/// assert_eq!(options.max_article_records, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Main-content filtering mode.
    ///
    /// Default: `ProfileDepth::Advanced`
    pub profile_depth: ProfileDepth,

    /// Minimum text length for class/id main-content candidates (Advanced only).
    ///
    /// Default: `500`
    pub main_content_min_text: usize,

    /// Minimum direct `li` children for a list pattern.
    ///
    /// Default: `3`
    pub list_min_items: usize,

    /// Maximum number of list patterns reported.
    ///
    /// Default: `15`
    pub max_list_patterns: usize,

    /// Minimum members sharing a class signature for a div-group pattern.
    ///
    /// Default: `5`
    pub div_group_min_members: usize,

    /// Maximum number of div-group patterns reported.
    ///
    /// Default: `10`
    pub max_div_groups: usize,

    /// Minimum direct children of a grid/flex container.
    ///
    /// Default: `4`
    pub grid_min_children: usize,

    /// Maximum number of grid patterns reported.
    ///
    /// Default: `5`
    pub max_grid_patterns: usize,

    /// Minimum matching elements for a card keyword to qualify.
    ///
    /// Default: `3`
    pub card_min_matches: usize,

    /// Maximum number of card patterns reported.
    ///
    /// Default: `5`
    pub max_card_patterns: usize,

    /// Text blocks must be strictly longer than this (characters).
    ///
    /// Default: `100`
    pub text_block_min_len: usize,

    /// Maximum number of text blocks reported.
    ///
    /// Default: `15`
    pub max_text_blocks: usize,

    /// Cap on listing/card records.
    ///
    /// Default: `50`
    pub max_listing_records: usize,

    /// Cap on article records.
    ///
    /// Default: `30`
    pub max_article_records: usize,

    /// Cap on fixture containers inspected.
    ///
    /// Default: `50`
    pub max_fixture_containers: usize,

    /// Characters of page text kept by the generic fallback.
    ///
    /// Default: `2000`
    pub generic_text_limit: usize,

    /// Headings kept by the generic fallback.
    ///
    /// Default: `10`
    pub generic_heading_limit: usize,

    /// Links kept by the generic fallback.
    ///
    /// Default: `20`
    pub generic_link_limit: usize,

    /// Image addresses kept by the generic fallback.
    ///
    /// Default: `10`
    pub generic_image_limit: usize,

    /// Reject pages that look like login/authentication walls.
    ///
    /// Default: `true`
    pub check_access_wall: bool,

    /// Markup shorter than this (after trimming) counts as an access wall.
    ///
    /// Default: `500`
    pub min_markup_len: usize,

    /// Skip the domain classifier and pick a strategy from structural facts only.
    ///
    /// Default: `false`
    pub skip_classification: bool,
}

impl Options {
    /// Effective main-content threshold for the configured profile depth.
    #[must_use]
    pub fn main_content_threshold(&self) -> usize {
        match self.profile_depth {
            ProfileDepth::Basic => 0,
            ProfileDepth::Advanced => self.main_content_min_text,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            profile_depth: ProfileDepth::Advanced,
            main_content_min_text: 500,
            list_min_items: 3,
            max_list_patterns: 15,
            div_group_min_members: 5,
            max_div_groups: 10,
            grid_min_children: 4,
            max_grid_patterns: 5,
            card_min_matches: 3,
            max_card_patterns: 5,
            text_block_min_len: 100,
            max_text_blocks: 15,
            max_listing_records: 50,
            max_article_records: 30,
            max_fixture_containers: 50,
            generic_text_limit: 2000,
            generic_heading_limit: 10,
            generic_link_limit: 20,
            generic_image_limit: 10,
            check_access_wall: true,
            min_markup_len: 500,
            skip_classification: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_caps() {
        let opts = Options::default();

        assert_eq!(opts.max_list_patterns, 15);
        assert_eq!(opts.max_div_groups, 10);
        assert_eq!(opts.max_grid_patterns, 5);
        assert_eq!(opts.max_card_patterns, 5);
        assert_eq!(opts.max_text_blocks, 15);
        assert_eq!(opts.max_listing_records, 50);
        assert_eq!(opts.max_article_records, 30);
        assert_eq!(opts.max_fixture_containers, 50);
        assert_eq!(opts.generic_text_limit, 2000);
        assert!(opts.check_access_wall);
        assert!(!opts.skip_classification);
    }

    #[test]
    fn test_main_content_threshold_follows_depth() {
        let advanced = Options::default();
        assert_eq!(advanced.main_content_threshold(), 500);

        let basic = Options {
            profile_depth: ProfileDepth::Basic,
            ..Options::default()
        };
        assert_eq!(basic.main_content_threshold(), 0);
    }

    #[test]
    fn test_custom_thresholds() {
        let opts = Options {
            list_min_items: 5,
            text_block_min_len: 250,
            ..Options::default()
        };

        assert_eq!(opts.list_min_items, 5);
        assert_eq!(opts.text_block_min_len, 250);
        assert_eq!(opts.div_group_min_members, 5);
    }
}
