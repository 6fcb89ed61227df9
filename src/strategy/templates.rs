//! Fixed strategy templates per content type.

use crate::classify::ContentType;
use crate::extractor::Routine;

use super::StructuralKind;

/// Candidate selectors and routines for one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub selectors: &'static [&'static str],
    pub routines: &'static [Routine],
}

const fn template_of(selectors: &'static [&'static str], routines: &'static [Routine]) -> Template {
    Template { selectors, routines }
}

/// Template for content types without a dedicated one.
pub const GENERAL: Template = template_of(&["article", "div", "section", "main"], &[Routine::Generic]);

const LISTING: &[Routine] = &[Routine::ListingCards];
const ARTICLES: &[Routine] = &[Routine::ArticleListing];

/// Template for a content type.
#[must_use]
pub fn template(content_type: ContentType) -> Template {
    use ContentType as C;

    match content_type {
        C::SportsMatches => template_of(
            &[r#"div[class*="match"]"#, "div.liItem", r#"li[class*="match"]"#],
            &[Routine::FixtureMatches],
        ),
        C::SportsNews => template_of(
            &["article", r#"div[class*="post"]"#, r#"div[class*="story"]"#],
            ARTICLES,
        ),
        C::EcommerceProducts => template_of(
            &[
                r#"div[class*="product"]"#,
                r#"div[class*="item"]"#,
                r#"div[data-component-type="s-search-result"]"#,
            ],
            LISTING,
        ),
        C::FashionProducts => template_of(
            &[r#"div[class*="product"]"#, r#"article[class*="product"]"#],
            LISTING,
        ),
        C::NewsArticles => template_of(
            &["article", r#"div[class*="article"]"#, r#"div[class*="story"]"#],
            ARTICLES,
        ),
        C::TechNews => template_of(
            &["article", r#"div[class*="post"]"#, r#"div[class*="entry"]"#],
            ARTICLES,
        ),
        C::SocialMedia => template_of(
            &[r#"div[class*="post"]"#, r#"div[class*="tweet"]"#, r#"div[class*="feed"]"#],
            ARTICLES,
        ),
        C::StreamingContent => template_of(
            &[r#"div[class*="title"]"#, r#"div[class*="card"]"#, r#"a[class*="title"]"#],
            LISTING,
        ),
        C::MovieReviews => template_of(
            &[r#"div[class*="review"]"#, r#"div[class*="rating"]"#],
            &[Routine::ListingCards, Routine::ArticleListing],
        ),
        C::EducationalCourses => template_of(
            &[r#"div[class*="course"]"#, r#"div[class*="class"]"#],
            LISTING,
        ),
        C::AcademicPapers => template_of(
            &[r#"div[class*="paper"]"#, r#"div[class*="result"]"#],
            ARTICLES,
        ),
        C::JobListings => template_of(
            &[r#"div[class*="job"]"#, r#"li[class*="job"]"#, r#"div[class*="position"]"#],
            LISTING,
        ),
        C::RealEstateListings => template_of(
            &[r#"div[class*="property"]"#, r#"li[class*="listing"]"#],
            LISTING,
        ),
        C::TravelListings => template_of(
            &[r#"div[class*="hotel"]"#, r#"div[class*="flight"]"#],
            LISTING,
        ),
        C::RecipeContent => template_of(
            &[r#"div[class*="recipe"]"#, r#"div[class*="ingredient"]"#],
            &[Routine::ListingCards, Routine::ListBased],
        ),
        C::RestaurantMenus => template_of(
            &[r#"div[class*="menu"]"#, r#"div[class*="dish"]"#],
            LISTING,
        ),
        C::FinancialData => template_of(
            &["table", r#"div[class*="quote"]"#, r#"div[class*="stock"]"#],
            &[Routine::TableFocused, Routine::ListingCards],
        ),
        C::CryptoPrices => template_of(
            &[r#"div[class*="coin"]"#, r#"table[class*="price"]"#],
            &[Routine::TableFocused, Routine::ListingCards],
        ),
        C::MedicalInfo => template_of(&["article", r#"div[class*="content"]"#], ARTICLES),
        C::FitnessTracking => template_of(
            &[r#"div[class*="workout"]"#, r#"div[class*="exercise"]"#],
            LISTING,
        ),
        C::DeveloperContent => template_of(
            &[r#"div[class*="repo"]"#, "pre", "code"],
            &[Routine::ArticleListing, Routine::ListBased],
        ),
        C::Documentation => template_of(
            &["article", r#"div[class*="doc"]"#, r#"div[class*="api"]"#],
            &[Routine::ArticleListing, Routine::ListBased],
        ),
        C::ForumThreads => template_of(
            &[r#"div[class*="thread"]"#, r#"div[class*="post"]"#],
            ARTICLES,
        ),
        C::WeatherData => template_of(
            &[r#"div[class*="weather"]"#, r#"div[class*="forecast"]"#],
            &[Routine::TableFocused, Routine::ListingCards],
        ),
        C::GovernmentData => template_of(
            &["table", r#"div[class*="document"]"#],
            &[Routine::TableFocused, Routine::ArticleListing],
        ),
        C::VehicleListings => template_of(
            &[r#"div[class*="vehicle"]"#, r#"div[class*="car"]"#],
            LISTING,
        ),
        C::GamingContent => template_of(
            &[r#"div[class*="game"]"#, r#"div[class*="review"]"#],
            LISTING,
        ),
        C::BusinessData => template_of(
            &[r#"div[class*="company"]"#, r#"div[class*="profile"]"#],
            LISTING,
        ),
        C::TabularData => template_of(&["table", "tr", "td", "th"], &[Routine::TableFocused]),
        C::ListContent => template_of(&["ul, ol", "li"], &[Routine::ListBased]),
        C::ImageGallery => template_of(&["img", r#"div[class*="gallery"]"#], &[Routine::Generic]),
        C::VideoContent => template_of(&["video", "iframe"], &[Routine::Generic]),
        C::KidsContent | C::FormData | C::GeneralContent => GENERAL,
    }
}

/// Template for the coarse structural path.
#[must_use]
pub fn structural_template(kind: StructuralKind) -> Template {
    match kind {
        StructuralKind::TableFocused => template_of(&["table"], &[Routine::TableFocused]),
        StructuralKind::BlogListing => template_of(&["article"], ARTICLES),
        StructuralKind::ProductListing => template_of(&[], LISTING),
        StructuralKind::General => GENERAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_has_a_routine() {
        for ct in ContentType::ALL {
            let t = template(ct);
            assert!(!t.routines.is_empty(), "{ct} has no routine");
            assert!(!t.selectors.is_empty(), "{ct} has no selector");
        }
    }

    #[test]
    fn test_product_like_types_use_listing_routine() {
        for ct in [
            ContentType::EcommerceProducts,
            ContentType::FashionProducts,
            ContentType::JobListings,
            ContentType::VehicleListings,
        ] {
            assert_eq!(template(ct).routines, LISTING);
        }
    }

    #[test]
    fn test_list_content_scopes_every_list_kind() {
        let t = template(ContentType::ListContent);
        assert_eq!(t.selectors[0], "ul, ol");
        assert_eq!(t.routines, &[Routine::ListBased]);
    }

    #[test]
    fn test_tables_first_for_financial_data() {
        assert_eq!(template(ContentType::FinancialData).routines[0], Routine::TableFocused);
        assert_eq!(template(ContentType::TabularData).routines, &[Routine::TableFocused]);
    }
}
