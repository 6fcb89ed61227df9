//! Content-type registry.
//!
//! The built-in registry is constructed once, on first use, and shared
//! read-only by every classification afterwards. Callers wanting different
//! definitions build their own [`Registry`] and pass it by reference.

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

/// Priority of a domain definition that does not declare one.
pub const DEFAULT_PRIORITY: u8 = 5;

/// Fixed priority of every structure-only candidate.
pub const STRUCTURE_PRIORITY: u8 = 6;

/// The closed taxonomy of content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    SportsMatches,
    SportsNews,
    EcommerceProducts,
    FashionProducts,
    NewsArticles,
    TechNews,
    SocialMedia,
    VideoContent,
    JobListings,
    ForumThreads,
    StreamingContent,
    MovieReviews,
    EducationalCourses,
    AcademicPapers,
    RealEstateListings,
    TravelListings,
    RecipeContent,
    RestaurantMenus,
    FinancialData,
    CryptoPrices,
    MedicalInfo,
    FitnessTracking,
    DeveloperContent,
    Documentation,
    WeatherData,
    KidsContent,
    GovernmentData,
    VehicleListings,
    GamingContent,
    BusinessData,
    TabularData,
    ListContent,
    ImageGallery,
    FormData,
    GeneralContent,
}

impl ContentType {
    /// Every content type, in declaration order.
    pub const ALL: [Self; 35] = [
        Self::SportsMatches,
        Self::SportsNews,
        Self::EcommerceProducts,
        Self::FashionProducts,
        Self::NewsArticles,
        Self::TechNews,
        Self::SocialMedia,
        Self::VideoContent,
        Self::JobListings,
        Self::ForumThreads,
        Self::StreamingContent,
        Self::MovieReviews,
        Self::EducationalCourses,
        Self::AcademicPapers,
        Self::RealEstateListings,
        Self::TravelListings,
        Self::RecipeContent,
        Self::RestaurantMenus,
        Self::FinancialData,
        Self::CryptoPrices,
        Self::MedicalInfo,
        Self::FitnessTracking,
        Self::DeveloperContent,
        Self::Documentation,
        Self::WeatherData,
        Self::KidsContent,
        Self::GovernmentData,
        Self::VehicleListings,
        Self::GamingContent,
        Self::BusinessData,
        Self::TabularData,
        Self::ListContent,
        Self::ImageGallery,
        Self::FormData,
        Self::GeneralContent,
    ];

    /// The snake_case tag, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SportsMatches => "sports_matches",
            Self::SportsNews => "sports_news",
            Self::EcommerceProducts => "ecommerce_products",
            Self::FashionProducts => "fashion_products",
            Self::NewsArticles => "news_articles",
            Self::TechNews => "tech_news",
            Self::SocialMedia => "social_media",
            Self::VideoContent => "video_content",
            Self::JobListings => "job_listings",
            Self::ForumThreads => "forum_threads",
            Self::StreamingContent => "streaming_content",
            Self::MovieReviews => "movie_reviews",
            Self::EducationalCourses => "educational_courses",
            Self::AcademicPapers => "academic_papers",
            Self::RealEstateListings => "real_estate_listings",
            Self::TravelListings => "travel_listings",
            Self::RecipeContent => "recipe_content",
            Self::RestaurantMenus => "restaurant_menus",
            Self::FinancialData => "financial_data",
            Self::CryptoPrices => "crypto_prices",
            Self::MedicalInfo => "medical_info",
            Self::FitnessTracking => "fitness_tracking",
            Self::DeveloperContent => "developer_content",
            Self::Documentation => "documentation",
            Self::WeatherData => "weather_data",
            Self::KidsContent => "kids_content",
            Self::GovernmentData => "government_data",
            Self::VehicleListings => "vehicle_listings",
            Self::GamingContent => "gaming_content",
            Self::BusinessData => "business_data",
            Self::TabularData => "tabular_data",
            Self::ListContent => "list_content",
            Self::ImageGallery => "image_gallery",
            Self::FormData => "form_data",
            Self::GeneralContent => "general_content",
        }
    }

    /// Look up a content type by its tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ct| ct.as_str() == tag)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A definition scored from address keywords and structural indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTypeDefinition {
    /// Identifier reported as the matched definition.
    pub name: String,
    pub content_type: ContentType,
    /// Substrings looked for in the lowercase address.
    pub keywords: Vec<String>,
    /// CSS selectors whose presence counts as evidence.
    pub indicators: Vec<String>,
    /// Tie-break weight; higher wins.
    pub priority: u8,
}

impl ContentTypeDefinition {
    #[must_use]
    pub fn new(name: &str, content_type: ContentType, keywords: &[&str], indicators: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            content_type,
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            indicators: indicators.iter().map(|i| (*i).to_string()).collect(),
            priority: DEFAULT_PRIORITY,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

/// A definition scored from structure alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureDefinition {
    pub name: String,
    pub content_type: ContentType,
    /// CSS selectors whose match counts are summed.
    pub indicators: Vec<String>,
    /// Summed matches needed before the definition becomes a candidate.
    pub min_count: usize,
}

impl StructureDefinition {
    #[must_use]
    pub fn new(name: &str, content_type: ContentType, indicators: &[&str], min_count: usize) -> Self {
        Self {
            name: name.to_string(),
            content_type,
            indicators: indicators.iter().map(|i| (*i).to_string()).collect(),
            min_count,
        }
    }
}

/// Immutable set of domain and structure definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registry {
    domains: Vec<ContentTypeDefinition>,
    structures: Vec<StructureDefinition>,
}

static BUILTIN: LazyLock<Registry> = LazyLock::new(|| Registry::new(builtin_domains(), builtin_structures()));

impl Registry {
    #[must_use]
    pub fn new(domains: Vec<ContentTypeDefinition>, structures: Vec<StructureDefinition>) -> Self {
        Self { domains, structures }
    }

    /// The process-wide built-in registry.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    #[must_use]
    pub fn domains(&self) -> &[ContentTypeDefinition] {
        &self.domains
    }

    #[must_use]
    pub fn structures(&self) -> &[StructureDefinition] {
        &self.structures
    }

    /// Find a domain definition by name.
    #[must_use]
    pub fn domain(&self, name: &str) -> Option<&ContentTypeDefinition> {
        self.domains.iter().find(|d| d.name == name)
    }
}

fn builtin_domains() -> Vec<ContentTypeDefinition> {
    use ContentType as C;
    use ContentTypeDefinition as D;

    vec![
        // Sports
        D::new(
            "sports_live",
            C::SportsMatches,
            &[
                "livescore", "live-score", "flashscore", "sofascore", "espn", "score", "goal", "sport",
                "match", "fixture", "yallakora", "kooora", "filgoal", "koora", "sportskeeda",
                "bleacherreport", "skysports", "bbc/sport", "nbcsports", "sportradar", "theathletic",
                "transfermarkt", "whoscored", "fotmob",
            ],
            &[
                r#"div[class*="match"]"#,
                r#"div[class*="fixture"]"#,
                r#"div[class*="score"]"#,
                r#"div[class*="team"]"#,
                r#"span[class*="time"]"#,
            ],
        )
        .with_priority(10),
        D::new(
            "sports_news",
            C::SportsNews,
            &[
                "sportingnews", "cbssports", "si.com", "marca", "as.com", "lequipe", "gazzetta",
                "sport.es", "ole.com", "fourfourtwo", "football365", "bleacherreport", "nbcsports",
                "theathletic", "bbc.com/sport",
            ],
            &["article", r#"div[class*="post"]"#, r#"h2[class*="title"]"#],
        )
        .with_priority(11),
        // Retail
        D::new(
            "ecommerce_major",
            C::EcommerceProducts,
            &[
                "amazon", "ebay", "alibaba", "aliexpress", "walmart", "target", "bestbuy", "etsy",
                "shopify", "woocommerce", "magento", "bigcommerce", "wayfair", "overstock", "newegg",
                "rakuten", "mercadolibre", "flipkart", "snapdeal", "zalando", "asos", "boohoo", "shein",
                "temu", "wish",
            ],
            &[
                r#"div[class*="product"]"#,
                r#"div[class*="item"]"#,
                r#"span[class*="price"]"#,
                r#"div[class*="cart"]"#,
                r#"button[class*="buy"]"#,
            ],
        )
        .with_priority(10),
        D::new(
            "ecommerce_fashion",
            C::FashionProducts,
            &[
                "nike", "adidas.com", "zara", "h&m", "hm.com", "uniqlo", "gap", "forever21", "mango",
                "pullbear", "bershka", "stradivarius", "urbanoutfitters", "anthropologie", "freepeople",
                "revolve", "farfetch", "net-a-porter", "ssense", "asos", "shein", "zalando", "boohoo",
                "-shoes", "/women", "/men",
            ],
            &[
                r#"div[class*="product"]"#,
                r#"div[class*="outfit"]"#,
                r#"div[class*="look"]"#,
            ],
        )
        .with_priority(12),
        // News
        D::new(
            "news_major",
            C::NewsArticles,
            &[
                "cnn", "bbc.com/news", "reuters", "apnews", "nytimes", "washingtonpost", "theguardian",
                "telegraph", "independent", "dailymail", "huffpost", "buzzfeed", "vice", "vox", "axios",
                "politico", "thehill", "newsweek", "time", "usatoday", "wsj", "ft.com", "aljazeera",
                "dw.com", "france24", "rt.com",
            ],
            &[
                "article",
                r#"div[class*="story"]"#,
                r#"div[class*="news"]"#,
                r#"h1[class*="headline"]"#,
            ],
        )
        .with_priority(10),
        D::new(
            "news_tech",
            C::TechNews,
            &[
                "techcrunch", "theverge", "wired", "arstechnica", "engadget", "gizmodo", "cnet", "zdnet",
                "thenextweb", "mashable", "digitaltrends", "androidpolice", "9to5mac", "macrumors",
                "xda-developers", "androidauthority",
            ],
            &["article", r#"div[class*="post"]"#, r#"div[class*="entry"]"#],
        )
        .with_priority(9),
        // Social
        D::new(
            "social_major",
            C::SocialMedia,
            &[
                "twitter", "facebook", "instagram", "pinterest", "tumblr", "tiktok", "snapchat",
                "discord", "telegram", "whatsapp", "wechat", "weibo",
            ],
            &[
                r#"div[class*="post"]"#,
                r#"div[class*="feed"]"#,
                r#"div[class*="tweet"]"#,
                r#"div[class*="story"]"#,
            ],
        )
        .with_priority(7),
        D::new(
            "social_video",
            C::VideoContent,
            &["youtube", "vimeo", "dailymotion", "twitch"],
            &["video", "iframe", r#"div[class*="video"]"#],
        )
        .with_priority(10),
        D::new(
            "social_professional",
            C::JobListings,
            &["linkedin"],
            &[
                r#"div[class*="job"]"#,
                r#"div[class*="profile"]"#,
                r#"div[class*="post"]"#,
            ],
        )
        .with_priority(11),
        D::new(
            "social_forum",
            C::ForumThreads,
            &["reddit", "/r/", "subreddit"],
            &[
                r#"div[class*="thread"]"#,
                r#"div[class*="post"]"#,
                r#"div[class*="comment"]"#,
            ],
        )
        .with_priority(10),
        // Entertainment
        D::new(
            "entertainment_streaming",
            C::StreamingContent,
            &[
                "netflix", "hulu", "disneyplus", "hbo", "max", "primevideo", "amazon/prime",
                "paramountplus", "peacock", "showtime", "starz", "crunchyroll", "funimation", "spotify",
                "applemusic", "soundcloud", "deezer", "tidal", "pandora", "twitch",
            ],
            &[
                r#"div[class*="title"]"#,
                r#"div[class*="card"]"#,
                r#"div[class*="media"]"#,
                r#"div[class*="stream"]"#,
                r#"div[class*="channel"]"#,
            ],
        )
        .with_priority(11),
        D::new(
            "entertainment_movies",
            C::MovieReviews,
            &[
                "imdb", "rottentomatoes", "metacritic", "letterboxd", "themoviedb", "trakt", "mubi",
                "criterion", "fandango", "moviefone", "filmaffinity",
            ],
            &[
                r#"div[class*="title"]"#,
                r#"span[class*="rating"]"#,
                r#"div[class*="review"]"#,
            ],
        )
        .with_priority(9),
        // Education
        D::new(
            "education_platforms",
            C::EducationalCourses,
            &[
                "coursera", "udemy", "edx", "khanacademy", "skillshare", "pluralsight",
                "linkedin/learning", "udacity", "codecademy", "datacamp", "treehouse", "masterclass",
                "brilliant", "duolingo", "memrise", "babbel",
            ],
            &[
                r#"div[class*="course"]"#,
                r#"div[class*="lesson"]"#,
                r#"div[class*="class"]"#,
            ],
        )
        .with_priority(8),
        D::new(
            "education_academic",
            C::AcademicPapers,
            &[
                "scholar.google", "researchgate", "academia.edu", "jstor", "pubmed", "arxiv",
                "sciencedirect", "springer", "ieee", "acm", "nature", "science",
            ],
            &[
                r#"div[class*="paper"]"#,
                r#"div[class*="article"]"#,
                r#"div[class*="publication"]"#,
            ],
        )
        .with_priority(9),
        // Jobs
        D::new(
            "jobs_platforms",
            C::JobListings,
            &[
                "linkedin/jobs", "indeed", "glassdoor", "monster", "careerbuilder", "ziprecruiter",
                "dice", "simplyhired", "snagajob", "flexjobs", "remote.co", "weworkremotely", "angel.co",
                "hired", "toptal", "upwork", "freelancer", "fiverr", "guru",
            ],
            &[
                r#"div[class*="job"]"#,
                r#"div[class*="position"]"#,
                r#"div[class*="listing"]"#,
            ],
        )
        .with_priority(9),
        // Real estate
        D::new(
            "real_estate",
            C::RealEstateListings,
            &[
                "zillow", "trulia", "realtor.com", "redfin", "apartments.com", "rightmove", "zoopla",
                "immobilienscout24", "seloger", "idealista", "propertypal", "daft.ie", "trovit", "mitula",
                "nestoria", "lamudi",
            ],
            &[
                r#"div[class*="property"]"#,
                r#"div[class*="listing"]"#,
                r#"span[class*="price"]"#,
            ],
        )
        .with_priority(9),
        // Travel
        D::new(
            "travel_booking",
            C::TravelListings,
            &[
                "booking", "expedia", "hotels", "airbnb", "vrbo", "tripadvisor", "kayak", "skyscanner",
                "priceline", "hotwire", "agoda", "hostelworld", "trivago", "momondo", "cheapflights",
                "orbitz", "travelocity", "lastminute",
            ],
            &[
                r#"div[class*="hotel"]"#,
                r#"div[class*="flight"]"#,
                r#"div[class*="room"]"#,
            ],
        )
        .with_priority(9),
        // Food
        D::new(
            "food_recipes",
            C::RecipeContent,
            &[
                "allrecipes", "foodnetwork", "tasty", "epicurious", "bonappetit", "seriouseats",
                "thekitchn", "simplyrecipes", "delish", "yummly", "cookpad", "food52", "bbcgoodfood",
                "jamieoliver", "recipetineats",
            ],
            &[
                r#"div[class*="recipe"]"#,
                r#"div[class*="ingredient"]"#,
                r#"div[class*="instruction"]"#,
            ],
        )
        .with_priority(8),
        D::new(
            "food_delivery",
            C::RestaurantMenus,
            &[
                "ubereats", "doordash", "grubhub", "deliveroo", "justeat", "postmates", "seamless",
                "yelp", "zomato", "swiggy", "foodpanda", "talabat",
            ],
            &[
                r#"div[class*="restaurant"]"#,
                r#"div[class*="menu"]"#,
                r#"div[class*="dish"]"#,
            ],
        )
        .with_priority(8),
        // Finance
        D::new(
            "finance_markets",
            C::FinancialData,
            &[
                "bloomberg/markets", "reuters/markets", "cnbc", "marketwatch", "seekingalpha",
                "finance.yahoo", "yahoo.com/finance", "investing.com", "tradingview", "stocktwits",
                "finviz", "wsj/markets", "ft.com/markets", "barrons", "thestreet", "morningstar",
            ],
            &[
                r#"div[class*="stock"]"#,
                r#"table[class*="quote"]"#,
                r#"div[class*="ticker"]"#,
            ],
        )
        .with_priority(11),
        D::new(
            "crypto_markets",
            C::CryptoPrices,
            &[
                "coinbase", "binance", "kraken", "coinmarketcap", "coingecko", "crypto.com", "gemini",
                "bitstamp", "bitfinex", "huobi", "okx", "kucoin", "gate.io", "cryptocompare", "messari",
                "glassnode", "nansen",
            ],
            &[
                r#"div[class*="coin"]"#,
                r#"div[class*="crypto"]"#,
                r#"div[class*="token"]"#,
            ],
        )
        .with_priority(10),
        // Health
        D::new(
            "health_medical",
            C::MedicalInfo,
            &[
                "webmd", "mayoclinic", "healthline", "medicalnewstoday", "medscape", "drugs.com",
                "patient.info", "nhs.uk", "clevelandclinic", "hopkinsmedicine", "nih.gov", "cdc.gov",
                "who.int", "health.harvard",
            ],
            &[
                "article",
                r#"div[class*="symptom"]"#,
                r#"div[class*="condition"]"#,
            ],
        )
        .with_priority(8),
        D::new(
            "fitness_apps",
            C::FitnessTracking,
            &[
                "myfitnesspal", "fitbit", "strava", "nike/training", "peloton", "classpass", "headspace",
                "calm", "noom", "loseit", "strongapp", "jefit", "bodybuilding",
            ],
            &[
                r#"div[class*="workout"]"#,
                r#"div[class*="exercise"]"#,
                r#"div[class*="routine"]"#,
            ],
        )
        .with_priority(7),
        // Developers
        D::new(
            "dev_platforms",
            C::DeveloperContent,
            &[
                "github", "gitlab", "bitbucket", "stackoverflow", "stackexchange", "devto", "hashnode",
                "medium", "dev.to", "hackernoon", "freecodecamp", "codepen", "jsfiddle", "codesandbox",
                "replit", "glitch",
            ],
            &[r#"div[class*="repo"]"#, r#"div[class*="code"]"#, "pre", "code"],
        )
        .with_priority(9),
        D::new(
            "dev_docs",
            C::Documentation,
            &[
                "docs", "documentation", "api", "developer", "reference", "guide", "tutorial", "mdn",
                "w3schools", "devdocs", "readthedocs", "swagger", "postman",
            ],
            &["article", r#"div[class*="doc"]"#, "code", "pre"],
        )
        .with_priority(8),
        // Communities
        D::new(
            "forums",
            C::ForumThreads,
            &[
                "forum", "community", "board", "discussion", "discourse", "phpbb", "vbulletin", "quora",
                "askubuntu", "superuser", "serverfault", "reddit", "4chan", "hackforums", "digitalpoint",
                "warriorforum", "blackhatworld",
            ],
            &[
                r#"div[class*="thread"]"#,
                r#"div[class*="post"]"#,
                r#"div[class*="reply"]"#,
            ],
        )
        .with_priority(7),
        D::new(
            "weather",
            C::WeatherData,
            &[
                "weather.com", "accuweather", "weather.gov", "weatherunderground", "metoffice",
                "wunderground", "yr.no", "meteo", "weather", "forecast", "clima",
            ],
            &[
                r#"div[class*="weather"]"#,
                r#"div[class*="forecast"]"#,
                r#"div[class*="temperature"]"#,
            ],
        )
        .with_priority(8),
        D::new(
            "kids_education",
            C::KidsContent,
            &[
                "abcmouse", "starfall", "funbrain", "coolmathgames", "mathplayground", "brainpop",
                "education.com", "ixl", "prodigy", "pbskids", "nickjr",
            ],
            &[
                r#"div[class*="game"]"#,
                r#"div[class*="activity"]"#,
                r#"div[class*="lesson"]"#,
            ],
        )
        .with_priority(6),
        D::new(
            "government",
            C::GovernmentData,
            &[
                "gov", "govt", "government", "parliament", "congress", "senate", "whitehouse",
                "europa.eu", "un.org", "data.gov", "census", "irs", "sec.gov",
            ],
            &[
                r#"div[class*="document"]"#,
                r#"div[class*="legislation"]"#,
                "table",
            ],
        )
        .with_priority(9),
        D::new(
            "automotive",
            C::VehicleListings,
            &[
                "cars.com", "autotrader", "carvana", "carmax", "edmunds", "kbb", "motortrend",
                "caranddriver", "autoblog", "jalopnik", "bring-a-trailer", "mobile.de", "autoscout24",
                "leboncoin", "coches.net", "subito.it", "/cars", "/vehicles",
            ],
            &[
                r#"div[class*="vehicle"]"#,
                r#"div[class*="car"]"#,
                r#"div[class*="listing"]"#,
            ],
        )
        .with_priority(11),
        D::new(
            "gaming",
            C::GamingContent,
            &[
                "steam", "epicgames", "gog", "origin", "ubisoft", "playstation", "xbox", "nintendo", "ign",
                "gamespot", "polygon", "kotaku", "pcgamer", "eurogamer", "gamefaqs", "twitch", "mixer",
                "mmorpg", "minecraft", "roblox", "fortnite",
            ],
            &[
                r#"div[class*="game"]"#,
                r#"div[class*="review"]"#,
                r#"div[class*="score"]"#,
            ],
        )
        .with_priority(8),
        D::new(
            "business",
            C::BusinessData,
            &[
                "salesforce", "hubspot", "zendesk", "slack", "asana", "trello", "monday", "notion",
                "confluence", "jira", "crunchbase", "owler", "zoominfo", "linkedin/company",
                "glassdoor/companies", "inc.com", "fastcompany",
            ],
            &[
                r#"div[class*="company"]"#,
                r#"div[class*="business"]"#,
                r#"div[class*="profile"]"#,
            ],
        )
        .with_priority(8),
    ]
}

fn builtin_structures() -> Vec<StructureDefinition> {
    use ContentType as C;
    use StructureDefinition as S;

    vec![
        S::new("tabular", C::TabularData, &["table", "thead", "tbody", "tr", "td", "th"], 1),
        S::new("listing", C::ListContent, &["ul > li", "ol > li", r#"div[class*="list"]"#], 5),
        S::new(
            "gallery",
            C::ImageGallery,
            &[r#"div[class*="gallery"]"#, r#"div[class*="grid"]"#, "img"],
            6,
        ),
        S::new(
            "video",
            C::VideoContent,
            &["video", r#"iframe[src*="youtube"]"#, r#"iframe[src*="vimeo"]"#],
            1,
        ),
        S::new("form", C::FormData, &["form", "input", "textarea", "select"], 3),
    ]
}
