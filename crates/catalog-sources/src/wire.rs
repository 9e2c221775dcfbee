// Response payloads as the catalog service sends them.
//
// Current endpoints use TMDB-style records (`id`, `*_arabic` localized fields).
// The older Jikan-backed endpoints use `mal_id`, nested `images` and a
// `pagination` object. Both are converted to the shared model types here.

use catalog_models::{
    CastMember, CatalogItem, ContentType, Genre, Image, ImageSet, ItemDetails, NewsArticle,
    NewsPage, Person, Video, VideoList,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentGenre {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(rename = "name_arabic")]
    name_localized: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentItem {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "title_arabic")]
    title_localized: Option<String>,
    original_title: Option<String>,
    overview: Option<String>,
    #[serde(rename = "overview_arabic")]
    overview_localized: Option<String>,
    vote_average: Option<f64>,
    audience_rating: Option<f64>,
    vote_count: Option<u64>,
    popularity: Option<f64>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    episode_count: Option<u32>,
    status: Option<String>,
    #[serde(default)]
    genres: Option<Vec<CurrentGenre>>,
    content_type: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentListing {
    pub results: Vec<CurrentItem>,
    pub page: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentCast {
    id: u64,
    name: String,
    character: Option<String>,
    profile_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentNetwork {
    name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentDetails {
    #[serde(flatten)]
    item: CurrentItem,
    tagline: Option<String>,
    runtime: Option<u32>,
    homepage: Option<String>,
    #[serde(default)]
    networks: Vec<CurrentNetwork>,
    #[serde(default)]
    cast: Vec<CurrentCast>,
    #[serde(default)]
    recommendations: Vec<CurrentItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentVideo {
    key: String,
    #[serde(default)]
    name: String,
    site: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentVideoList {
    #[serde(default)]
    results: Vec<CurrentVideo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentImage {
    file_path: String,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentImageSet {
    #[serde(default)]
    posters: Vec<CurrentImage>,
    #[serde(default)]
    backdrops: Vec<CurrentImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentPerson {
    id: u64,
    name: String,
    #[serde(rename = "name_arabic")]
    name_localized: Option<String>,
    biography: Option<String>,
    birthday: Option<String>,
    place_of_birth: Option<String>,
    known_for_department: Option<String>,
    profile_path: Option<String>,
    #[serde(default)]
    known_for: Vec<CurrentItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentArticle {
    id: String,
    title: String,
    #[serde(rename = "title_arabic")]
    title_localized: Option<String>,
    #[serde(default)]
    summary: String,
    #[serde(rename = "summary_arabic")]
    summary_localized: Option<String>,
    link: String,
    #[serde(default)]
    published: String,
    author: Option<String>,
    image_url: Option<String>,
    #[serde(default)]
    source: String,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentNewsPage {
    articles: Vec<CurrentArticle>,
    #[serde(default)]
    total: u64,
    page: Option<u32>,
    #[serde(default)]
    source: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyImageUrls {
    image_url: Option<String>,
    large_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyImages {
    jpg: Option<LegacyImageUrls>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyAired {
    from: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyGenre {
    mal_id: u64,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyItem {
    mal_id: u64,
    #[serde(default)]
    title: String,
    title_english: Option<String>,
    images: Option<LegacyImages>,
    score: Option<f64>,
    scored_by: Option<u64>,
    members: Option<u64>,
    episodes: Option<u32>,
    status: Option<String>,
    synopsis: Option<String>,
    aired: Option<LegacyAired>,
    #[serde(default)]
    genres: Option<Vec<LegacyGenre>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyPagination {
    current_page: Option<u32>,
    has_next_page: Option<bool>,
    last_visible_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyListing {
    pub data: Vec<LegacyItem>,
    pub pagination: Option<LegacyPagination>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyDetails {
    pub data: LegacyItem,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyGenreList {
    pub data: Vec<LegacyGenre>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentGenreList {
    pub genres: Vec<CurrentGenre>,
}

impl From<CurrentGenre> for Genre {
    fn from(g: CurrentGenre) -> Self {
        Genre {
            id: g.id,
            name: g.name,
            name_localized: g.name_localized,
        }
    }
}

impl From<LegacyGenre> for Genre {
    fn from(g: LegacyGenre) -> Self {
        Genre::new(g.mal_id, g.name)
    }
}

impl From<CurrentItem> for CatalogItem {
    fn from(item: CurrentItem) -> Self {
        CatalogItem {
            id: item.id,
            // Unknown kinds are treated like legacy items
            content_type: item.content_type.and_then(|c| c.parse::<ContentType>().ok()),
            title: item.title.unwrap_or_default(),
            title_localized: item.title_localized,
            original_title: item.original_title,
            overview: item.overview,
            overview_localized: item.overview_localized,
            rating: item.vote_average.or(item.audience_rating),
            vote_count: item.vote_count,
            popularity: item.popularity,
            release_date: item.release_date,
            first_air_date: item.first_air_date,
            episode_count: item.episode_count,
            status: item.status,
            genres: item.genres.unwrap_or_default().into_iter().map(Genre::from).collect(),
            poster_path: item.poster_path,
            backdrop_path: item.backdrop_path,
        }
    }
}

impl From<LegacyItem> for CatalogItem {
    fn from(item: LegacyItem) -> Self {
        let poster = item
            .images
            .and_then(|i| i.jpg)
            .and_then(|jpg| jpg.large_image_url.or(jpg.image_url));
        CatalogItem {
            id: item.mal_id,
            content_type: None,
            title: item.title,
            title_localized: item.title_english,
            original_title: None,
            overview: item.synopsis,
            overview_localized: None,
            rating: item.score,
            vote_count: item.scored_by,
            popularity: item.members.map(|m| m as f64),
            release_date: item.aired.and_then(|a| a.from),
            first_air_date: None,
            episode_count: item.episodes,
            status: item.status,
            genres: item.genres.unwrap_or_default().into_iter().map(Genre::from).collect(),
            poster_path: poster,
            backdrop_path: None,
        }
    }
}

impl LegacyPagination {
    /// Legacy responses only say whether a next page exists; fold that into a page count
    pub(crate) fn page_and_total(&self, requested_page: u32) -> (u32, Option<u32>) {
        let page = self.current_page.unwrap_or(requested_page);
        let total = self.last_visible_page.or_else(|| {
            self.has_next_page
                .map(|has_next| if has_next { page + 1 } else { page })
        });
        (page, total)
    }
}

impl From<CurrentDetails> for ItemDetails {
    fn from(d: CurrentDetails) -> Self {
        ItemDetails {
            item: d.item.into(),
            tagline: d.tagline,
            runtime: d.runtime,
            homepage: d.homepage,
            networks: d.networks.into_iter().map(|n| n.name).collect(),
            cast: d
                .cast
                .into_iter()
                .map(|c| CastMember {
                    id: c.id,
                    name: c.name,
                    character: c.character,
                    profile_path: c.profile_path,
                })
                .collect(),
            recommendations: d.recommendations.into_iter().map(CatalogItem::from).collect(),
        }
    }
}

impl From<CurrentVideoList> for VideoList {
    fn from(v: CurrentVideoList) -> Self {
        VideoList {
            results: v
                .results
                .into_iter()
                .map(|v| Video {
                    key: v.key,
                    name: v.name,
                    site: v.site,
                    kind: v.kind,
                })
                .collect(),
        }
    }
}

impl From<CurrentImage> for Image {
    fn from(i: CurrentImage) -> Self {
        Image {
            file_path: i.file_path,
            width: i.width,
            height: i.height,
        }
    }
}

impl From<CurrentImageSet> for ImageSet {
    fn from(s: CurrentImageSet) -> Self {
        ImageSet {
            posters: s.posters.into_iter().map(Image::from).collect(),
            backdrops: s.backdrops.into_iter().map(Image::from).collect(),
        }
    }
}

impl From<CurrentPerson> for Person {
    fn from(p: CurrentPerson) -> Self {
        Person {
            id: p.id,
            name: p.name,
            name_localized: p.name_localized,
            biography: p.biography,
            birthday: p.birthday,
            place_of_birth: p.place_of_birth,
            known_for_department: p.known_for_department,
            profile_path: p.profile_path,
            known_for: p.known_for.into_iter().map(CatalogItem::from).collect(),
        }
    }
}

impl From<CurrentArticle> for NewsArticle {
    fn from(a: CurrentArticle) -> Self {
        NewsArticle {
            id: a.id,
            title: a.title,
            title_localized: a.title_localized,
            summary: a.summary,
            summary_localized: a.summary_localized,
            link: a.link,
            published: a.published,
            author: a.author,
            image_url: a.image_url,
            source: a.source,
            category: a.category,
        }
    }
}

impl CurrentNewsPage {
    pub(crate) fn into_page(self, requested_page: u32) -> NewsPage {
        NewsPage {
            articles: self.articles.into_iter().map(NewsArticle::from).collect(),
            total: self.total,
            page: self.page.unwrap_or(requested_page),
            source: self.source,
        }
    }
}
