//! Pull movie records out of a listing page.
//!
//! Each movie sits in a `div.lister-item.mode-advanced` container. The title is the
//! first `h3 a`, genres are the comma separated text of `p.text-muted span.genre`,
//! and people are the links of the last class-less `<p>` ("Director: ... | Stars: ...").

use lazy_static::lazy_static;
use movie_core::MovieRecord;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    static ref SEL_MOVIE: Selector = Selector::parse("div.lister-item.mode-advanced").expect("valid selector");
    static ref SEL_TITLE: Selector = Selector::parse("h3 a").expect("valid selector");
    static ref SEL_GENRE: Selector = Selector::parse("p.text-muted span.genre").expect("valid selector");
    static ref SEL_P: Selector = Selector::parse("p").expect("valid selector");
    static ref SEL_A: Selector = Selector::parse("a").expect("valid selector");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractWarning {
    /// Container at this position on the page had no title link; it was skipped.
    MissingTitle { position: usize },
    /// The people paragraph did not mention both "Director" and "Stars".
    MissingPeopleMarkers { title: String },
}

#[derive(Debug, Default)]
pub struct PageExtract {
    pub records: Vec<MovieRecord>,
    pub warnings: Vec<ExtractWarning>,
}

pub fn extract_page(html: &str) -> PageExtract {
    let doc = Html::parse_document(html);
    let mut out = PageExtract::default();
    for (position, movie) in doc.select(&SEL_MOVIE).enumerate() {
        match extract_movie(movie) {
            Some((record, warning)) => {
                if let Some(w) = warning {
                    tracing::warn!(title = %record.title_pretty, "could not find directors or stars");
                    out.warnings.push(w);
                }
                out.records.push(record);
            }
            None => {
                tracing::warn!(position, "movie container without a title");
                out.warnings.push(ExtractWarning::MissingTitle { position });
            }
        }
    }
    out
}

fn extract_movie(movie: ElementRef<'_>) -> Option<(MovieRecord, Option<ExtractWarning>)> {
    let title = movie.select(&SEL_TITLE).next().map(text_of)?;
    let title = title.trim();
    if title.is_empty() { return None; }

    let genres: Vec<String> = movie
        .select(&SEL_GENRE)
        .next()
        .map(|span| {
            text_of(span)
                .split(',')
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let people_p = movie
        .select(&SEL_P)
        .filter(|p| p.value().attr("class").map_or(true, |c| c.trim().is_empty()))
        .last();

    let (people, has_markers) = match people_p {
        Some(p) => {
            let text = text_of(p);
            let names: Vec<String> = p.select(&SEL_A).map(text_of).collect();
            (names, text.contains("Director") && text.contains("Stars"))
        }
        None => (Vec::new(), false),
    };

    let record = MovieRecord::new(title, genres, people);
    let warning = (!has_markers).then(|| ExtractWarning::MissingPeopleMarkers { title: record.title_pretty.clone() });
    Some((record, warning))
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}
