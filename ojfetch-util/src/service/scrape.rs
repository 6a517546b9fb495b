use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Page layout the scraper did not expect.
///
/// These are never retried or skipped: the markup of the site changed, or
/// the page is not the one that was asked for (login wall, removed problem).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("Could not find element : {selector}")]
    NotFound { selector: String },
    #[error("Found unexpected structure at {path} : {reason}")]
    UnexpectedShape { path: String, reason: String },
    #[error("Found {title:?} where sample {expected} was expected")]
    MismatchedSample { expected: &'static str, title: String },
    #[error("Found sample input without output : {title:?}")]
    DanglingSample { title: String },
}

pub trait Scrape {
    fn elem(&self) -> ElementRef;

    fn find_first(&self, selector: &Selector) -> Option<ElementRef> {
        self.elem().select(selector).next()
    }

    fn find_required(
        &self,
        selector: &Selector,
        selector_str: &str,
    ) -> Result<ElementRef, ScrapeError> {
        self.find_first(selector).ok_or_else(|| ScrapeError::NotFound {
            selector: selector_str.to_owned(),
        })
    }

    fn inner_text(&self) -> String {
        self.elem().text().fold(String::new(), |mut ret, s| {
            ret.push_str(s);
            ret
        })
    }
}

impl Scrape for ElementRef<'_> {
    fn elem(&self) -> ElementRef {
        *self
    }
}

impl Scrape for Html {
    fn elem(&self) -> ElementRef {
        self.root_element()
    }
}

pub trait ElementRefExt {
    fn has_class(&self, class: &str) -> bool;

    fn child_elems(&self) -> Vec<ElementRef>;

    fn css_path(&self) -> String;
}

impl ElementRefExt for ElementRef<'_> {
    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }

    fn child_elems(&self) -> Vec<ElementRef> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    /// Selector-like path from the document root, e.g. `html > body > div.input`.
    fn css_path(&self) -> String {
        let mut parts = vec![];
        let mut node = Some(*self);
        while let Some(elem) = node {
            let value = elem.value();
            let mut part = value.name().to_owned();
            if let Some(id) = value.id() {
                part.push('#');
                part.push_str(id);
            }
            for class in value.classes() {
                part.push('.');
                part.push_str(class);
            }
            parts.push(part);
            node = elem.parent().and_then(ElementRef::wrap);
        }
        parts.reverse();
        parts.join(" > ")
    }
}
