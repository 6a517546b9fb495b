use ojfetch_util::select;
use scraper::{ElementRef, Html};

use crate::model::{Sample, SampleZipper};
use crate::service::{ElementRefExt as _, Scrape, ScrapeError};
use crate::{Console, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemPage {
    content: Html,
}

impl ProblemPage {
    pub fn new(content: Html) -> Self {
        Self { content }
    }

    pub fn extract_samples(&self, cnsl: &mut Console) -> Result<Vec<Sample>> {
        let mut zipper = SampleZipper::new();
        for elem in self.select_sample_blocks() {
            cnsl.debug(&format!("tag: {}", elem.0.html()))?;
            let (title, text) = elem.extract_title_and_text()?;
            zipper.add(text, title, cnsl)?;
        }
        Ok(zipper.finish()?)
    }

    fn select_sample_blocks(&self) -> impl Iterator<Item = SampleElem> {
        self.content
            .select(select!("div.input, div.output"))
            .map(SampleElem)
    }
}

impl Scrape for ProblemPage {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

/// `<div class="input">` or `<div class="output">`, holding a title then a `<pre>`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SampleElem<'a>(ElementRef<'a>);

impl SampleElem<'_> {
    fn extract_title_and_text(&self) -> std::result::Result<(String, String), ScrapeError> {
        let shape_error = |path: String, reason: &str| ScrapeError::UnexpectedShape {
            path,
            reason: reason.to_owned(),
        };

        let has_loose_text = self
            .0
            .children()
            .filter_map(|node| node.value().as_text())
            .any(|text| !text.trim().is_empty());
        if has_loose_text {
            return Err(shape_error(
                self.0.css_path(),
                "expected only a title and a pre, found text",
            ));
        }

        let children = self.0.child_elems();
        let (title, pre) = match children.as_slice() {
            [title, pre] => (title, pre),
            [] => return Err(shape_error(self.0.css_path(), "expected a title and a pre")),
            _ => {
                return Err(shape_error(
                    self.0.css_path(),
                    &format!("expected 2 child elements, found {}", children.len()),
                ))
            }
        };
        if !title.has_class("title") {
            return Err(shape_error(title.css_path(), "expected a title"));
        }
        if pre.value().name() != "pre" {
            return Err(shape_error(pre.css_path(), "expected a pre"));
        }

        Ok((title.inner_text().trim().to_owned(), pre_text(*pre)))
    }
}

/// Text of a `<pre>` as authored: `<br>` becomes a newline, anything else is
/// kept verbatim, trailing spaces included.
fn pre_text(pre: ElementRef) -> String {
    pre.children().fold(String::new(), |mut ret, node| {
        match ElementRef::wrap(node) {
            Some(elem) if elem.value().name() == "br" => ret.push('\n'),
            Some(elem) => ret.push_str(&elem.inner_text()),
            None => {
                if let Some(text) = node.value().as_text() {
                    ret.push_str(text);
                }
            }
        }
        ret
    })
}
