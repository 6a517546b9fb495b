use ojfetch_util::select;
use scraper::{ElementRef, Html};

use crate::service::{Form, Page, Scrape};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPage<'a> {
    page: &'a Page,
    content: Html,
}

impl<'a> LoginPage<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self {
            page,
            content: page.html(),
        }
    }

    pub fn extract_form(&self) -> Result<Form> {
        let elem = self.find_required(select!("form#enterForm"), "form#enterForm")?;
        Form::from_elem(elem, self.page.url())
    }
}

impl Scrape for LoginPage<'_> {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}
