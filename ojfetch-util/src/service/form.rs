use anyhow::Context as _;
use getset::{CopyGetters, Getters};
use reqwest::Url;
use scraper::ElementRef;

use crate::select;
use crate::service::scrape::{ElementRefExt as _, ScrapeError};
use crate::Result;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FormMethod {
    Get,
    Post,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Enctype {
    UrlEncoded,
    Multipart,
}

/// Everything needed to send a form the way a browser would.
#[derive(Getters, CopyGetters, Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
    #[get_copy = "pub"]
    method: FormMethod,
    #[get = "pub"]
    url: Url,
    #[get_copy = "pub"]
    enctype: Enctype,
    #[get = "pub"]
    fields: Vec<(String, String)>,
}

/// Field values of an HTML form, prefilled from its `<input>` elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    method: FormMethod,
    action: Url,
    enctype: Enctype,
    fields: Vec<(String, String)>,
}

impl Form {
    pub fn from_elem(form: ElementRef, base_url: &Url) -> Result<Self> {
        let value = form.value();
        if value.name() != "form" {
            return Err(ScrapeError::UnexpectedShape {
                path: form.css_path(),
                reason: "expected a form element".to_owned(),
            }
            .into());
        }

        let method = match value.attr("method") {
            Some(method) if method.eq_ignore_ascii_case("post") => FormMethod::Post,
            _ => FormMethod::Get,
        };
        let action = match value.attr("action") {
            Some(action) if !action.is_empty() => base_url
                .join(action)
                .with_context(|| format!("Could not parse form action : {}", action))?,
            _ => base_url.clone(),
        };
        let enctype = match value.attr("enctype") {
            Some(enctype) if enctype.eq_ignore_ascii_case("multipart/form-data") => {
                Enctype::Multipart
            }
            _ => Enctype::UrlEncoded,
        };

        let mut ret = Self {
            method,
            action,
            enctype,
            fields: vec![],
        };
        for input in form.select(select!("input")) {
            let input = input.value();
            if let Some(ty) = input.attr("type") {
                if ty.eq_ignore_ascii_case("checkbox") || ty.eq_ignore_ascii_case("radio") {
                    continue;
                }
            }
            if let (Some(name), Some(value)) = (input.attr("name"), input.attr("value")) {
                ret.set(name, value);
            }
        }
        Ok(ret)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let (name, value) = (name.into(), value.into());
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some(field) => field.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    pub fn unset(&mut self, name: &str) -> &mut Self {
        self.fields.retain(|(key, _)| key != name);
        self
    }

    pub fn request(&self) -> FormRequest {
        FormRequest {
            method: self.method,
            url: self.action.clone(),
            enctype: self.enctype,
            fields: self.fields.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;
    use crate::service::Scrape as _;

    static LOGIN_HTML: &str = r#"
<html><body>
<form method="post" action="" id="enterForm">
  <input type="hidden" name="csrf_token" value="0123abcd"/>
  <input type="hidden" name="action" value="enter"/>
  <input type="hidden" name="ftaa" value=""/>
  <input name="handleOrEmail" id="handleOrEmail" value=""/>
  <input type="password" name="password" id="password"/>
  <input type="checkbox" name="remember" id="remember" value="on"/>
  <input type="submit" class="submit" value="Login"/>
</form>
</body></html>
"#;

    fn base_url() -> Url {
        Url::parse("https://codeforces.com/enter?back=%2F").unwrap()
    }

    #[test]
    fn test_from_elem() -> anyhow::Result<()> {
        let html = Html::parse_document(LOGIN_HTML);
        let elem = html.find_first(select!("form#enterForm")).unwrap();
        let form = Form::from_elem(elem, &base_url())?;
        let req = form.request();

        assert_eq!(req.method(), FormMethod::Post);
        assert_eq!(req.url(), &base_url());
        assert_eq!(req.enctype(), Enctype::UrlEncoded);
        assert_eq!(
            req.fields(),
            &vec![
                ("csrf_token".to_owned(), "0123abcd".to_owned()),
                ("action".to_owned(), "enter".to_owned()),
                ("ftaa".to_owned(), "".to_owned()),
                ("handleOrEmail".to_owned(), "".to_owned()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_set_and_unset() -> anyhow::Result<()> {
        let html = Html::parse_document(LOGIN_HTML);
        let elem = html.find_first(select!("form#enterForm")).unwrap();
        let mut form = Form::from_elem(elem, &base_url())?;
        form.set("handleOrEmail", "tourist")
            .set("remember", "on")
            .unset("ftaa");

        assert_eq!(form.get("handleOrEmail"), Some("tourist"));
        assert_eq!(form.get("remember"), Some("on"));
        assert_eq!(form.get("ftaa"), None);
        let names = form
            .request()
            .fields()
            .iter()
            .map(|(key, _)| key.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["csrf_token", "action", "handleOrEmail", "remember"]
        );
        Ok(())
    }

    #[test]
    fn test_relative_action_and_defaults() -> anyhow::Result<()> {
        let html = Html::parse_document(
            r#"<form action="/search" enctype="multipart/form-data"><input name="q" value="x"/></form>"#,
        );
        let elem = html.find_first(select!("form")).unwrap();
        let req = Form::from_elem(elem, &base_url())?.request();
        assert_eq!(req.method(), FormMethod::Get);
        assert_eq!(req.url().as_str(), "https://codeforces.com/search");
        assert_eq!(req.enctype(), Enctype::Multipart);
        Ok(())
    }

    #[test]
    fn test_from_non_form() {
        let html = Html::parse_document(LOGIN_HTML);
        let elem = html.find_first(select!("body")).unwrap();
        assert!(Form::from_elem(elem, &base_url()).is_err());
    }
}
