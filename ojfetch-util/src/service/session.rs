use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use getset::{CopyGetters, Getters};
use reqwest::blocking::{multipart, Client, Request, RequestBuilder, Response};
use reqwest::header::LOCATION;
use reqwest::{StatusCode, Url};
use scraper::Html;

use crate::service::form::{Enctype, FormMethod, FormRequest};
use crate::service::CookieStorage;
use crate::{Console, Error, Result};

/// Response of a request after every redirect has been followed.
#[derive(Getters, CopyGetters, Debug, Clone, PartialEq, Eq)]
pub struct Page {
    #[get_copy = "pub"]
    status: StatusCode,
    #[get = "pub"]
    url: Url,
    #[get = "pub"]
    body: String,
}

impl Page {
    pub fn new(status: StatusCode, url: Url, body: impl Into<String>) -> Self {
        Self {
            status,
            url,
            body: body.into(),
        }
    }

    pub fn html(&self) -> Html {
        Html::parse_document(&self.body)
    }

    /// Whether the server sent us somewhere other than `requested`.
    ///
    /// Any difference in the resolved url counts, scheme and query included.
    pub fn is_redirected_from(&self, requested: &Url) -> bool {
        self.url != *requested
    }
}

/// Cookie-carrying HTTP access shared by every operation of a service.
pub trait Session {
    fn get(&mut self, url: &Url, cnsl: &mut Console) -> Result<Page>;

    fn submit(&mut self, request: &FormRequest, cnsl: &mut Console) -> Result<Page>;
}

pub trait ResponseExt {
    fn location_url(&self, base: &Url) -> Result<Url>;
}

impl ResponseExt for Response {
    fn location_url(&self, base: &Url) -> Result<Url> {
        let loc_str = self
            .headers()
            .get(LOCATION)
            .context("Could not find location header in response")?
            .to_str()?;
        base.join(loc_str)
            .context("Could not parse redirection url")
    }
}

/// [`Session`] backed by a blocking reqwest client and a cookie file.
///
/// The client must be built with redirects disabled: redirects are followed
/// here so that cookies set on intermediate responses are kept.
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client,
    cookies_path: PathBuf,
    max_redirects: usize,
}

impl HttpSession {
    pub fn new(client: Client, cookies_path: impl Into<PathBuf>, max_redirects: usize) -> Self {
        Self {
            client,
            cookies_path: cookies_path.into(),
            max_redirects,
        }
    }

    fn exec_session(&self, mut request: Request) -> Result<Response> {
        let mut storage =
            CookieStorage::open(&self.cookies_path).context("Could not open cookie storage")?;
        storage
            .load_into(&mut request)
            .context("Could not load cookies into request")?;
        let response = self.client.execute(request)?;
        storage
            .store_from(&response)
            .context("Could not store cookies from response")?;
        Ok(response)
    }

    fn send_pretty(&self, request: Request, cnsl: &mut Console) -> Result<Response> {
        write!(
            cnsl,
            "{:7} {} ... ",
            request.method().as_str(),
            request.url()
        )
        .unwrap_or(());
        let result = self
            .exec_session(request)
            .context("Could not send request");
        match &result {
            Ok(res) => writeln!(cnsl, "{}", res.status()),
            Err(_) => writeln!(cnsl, "failed"),
        }
        .unwrap_or(());
        result
    }

    fn send_following(&self, builder: RequestBuilder, cnsl: &mut Console) -> Result<Page> {
        let mut request = builder.build()?;
        for _ in 0..=self.max_redirects {
            let retained = request.try_clone();
            let url = request.url().clone();
            let res = self.send_pretty(request, cnsl)?;
            let status = res.status();
            if !status.is_redirection() || res.headers().get(LOCATION).is_none() {
                let url = res.url().clone();
                let body = res.text().context("Could not read response body")?;
                return Ok(Page::new(status, url, body));
            }
            let next = res.location_url(&url)?;
            request = match (status, retained) {
                (StatusCode::TEMPORARY_REDIRECT, Some(mut retained))
                | (StatusCode::PERMANENT_REDIRECT, Some(mut retained)) => {
                    *retained.url_mut() = next;
                    retained
                }
                _ => self.client.get(next).build()?,
            };
        }
        Err(Error::msg(format!(
            "Exceeded redirect limit ({})",
            self.max_redirects
        )))
    }
}

impl Session for HttpSession {
    fn get(&mut self, url: &Url, cnsl: &mut Console) -> Result<Page> {
        self.send_following(self.client.get(url.clone()), cnsl)
    }

    fn submit(&mut self, request: &FormRequest, cnsl: &mut Console) -> Result<Page> {
        let url = request.url().clone();
        let builder = match (request.method(), request.enctype()) {
            (FormMethod::Get, _) => self.client.get(url).query(request.fields()),
            (FormMethod::Post, Enctype::UrlEncoded) => {
                self.client.post(url).form(request.fields())
            }
            (FormMethod::Post, Enctype::Multipart) => {
                let form = request
                    .fields()
                    .iter()
                    .fold(multipart::Form::new(), |form, (name, value)| {
                        form.text(name.clone(), value.clone())
                    });
                self.client.post(url).multipart(form)
            }
        };
        self.send_following(builder, cnsl)
    }
}
