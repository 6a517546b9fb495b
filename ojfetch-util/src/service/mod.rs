mod act;
mod cookie;
mod form;
mod scrape;
mod session;

pub use act::{Act, GetCredentials, LoginStatus};
pub use cookie::CookieStorage;
pub use form::{Enctype, Form, FormMethod, FormRequest};
pub use scrape::{ElementRefExt, Scrape, ScrapeError};
pub use session::{HttpSession, Page, ResponseExt, Session};
