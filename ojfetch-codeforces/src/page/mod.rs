use lazy_static::lazy_static;
use reqwest::Url;

mod login;
mod problem;

pub use login::LoginPage;
pub use problem::ProblemPage;

lazy_static! {
    pub static ref BASE_URL: Url = Url::parse("http://codeforces.com").unwrap();
    pub static ref LOGIN_URL: Url = BASE_URL.join("/enter").unwrap();
}
