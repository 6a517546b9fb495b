use std::fmt;

use reqwest::Url;
use serde::Serialize;

use crate::model::{Sample, ServiceKind};
use crate::service::Session;
use crate::{Console, Result};

/// Asked at most once per login, and only when the session is not signed in.
pub type GetCredentials<'a> = dyn FnMut(&mut Console) -> Result<(String, String)> + 'a;

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case", tag = "status")]
pub enum LoginStatus {
    AlreadyLoggedIn,
    Success { username: String },
    Failure,
}

impl LoginStatus {
    pub fn is_logged_in(&self) -> bool {
        !matches!(self, Self::Failure)
    }
}

impl fmt::Display for LoginStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::AlreadyLoggedIn => write!(f, "Already logged in"),
            Self::Success { username } => write!(f, "Logged in as {}", username),
            Self::Failure => write!(f, "Could not log in"),
        }
    }
}

/// A problem on some judge, able to fetch its samples and sign in to its site.
pub trait Act: fmt::Debug {
    fn service_kind(&self) -> ServiceKind;

    fn url(&self) -> Url;

    fn download(&self, session: &mut dyn Session, cnsl: &mut Console) -> Result<Vec<Sample>>;

    fn login(
        &self,
        get_credentials: &mut GetCredentials,
        session: &mut dyn Session,
        cnsl: &mut Console,
    ) -> Result<LoginStatus>;
}
