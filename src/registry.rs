use ojfetch_codeforces::CodeforcesActor;

use crate::model::ServiceKind;
use crate::service::Act;

/// Builds an actor for a url, or returns `None` if the url belongs to another service.
pub type FromUrl = fn(&str) -> Option<Box<dyn Act>>;

/// Known services, asked in registration order which one a url belongs to.
#[derive(Default)]
pub struct Registry {
    entries: Vec<(ServiceKind, FromUrl)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ServiceKind::Codeforces, CodeforcesActor::boxed_from_url);
        registry
    }

    pub fn register(&mut self, kind: ServiceKind, from_url: FromUrl) -> &mut Self {
        self.entries.push((kind, from_url));
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = ServiceKind> + '_ {
        self.entries.iter().map(|&(kind, _)| kind)
    }

    pub fn find(&self, url: &str) -> Option<Box<dyn Act>> {
        self.entries.iter().find_map(|(_, from_url)| from_url(url))
    }
}
