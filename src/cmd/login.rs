use std::fmt;

use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{build_session, find_actor, Outcome};
use crate::model::Service;
use crate::service::LoginStatus;
use crate::{Config, Console, Registry, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct LoginOpt {
    /// Url of any problem on the service to log in to
    #[structopt(name = "url")]
    url: String,
}

impl LoginOpt {
    pub fn run(
        &self,
        conf: &Config,
        registry: &Registry,
        cnsl: &mut Console,
    ) -> Result<LoginOutcome> {
        let actor = find_actor(registry, &self.url)?;
        let service_id = actor.service_kind();
        let (user_env, pass_env) = service_id.to_user_pass_env_names();
        let mut session = build_session(conf)?;
        let status = actor.login(
            &mut |cnsl: &mut Console| {
                let user = cnsl.get_env_or_prompt_and_read(user_env, "username: ", false)?;
                let pass = cnsl.get_env_or_prompt_and_read(pass_env, "password: ", true)?;
                Ok((user, pass))
            },
            &mut session,
            cnsl,
        )?;

        Ok(LoginOutcome {
            service: Service::new(service_id),
            status,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoginOutcome {
    service: Service,
    status: LoginStatus,
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.status {
            LoginStatus::AlreadyLoggedIn => {
                write!(f, "Already logged in to {}", self.service.id())
            }
            LoginStatus::Success { username } => {
                write!(f, "Successfully logged in to {} as {}", self.service.id(), username)
            }
            LoginStatus::Failure => write!(
                f,
                "Could not log in to {}. Check your username and password, then try again.",
                self.service.id()
            ),
        }
    }
}

impl Outcome for LoginOutcome {
    fn is_error(&self) -> bool {
        !self.status.is_logged_in()
    }
}
