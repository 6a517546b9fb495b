use anyhow::{anyhow, Context as _};
use reqwest::{StatusCode, Url};

use crate::model::{Sample, ServiceKind};
use crate::page::{LoginPage, ProblemPage, LOGIN_URL};
use crate::problem::CodeforcesProblem;
use crate::service::{Act, GetCredentials, LoginStatus, Page, Session};
use crate::{Console, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeforcesActor {
    problem: CodeforcesProblem,
}

impl CodeforcesActor {
    pub fn new(problem: CodeforcesProblem) -> Self {
        Self { problem }
    }

    pub fn from_url(s: &str) -> Option<Self> {
        CodeforcesProblem::from_url(s).map(Self::new)
    }

    /// Entry point for a registry of actors.
    pub fn boxed_from_url(s: &str) -> Option<Box<dyn Act>> {
        Self::from_url(s).map(|actor| Box::new(actor) as Box<dyn Act>)
    }

    fn check_status(page: &Page) -> Result<()> {
        if page.status().is_success() {
            Ok(())
        } else {
            Err(anyhow!(
                "Received invalid response from {} : {}",
                page.url(),
                page.status()
            ))
        }
    }

    fn describe_status(status: StatusCode) -> String {
        let kind = if status.is_success() {
            "success"
        } else if status.is_redirection() {
            "redirection"
        } else if status.is_client_error() {
            "client error"
        } else if status.is_server_error() {
            "server error"
        } else {
            "informational"
        };
        format!("{} ({})", status, kind)
    }
}

impl Act for CodeforcesActor {
    fn service_kind(&self) -> ServiceKind {
        ServiceKind::Codeforces
    }

    fn url(&self) -> Url {
        self.problem.url()
    }

    fn download(&self, session: &mut dyn Session, cnsl: &mut Console) -> Result<Vec<Sample>> {
        let url = self.problem.url();
        let page = session.get(&url, cnsl)?;
        cnsl.status(&Self::describe_status(page.status()))?;
        if !page.status().is_success() {
            cnsl.warn(&format!("Received {} from {}", page.status(), url))?;
        }
        ProblemPage::new(page.html())
            .extract_samples(cnsl)
            .with_context(|| format!("Could not extract samples from {}", url))
    }

    fn login(
        &self,
        get_credentials: &mut GetCredentials,
        session: &mut dyn Session,
        cnsl: &mut Console,
    ) -> Result<LoginStatus> {
        let url: &Url = &LOGIN_URL;
        let page = session.get(url, cnsl)?;
        cnsl.status(&Self::describe_status(page.status()))?;
        Self::check_status(&page)?;
        if page.is_redirected_from(url) {
            cnsl.info("You have already signed in.")?;
            return Ok(LoginStatus::AlreadyLoggedIn);
        }

        let mut form = LoginPage::new(&page)
            .extract_form()
            .context("Could not find login form")?;
        cnsl.debug(&format!("form: {:?}", form))?;

        let (username, password) = get_credentials(cnsl)?;
        form.set("handle", username.as_str())
            .set("password", password)
            .set("remember", "on");
        let page = session.submit(&form.request(), cnsl)?;
        Self::check_status(&page)?;

        if page.is_redirected_from(url) {
            cnsl.success(&format!("Welcome, {}.", username))?;
            Ok(LoginStatus::Success { username })
        } else {
            cnsl.failure("Invalid handle or password.")?;
            Ok(LoginStatus::Failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::service::FormRequest;

    static LOGIN_HTML: &str = r#"<html><body>
<form method="post" action="" id="enterForm">
<input type="hidden" name="csrf_token" value="c0ffee"/>
<input type="hidden" name="action" value="enter"/>
<input type="text" name="handle" value=""/>
<input type="password" name="password"/>
<input type="checkbox" name="remember" value="on"/>
</form>
</body></html>"#;

    static PROBLEM_HTML: &str = r#"<html><body><div class="sample-test">
<div class="input"><div class="title">Input</div><pre>5<br />1 2 3 4 5<br /></pre></div>
<div class="output"><div class="title">Output</div><pre>15<br /></pre></div>
<div class="input"><div class="title">Input</div><pre>1<br />7<br /></pre></div>
<div class="output"><div class="title">Output</div><pre>7<br /></pre></div>
</div></body></html>"#;

    #[derive(Debug, Default)]
    struct FakeSession {
        responses: VecDeque<Page>,
        gets: Vec<Url>,
        submits: Vec<FormRequest>,
    }

    impl FakeSession {
        fn with(responses: Vec<Page>) -> Self {
            Self {
                responses: responses.into(),
                ..Self::default()
            }
        }

        fn next_response(&mut self) -> Result<Page> {
            self.responses
                .pop_front()
                .ok_or_else(|| anyhow!("Could not send request"))
        }
    }

    impl Session for FakeSession {
        fn get(&mut self, url: &Url, _cnsl: &mut Console) -> Result<Page> {
            self.gets.push(url.clone());
            self.next_response()
        }

        fn submit(&mut self, request: &FormRequest, _cnsl: &mut Console) -> Result<Page> {
            self.submits.push(request.clone());
            self.next_response()
        }
    }

    fn page(url: &str, body: &str) -> Page {
        Page::new(StatusCode::OK, Url::parse(url).unwrap(), body)
    }

    fn actor() -> CodeforcesActor {
        CodeforcesActor::from_url("http://codeforces.com/contest/538/problem/H").unwrap()
    }

    #[test]
    fn test_download() -> anyhow::Result<()> {
        let mut session = FakeSession::with(vec![page(
            "http://codeforces.com/contest/538/problem/H",
            PROBLEM_HTML,
        )]);
        let samples = actor().download(&mut session, &mut Console::sink())?;
        assert_eq!(
            samples,
            vec![
                Sample::new("1", "5\n1 2 3 4 5\n", "15\n"),
                Sample::new("2", "1\n7\n", "7\n"),
            ]
        );
        assert_eq!(
            session.gets,
            vec![Url::parse("http://codeforces.com/contest/538/problem/H")?]
        );
        Ok(())
    }

    #[test]
    fn test_download_non_success_is_not_fatal() -> anyhow::Result<()> {
        let mut session = FakeSession::with(vec![Page::new(
            StatusCode::NOT_FOUND,
            Url::parse("http://codeforces.com/contest/538/problem/H")?,
            PROBLEM_HTML,
        )]);
        let mut cnsl = Console::buf();
        let samples = actor().download(&mut session, &mut cnsl)?;
        assert_eq!(samples.len(), 2);
        let output = String::from_utf8(cnsl.take_buf().unwrap())?;
        assert!(output.contains("[x] 404 Not Found (client error)"));
        assert!(output.contains("WARN: Received 404 Not Found"));
        Ok(())
    }

    #[test]
    fn test_download_transport_error() {
        let mut session = FakeSession::default();
        assert!(actor().download(&mut session, &mut Console::sink()).is_err());
    }

    #[test]
    fn test_download_parse_error() {
        let mut session = FakeSession::with(vec![page(
            "http://codeforces.com/contest/538/problem/H",
            r#"<html><body><div class="input"><pre>1</pre></div></body></html>"#,
        )]);
        let err = actor()
            .download(&mut session, &mut Console::sink())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not extract samples from http://codeforces.com/contest/538/problem/H"
        );
    }

    #[test]
    fn test_login_already() -> anyhow::Result<()> {
        let mut session = FakeSession::with(vec![page("http://codeforces.com/", "")]);
        let mut called = false;
        let status = actor().login(
            &mut |_: &mut Console| {
                called = true;
                Ok(("tourist".to_owned(), "pass".to_owned()))
            },
            &mut session,
            &mut Console::sink(),
        )?;
        assert_eq!(status, LoginStatus::AlreadyLoggedIn);
        assert!(!called);
        assert!(session.submits.is_empty());
        Ok(())
    }

    #[test]
    fn test_login_already_on_other_scheme_or_query() -> anyhow::Result<()> {
        for resolved in &[
            "https://codeforces.com/enter",
            "http://codeforces.com/enter?back=%2F",
        ] {
            let mut session = FakeSession::with(vec![page(resolved, LOGIN_HTML)]);
            let mut called = false;
            let status = actor().login(
                &mut |_: &mut Console| {
                    called = true;
                    Ok(("tourist".to_owned(), "pass".to_owned()))
                },
                &mut session,
                &mut Console::sink(),
            )?;
            assert_eq!(status, LoginStatus::AlreadyLoggedIn, "{}", resolved);
            assert!(!called, "{}", resolved);
            assert!(session.submits.is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_login_logs_status() -> anyhow::Result<()> {
        let mut session = FakeSession::with(vec![page("http://codeforces.com/", "")]);
        let mut cnsl = Console::buf();
        actor().login(
            &mut |_: &mut Console| Ok(("tourist".to_owned(), "pass".to_owned())),
            &mut session,
            &mut cnsl,
        )?;
        let output = String::from_utf8(cnsl.take_buf().unwrap())?;
        assert!(output.contains("[x] 200 OK (success)"));
        Ok(())
    }

    #[test]
    fn test_describe_status() {
        assert_eq!(
            CodeforcesActor::describe_status(StatusCode::FOUND),
            "302 Found (redirection)"
        );
        assert_eq!(
            CodeforcesActor::describe_status(StatusCode::SERVICE_UNAVAILABLE),
            "503 Service Unavailable (server error)"
        );
    }

    #[test]
    fn test_login_success() -> anyhow::Result<()> {
        let mut session = FakeSession::with(vec![
            page("http://codeforces.com/enter", LOGIN_HTML),
            page("http://codeforces.com/", ""),
        ]);
        let mut calls = 0;
        let status = actor().login(
            &mut |_: &mut Console| {
                calls += 1;
                Ok(("tourist".to_owned(), "pass".to_owned()))
            },
            &mut session,
            &mut Console::sink(),
        )?;
        assert_eq!(
            status,
            LoginStatus::Success {
                username: "tourist".to_owned()
            }
        );
        assert_eq!(calls, 1);

        let req = &session.submits[0];
        assert_eq!(req.url().as_str(), "http://codeforces.com/enter");
        assert_eq!(
            req.fields(),
            &vec![
                ("csrf_token".to_owned(), "c0ffee".to_owned()),
                ("action".to_owned(), "enter".to_owned()),
                ("handle".to_owned(), "tourist".to_owned()),
                ("password".to_owned(), "pass".to_owned()),
                ("remember".to_owned(), "on".to_owned()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_login_failure() -> anyhow::Result<()> {
        let mut session = FakeSession::with(vec![
            page("http://codeforces.com/enter", LOGIN_HTML),
            page("http://codeforces.com/enter", LOGIN_HTML),
        ]);
        let mut cnsl = Console::buf();
        let status = actor().login(
            &mut |_: &mut Console| Ok(("tourist".to_owned(), "wrong".to_owned())),
            &mut session,
            &mut cnsl,
        )?;
        assert_eq!(status, LoginStatus::Failure);
        let output = String::from_utf8(cnsl.take_buf().unwrap())?;
        assert!(output.contains("Invalid handle or password."));
        Ok(())
    }

    #[test]
    fn test_login_without_form() {
        let mut session = FakeSession::with(vec![page(
            "http://codeforces.com/enter",
            "<html><body></body></html>",
        )]);
        let err = actor()
            .login(
                &mut |_: &mut Console| Ok(("tourist".to_owned(), "pass".to_owned())),
                &mut session,
                &mut Console::sink(),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Could not find login form");
    }

    #[test]
    fn test_login_server_error() {
        let mut session = FakeSession::with(vec![Page::new(
            StatusCode::SERVICE_UNAVAILABLE,
            Url::parse("http://codeforces.com/enter").unwrap(),
            "",
        )]);
        let result = actor().login(
            &mut |_: &mut Console| Ok(("tourist".to_owned(), "pass".to_owned())),
            &mut session,
            &mut Console::sink(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_boxed_from_url() {
        let actor = CodeforcesActor::boxed_from_url("http://codeforces.com/gym/101021/problem/A")
            .unwrap();
        assert_eq!(actor.service_kind(), ServiceKind::Codeforces);
        assert_eq!(
            actor.url().as_str(),
            "http://codeforces.com/gym/101021/problem/A"
        );
        assert!(CodeforcesActor::boxed_from_url("http://atcoder.jp/").is_none());
    }
}
