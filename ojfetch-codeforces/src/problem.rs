use std::fmt;

use anyhow::anyhow;
use getset::CopyGetters;
use ojfetch_util::regex;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::Result;

// Gym problems seem to be numbered separately from contest and problemset
// ones. This threshold is a heuristic and has not been checked against
// recent gym ids.
const GYM_CONTEST_ID_MIN: u64 = 100_000;

#[derive(
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProblemKind {
    Contest,
    Problemset,
    Gym,
}

impl ProblemKind {
    const ALL: [Self; 3] = [Self::Contest, Self::Problemset, Self::Gym];

    pub fn guess(contest_id: u64) -> Self {
        if contest_id < GYM_CONTEST_ID_MIN {
            Self::Contest
        } else {
            Self::Gym
        }
    }

    // Keep url_pattern and url_string in sync.

    fn url_pattern(self) -> &'static Lazy<Regex> {
        match self {
            // e.g. http://codeforces.com/contest/538/problem/H
            Self::Contest => {
                regex!(r"^http://codeforces\.com/contest/([0-9]+)/problem/([0A-Za-z])/?$")
            }
            // e.g. http://codeforces.com/problemset/problem/700/B
            Self::Problemset => {
                regex!(r"^http://codeforces\.com/problemset/problem/([0-9]+)/([0A-Za-z])/?$")
            }
            // e.g. http://codeforces.com/gym/101021/problem/A
            Self::Gym => regex!(r"^http://codeforces\.com/gym/([0-9]+)/problem/([0A-Za-z])/?$"),
        }
    }

    fn url_string(self, contest_id: u64, index: char) -> String {
        match self {
            Self::Contest => format!(
                "http://codeforces.com/contest/{}/problem/{}",
                contest_id, index
            ),
            Self::Problemset => format!(
                "http://codeforces.com/problemset/problem/{}/{}",
                contest_id, index
            ),
            Self::Gym => format!("http://codeforces.com/gym/{}/problem/{}", contest_id, index),
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.into())
    }
}

#[derive(Serialize, Deserialize, CopyGetters, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CodeforcesProblem {
    #[get_copy = "pub"]
    contest_id: u64,
    #[get_copy = "pub"]
    index: char,
    #[get_copy = "pub"]
    kind: ProblemKind,
}

impl CodeforcesProblem {
    pub fn new(contest_id: u64, index: char, kind: Option<ProblemKind>) -> Result<Self> {
        if !index.is_ascii_uppercase() {
            return Err(anyhow!("Found invalid problem index : {:?}", index));
        }
        Ok(Self {
            contest_id,
            index,
            kind: kind.unwrap_or_else(|| ProblemKind::guess(contest_id)),
        })
    }

    pub fn from_url(s: &str) -> Option<Self> {
        ProblemKind::ALL.iter().find_map(|&kind| {
            let caps = kind.url_pattern().captures(s)?;
            let contest_id = caps[1].parse().ok()?;
            let index = normalize_index(caps[2].chars().next()?);
            Self::new(contest_id, index, Some(kind)).ok()
        })
    }

    pub fn url(&self) -> Url {
        let url = self.kind.url_string(self.contest_id, self.index);
        // digits and an ascii letter in a fixed template always form a valid url
        Url::parse(&url).unwrap()
    }
}

impl fmt::Display for CodeforcesProblem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}{}", self.kind, self.contest_id, self.index)
    }
}

fn normalize_index(c: char) -> char {
    if c == '0' {
        'A'
    } else {
        c.to_ascii_uppercase()
    }
}
