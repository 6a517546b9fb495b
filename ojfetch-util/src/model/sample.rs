use getset::Getters;
use serde::{Deserialize, Serialize};

use crate::regex;
use crate::service::ScrapeError;
use crate::Console;

#[derive(Serialize, Deserialize, Getters, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sample {
    #[get = "pub"]
    name: String,
    #[get = "pub"]
    input: String,
    #[get = "pub"]
    output: String,
}

impl Sample {
    pub fn new(
        name: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            output: output.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum TitleKind {
    Input,
    Output,
    Unknown,
}

impl TitleKind {
    /// A title naming both sides, such as "Output for Input 1", reads as `expected`.
    fn of(title: &str, expected: Self) -> Self {
        let is_input = regex!(r"(?i)input").is_match(title);
        let is_output = regex!(r"(?i)output").is_match(title);
        match (is_input, is_output) {
            (true, false) => Self::Input,
            (false, true) => Self::Output,
            (true, true) => expected,
            (false, false) => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Dangling {
    text: String,
    title: String,
}

/// Pairs sample blocks in the order they appear on a page.
///
/// Blocks alternate input, output, input, output... A block whose title
/// names the wrong side is rejected as soon as it is added, and an input
/// left without an output is rejected by [`SampleZipper::finish`].
#[derive(Debug, Clone, Default)]
pub struct SampleZipper {
    samples: Vec<Sample>,
    dangling: Option<Dangling>,
}

impl SampleZipper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        text: impl Into<String>,
        title: impl Into<String>,
        cnsl: &mut Console,
    ) -> Result<(), ScrapeError> {
        let (text, title) = (text.into(), title.into());
        match self.dangling.take() {
            None => {
                let kind = TitleKind::of(&title, TitleKind::Input);
                if kind == TitleKind::Output {
                    return Err(ScrapeError::MismatchedSample {
                        expected: "input",
                        title,
                    });
                }
                if kind == TitleKind::Unknown {
                    cnsl.warn(&format!("strange name for input string: {}", title))
                        .unwrap_or(());
                }
                self.dangling = Some(Dangling { text, title });
            }
            Some(input) => {
                let kind = TitleKind::of(&title, TitleKind::Output);
                if kind == TitleKind::Input {
                    return Err(ScrapeError::MismatchedSample {
                        expected: "output",
                        title,
                    });
                }
                if kind == TitleKind::Unknown {
                    cnsl.warn(&format!("strange name for output string: {}", title))
                        .unwrap_or(());
                }
                let name = (self.samples.len() + 1).to_string();
                self.samples.push(Sample::new(name, input.text, text));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn finish(self) -> Result<Vec<Sample>, ScrapeError> {
        match self.dangling {
            Some(Dangling { title, .. }) => Err(ScrapeError::DanglingSample { title }),
            None => Ok(self.samples),
        }
    }
}
