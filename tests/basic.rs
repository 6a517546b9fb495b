use std::fs;

use structopt::StructOpt;
use tempfile::tempdir;

use ojfetch::{Console, Opt};

macro_rules! assert_match {
    ($a:expr => $b:pat) => {
        assert!(match $a {
            $b => true,
            _ => false,
        });
    };
}

#[test]
fn run_with_no_args() {
    let args = ["ojfetch"];
    let res = Opt::from_iter_safe(&args);
    assert_match!(res => Err(_));
}

#[test]
fn run_with_unknown_output_format() {
    let args = ["ojfetch", "--output-format", "xml", "show"];
    let res = Opt::from_iter_safe(&args);
    assert_match!(res => Err(_));
}

#[test]
fn run_fetch_requires_url() {
    let args = ["ojfetch", "fetch"];
    let res = Opt::from_iter_safe(&args);
    assert_match!(res => Err(_));
}

#[test]
fn run_show_as_json() -> anyhow::Result<()> {
    let test_dir = tempdir()?;
    let conf_path = test_dir.path().join("config.yaml");
    fs::write(&conf_path, "session:\n  max_redirects: 3\n")?;

    let conf_arg = conf_path.to_str().unwrap();
    let args = [
        "ojfetch",
        "--config",
        conf_arg,
        "--output-format",
        "json",
        "show",
    ];
    let opt = Opt::from_iter_safe(&args)?;
    let mut stdout = Vec::new();
    let is_error = opt.run(&mut stdout, &mut Console::sink())?;
    assert!(!is_error);

    let outcome: serde_json::Value = serde_json::from_slice(&stdout)?;
    assert_eq!(outcome["session"]["max_redirects"], 3);
    Ok(())
}

#[test]
fn run_fetch_unknown_url() -> anyhow::Result<()> {
    let test_dir = tempdir()?;
    let conf_path = test_dir.path().join("config.yaml");
    fs::write(&conf_path, "{}\n")?;

    let args = [
        "ojfetch",
        "--config",
        conf_path.to_str().unwrap(),
        "fetch",
        "https://example.com/problems/1",
    ];
    let opt = Opt::from_iter_safe(&args)?;
    let res = opt.run(&mut Vec::new(), &mut Console::sink());
    assert_match!(res => Err(_));
    Ok(())
}
