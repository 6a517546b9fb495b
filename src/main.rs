#![warn(clippy::all)]

use std::io::{self, Write as _};
use std::process;

use structopt::StructOpt;

use ojfetch::{Console, Opt, Result};

fn main() -> Result<()> {
    let opt = Opt::from_args();
    let mut cnsl = if opt.is_quiet() {
        Console::sink()
    } else {
        Console::term()
    }
    .verbose(opt.is_verbose());
    let is_error = opt.run(&mut io::stdout(), &mut cnsl).map_err(|err| {
        io::stdout().flush().unwrap_or(());
        eprintln!();
        err
    })?;
    if is_error {
        process::exit(1);
    }
    Ok(())
}
