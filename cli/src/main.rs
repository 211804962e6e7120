use clap::{Parser, Subcommand};
use log::debug;
use std::io::{self, BufRead, Write};

use vcl::Error;

const PROMPT: &str = ">> ";

#[derive(Parser)]
#[command(name = "vclsh")]
#[command(about = "Parse VCL-style configuration and print it as JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the version
    Version,

    /// Read documents line by line from stdin and print each one as JSON
    Repl,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            println!("vclsh {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }

        Commands::Repl => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            repl(stdin.lock(), stdout.lock())
        }
    }
}

/// Each input line is a whole document. Syntax and decode errors are printed
/// and the loop goes on; only I/O failures end it.
fn repl<R: BufRead, W: Write>(input: R, mut output: W) -> Result<(), Error> {
    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            return Ok(());
        };
        let line = line?;
        debug!("repl input: {:?}", line);

        match vcl::to_json(&line) {
            Ok(json) => writeln!(output, "{}", json)?,
            Err(Error::Syntax(errors)) => {
                for err in errors {
                    writeln!(output, "\t{}", err)?;
                }
            }
            Err(err) => writeln!(output, "\t{}", err)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        let mut output = Vec::new();
        repl(input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn prints_json_per_line() {
        let output = run("acl hello { \"localhost\"; \"local\"; }\n");
        assert_eq!(
            output,
            ">> {\n  \"acl\": {\n    \"hello\": [\n      \"localhost\",\n      \"local\"\n    ]\n  }\n}\n>> \n"
        );
    }

    #[test]
    fn prints_syntax_errors_and_continues() {
        let output = run("acl local {\nx = 1;\n");
        assert!(output.contains("Parse error at line 1"), "output: {}", output);
        assert!(output.contains("\"x\": 1"), "output: {}", output);
    }

    #[test]
    fn empty_input() {
        assert_eq!(run(""), ">> \n");
    }
}
