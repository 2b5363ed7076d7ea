use colored::*;
use std::{
    fs,
    io::{self, Write},
    mem,
    process::ExitCode,
};
use clap::Parser as ClapParser;
use tracing::debug;

use frontend::lexer::Lexer;
use frontend::parser::Parser;
use runtime::Interpreter;
use tools::errors::{CodeErr, ErrorReporter, ReportCodeErr};


// --------
//   CLI
// --------

#[derive(ClapParser)]
#[command(version)]
#[command(about = "Interpreter for the Simplf language")]
struct CLI {
    /// Path to the script to run
    script: Option<String>,

    /// Path to the script to run
    #[arg(short, long, conflicts_with = "script")]
    file: Option<String>,

    /// Interactive mode after interpreting a file
    #[arg(short, long)]
    inter: bool,

    /// Prints the AST tree
    #[arg(short, long)]
    ast_print: bool,

    /// Debug logs on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl CLI {
    fn script_path(&self) -> Option<&str> {
        self.script.as_deref().or(self.file.as_deref())
    }
}

// How a script run ended, mapped to the process exit code
#[derive(Debug, PartialEq)]
enum Outcome {
    Success,
    SyntaxError,
    RuntimeError,
    Unsupported,
    UnreadableFile,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::SyntaxError => ExitCode::from(65),
            Outcome::RuntimeError => ExitCode::from(70),
            Outcome::Unsupported => ExitCode::from(71),
            Outcome::UnreadableFile => ExitCode::from(74),
        }
    }
}

// Prints reported errors and remembers that one happened
#[derive(Default)]
struct StderrReporter {
    had_error: bool,
}

impl ErrorReporter for StderrReporter {
    fn report(&mut self, err: CodeErr) {
        self.had_error = true;
        eprintln!("{err}");
    }
}


fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if asked for
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => return,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true).with_level(true))
        .with(filter)
        .init();
}

fn interpret_file<W: Write>(file_path: &str, interpreter: &mut Interpreter<W>, cli: &CLI) -> Outcome {
    debug!(file = file_path, "reading source file");

    match fs::read_to_string(file_path) {
        Ok(code) => interpretation_sequence(code, interpreter, cli),
        Err(e) => {
            eprintln!("{} opening script file {}: {e}", "Error".red().bold(), file_path.green());
            Outcome::UnreadableFile
        }
    }
}

fn interpretation_sequence<W: Write>(code: String, interpreter: &mut Interpreter<W>, cli: &CLI) -> Outcome {
    let mut lexer: Lexer = Default::default();
    let mut parser: Parser = Default::default();

    if let Err(e) = lexer.tokenize(code) {
        eprintln!("{e}");
        return Outcome::SyntaxError;
    }

    if let Err(e) = parser.build_ast(mem::take(&mut lexer.tokens)) {
        eprintln!("{e}");
        return Outcome::SyntaxError;
    }

    if cli.ast_print {
        println!("\nAST:\n{:#?}", parser.ast_nodes);
    }

    let mut reporter = StderrReporter::default();

    match interpreter.interpret(&parser.ast_nodes, &mut reporter) {
        Err(e) => {
            eprintln!("{}", e.to_glob_err(e.line()));
            Outcome::Unsupported
        }
        Ok(_) if reporter.had_error => Outcome::RuntimeError,
        Ok(_) => Outcome::Success,
    }
}

fn show_prompt<O: Write>(out: &mut O) -> io::Result<()> {
    write!(out, "\n> ")?;
    out.flush()
}

// REPL
fn repl<W: Write>(interpreter: &mut Interpreter<W>, cli: &CLI) {
    println!("\n       --- {} language v0.1 ---", "Simplf".cyan().bold());
    println!("{} mode started, 'quit' to exit", "Interactive".yellow().bold());

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        input.clear();
        if let Err(e) = show_prompt(&mut io::stdout()) {
            eprintln!("{} writing to terminal: {e}", "Error".red().bold());
            break;
        }

        match stdin.read_line(&mut input) {
            // End of input
            Ok(0) => break,
            Ok(_) => {
                let trimmed_input = input.trim();

                if trimmed_input == "quit" {
                    break;
                }

                // Errors are already displayed, the session goes on
                let outcome = interpretation_sequence(trimmed_input.to_string(), interpreter, cli);
                debug!(?outcome, "line interpreted");
            }
            Err(e) => {
                eprintln!("{} reading from terminal: {e}", "Error".red().bold());
                break;
            }
        }
    }
}

fn main() -> ExitCode {
    // Manage command line args
    let cli = CLI::parse();
    init_tracing(cli.verbose);

    // One interpreter, so the REPL keeps what the file defined
    let mut interpreter = Interpreter::new();

    match cli.script_path() {
        Some(file_path) => {
            let outcome = interpret_file(file_path, &mut interpreter, &cli);

            if cli.inter {
                repl(&mut interpreter, &cli);
            }

            outcome.into()
        }
        None => {
            repl(&mut interpreter, &cli);
            ExitCode::SUCCESS
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> CLI {
        CLI::parse_from(["simplf"])
    }

    fn run(code: &str) -> (Outcome, String) {
        let mut interpreter = Interpreter::with_output(Vec::new());
        let outcome = interpretation_sequence(code.to_string(), &mut interpreter, &cli());

        (outcome, String::from_utf8(interpreter.into_output()).unwrap())
    }

    #[test]
    fn parse_arguments() {
        let cli = CLI::parse_from(["simplf", "script.sf", "-i", "-v"]);
        assert_eq!(cli.script_path(), Some("script.sf"));
        assert!(cli.inter);
        assert!(cli.verbose);
        assert!(!cli.ast_print);

        let cli = CLI::parse_from(["simplf", "--file", "other.sf", "-a"]);
        assert_eq!(cli.script_path(), Some("other.sf"));
        assert!(cli.ast_print);

        assert!(CLI::try_parse_from(["simplf", "a.sf", "--file", "b.sf"]).is_err());
    }

    #[test]
    fn outcomes() {
        assert_eq!(run("print 1 + 2;"), (Outcome::Success, String::from("3\n")));
        assert_eq!(run("print \"oops;").0, Outcome::SyntaxError);
        assert_eq!(run("print (1;").0, Outcome::SyntaxError);
        assert_eq!(run("print 1; print 1 / 0; print 2;"), (Outcome::RuntimeError, String::from("1\n")));
        assert_eq!(run("for (;;) {}").0, Outcome::Unsupported);
    }

    #[test]
    fn repl_lines_share_environment() {
        let mut interpreter = Interpreter::with_output(Vec::new());
        let cli = cli();

        assert_eq!(interpretation_sequence("var a = 2;".into(), &mut interpreter, &cli), Outcome::Success);
        assert_eq!(interpretation_sequence("print a * 3;".into(), &mut interpreter, &cli), Outcome::Success);
        assert_eq!(interpreter.output(), b"6\n");
    }

    struct ClosedTerminal;

    impl Write for ClosedTerminal {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))
        }
    }

    #[test]
    fn prompt_surfaces_flush_failure() {
        let mut out: Vec<u8> = vec![];
        assert!(show_prompt(&mut out).is_ok());
        assert_eq!(out, b"\n> ");

        assert!(show_prompt(&mut ClosedTerminal).is_err());
    }

    #[test]
    fn missing_file() {
        let mut interpreter = Interpreter::with_output(Vec::new());

        assert_eq!(
            interpret_file("does/not/exist.sf", &mut interpreter, &cli()),
            Outcome::UnreadableFile
        );
    }
}
