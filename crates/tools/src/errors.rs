use std::fmt::Display;

#[derive(Debug, PartialEq, Clone)]
pub struct CodeErr(String);

impl Display for CodeErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Lines are stored 0-based and displayed 1-based
pub trait ReportCodeErr {
    fn to_glob_err(&self, line: u64) -> CodeErr
    where
        Self: std::fmt::Display,
    {
        CodeErr(format!("Line: {}\n{}", line + 1, self))
    }
}

/// Channel through which the interpreter surfaces the error that stopped a
/// program. The driver decides what to do with it (print, count, exit code).
pub trait ErrorReporter {
    fn report(&mut self, err: CodeErr);
}

// Collecting reporter, mostly used in tests and embedding
impl ErrorReporter for Vec<CodeErr> {
    fn report(&mut self, err: CodeErr) {
        self.push(err);
    }
}
