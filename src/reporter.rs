use crate::wait_spec::WaitSpec;
use std::io::{self, Stderr, Stdout, Write};

/// Human-facing output. Only the one-shot answer goes to `out`; everything else goes to `err`.
///
/// Write failures are ignored: a closed pipe must not change the exit status.
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
    quiet: bool,
    markers_pending: bool,
}

impl Reporter<Stdout, Stderr> {
    pub fn stdio(quiet: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), quiet)
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E, quiet: bool) -> Self {
        Self {
            out,
            err,
            quiet,
            markers_pending: false,
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    pub fn answer(&mut self, ready: bool) {
        if self.quiet {
            return;
        }
        let _ = writeln!(
            self.out,
            "{}",
            match ready {
                true => "yes",
                false => "no",
            }
        );
        let _ = self.out.flush();
    }

    pub fn waiting(&mut self, target: &str, spec: &WaitSpec) {
        self.line(format_args!(
            "waiting up to {}s for {}",
            spec.timeout().as_secs(),
            target
        ));
    }

    /// One marker per failed attempt, no newline.
    pub fn attempt_failed(&mut self) {
        if self.quiet {
            return;
        }
        let _ = write!(self.err, ".");
        let _ = self.err.flush();
        self.markers_pending = true;
    }

    pub fn ready(&mut self, target: &str) {
        self.line(format_args!("{} is ready", target));
    }

    pub fn gave_up(&mut self, spec: &WaitSpec) {
        self.line(format_args!(
            "giving up after {}s",
            spec.timeout().as_secs()
        ));
    }

    fn line(&mut self, message: std::fmt::Arguments<'_>) {
        if self.quiet {
            return;
        }
        if self.markers_pending {
            let _ = writeln!(self.err);
            self.markers_pending = false;
        }
        let _ = writeln!(self.err, "{}", message);
        let _ = self.err.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured(reporter: Reporter<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (out, err) = reporter.into_inner();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_answer() {
        let mut reporter = Reporter::new(Vec::new(), Vec::new(), false);
        reporter.answer(true);
        reporter.answer(false);
        assert_eq!(captured(reporter), ("yes\nno\n".to_owned(), String::new()));
    }

    #[test]
    fn test_progress() {
        let spec = WaitSpec::new(3, 1).unwrap();
        let mut reporter = Reporter::new(Vec::new(), Vec::new(), false);
        reporter.waiting("db", &spec);
        reporter.attempt_failed();
        reporter.attempt_failed();
        reporter.gave_up(&spec);
        assert_eq!(
            captured(reporter),
            (
                String::new(),
                "waiting up to 3s for db\n..\ngiving up after 3s\n".to_owned()
            )
        );
    }

    #[test]
    fn test_ready_without_markers() {
        let spec = WaitSpec::new(3, 1).unwrap();
        let mut reporter = Reporter::new(Vec::new(), Vec::new(), false);
        reporter.waiting("db", &spec);
        reporter.ready("db");
        assert_eq!(
            captured(reporter).1,
            "waiting up to 3s for db\ndb is ready\n"
        );
    }

    #[test]
    fn test_quiet() {
        let spec = WaitSpec::new(3, 1).unwrap();
        let mut reporter = Reporter::new(Vec::new(), Vec::new(), true);
        reporter.answer(true);
        reporter.waiting("db", &spec);
        reporter.attempt_failed();
        reporter.ready("db");
        reporter.gave_up(&spec);
        assert_eq!(captured(reporter), (String::new(), String::new()));
    }
}
