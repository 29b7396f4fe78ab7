/// Debug trace sink for a [`Parser`](crate::Parser).
///
/// A parser only calls `debugf` when debugging has been switched on via
/// [`Parser::set_debug`](crate::Parser::set_debug); implementations do not
/// need to filter anything themselves.
pub trait Log {
    fn debugf(&self, message: &str);
}

/// Writes every trace line to stderr.
pub struct StandardLog;

impl Log for StandardLog {
    fn debugf(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Collects trace lines in memory instead of printing them, for asserting on
/// parser trace output in tests.
#[derive(Default)]
pub struct VecLog {
    lines: std::cell::RefCell<Vec<String>>,
}

impl VecLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Log for VecLog {
    fn debugf(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}
