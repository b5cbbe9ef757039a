//! Printable, secret-free view of [`Settings`](crate::Settings).
//!
//! A [`SettingsSummary`] is a list of named [`SummarySection`]s; each renders as one line,
//! `[name] k1=v1 k2=v2`, e.g. on stderr when the CLI runs with `--verbose`.

use std::fmt;
use std::io::Write;

/// One block of settings (server, store, identity, model).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummarySection {
    name: &'static str,
    entries: Vec<(&'static str, String)>,
}

impl SummarySection {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Appends one entry and returns `self` for chaining. Values must not be secrets.
    pub fn entry(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.entries.push((key, value.into()));
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn entries(&self) -> &[(&'static str, String)] {
        &self.entries
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for SummarySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.name)?;
        for (k, v) in &self.entries {
            write!(f, " {}={}", k, v)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsSummary {
    sections: Vec<SummarySection>,
}

impl SettingsSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, section: SummarySection) -> Self {
        self.sections.push(section);
        self
    }

    pub fn sections(&self) -> &[SummarySection] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&SummarySection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// One rendered line per section, in order.
    pub fn lines(&self) -> Vec<String> {
        self.sections.iter().map(ToString::to_string).collect()
    }

    /// Writes every section to stderr. Best-effort: write errors are ignored.
    pub fn print_to_stderr(&self) {
        let mut err = std::io::stderr().lock();
        for line in self.lines() {
            let _ = writeln!(err, "{}", line);
        }
        let _ = err.flush();
    }
}

impl fmt::Display for SettingsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", section)?;
        }
        Ok(())
    }
}
