//! Record types and per-line decoding.
//!
//! Every line of a data file starts with a one-character tag that selects the
//! record kind. The rest of the line, trimmed, is the payload:
//!
//! | Tag | Record | Payload |
//! |-----|--------|---------|
//! | `;` | [`Record::Comment`] | free text |
//! | `P` | [`Record::Package`] | dotted package name |
//! | `S` | [`Record::Source`] | simple class name |
//! | `D` | [`Record::Dependency`] | `srcPkg.srcCls>tgtPkg.tgtCls` |
//! | `C` | [`Record::Cycle`] | `p1}p2}...}` |

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Separates the source and target of a dependency payload.
pub const DEPENDENCY_ARROW: char = '>';

/// Terminates each package index of a cycle payload.
pub const CYCLE_ARROW: char = '}';

/// Separates package index and class index in a class reference.
pub const CLASS_SEPARATOR: char = '.';

/// The closed set of line tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordTag {
    /// `;` metadata comment
    Comment,
    /// `P` package declaration
    Package,
    /// `S` class (source) declaration
    Source,
    /// `D` dependency edge
    Dependency,
    /// `C` package cycle
    Cycle,
}

impl RecordTag {
    /// Map a leading character to its tag, if it is one.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ';' => Some(Self::Comment),
            'P' => Some(Self::Package),
            'S' => Some(Self::Source),
            'D' => Some(Self::Dependency),
            'C' => Some(Self::Cycle),
            _ => None,
        }
    }

    /// The character written at the start of lines with this tag.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Comment => ';',
            Self::Package => 'P',
            Self::Source => 'S',
            Self::Dependency => 'D',
            Self::Cycle => 'C',
        }
    }
}

/// A coded reference to a class: package index and class index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassRef {
    /// Package index, in package declaration order.
    pub package: u32,
    /// Class index, in declaration order within the package.
    pub class: u32,
}

impl ClassRef {
    /// Create a class reference.
    #[must_use]
    pub fn new(package: u32, class: u32) -> Self {
        Self { package, class }
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.package, CLASS_SEPARATOR, self.class)
    }
}

impl FromStr for ClassRef {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (package, class) = s
            .trim()
            .split_once(CLASS_SEPARATOR)
            .ok_or_else(|| format!("class reference '{s}' is missing '{CLASS_SEPARATOR}'"))?;
        let package = parse_index(package)
            .ok_or_else(|| format!("invalid package index in class reference '{s}'"))?;
        let class = parse_index(class)
            .ok_or_else(|| format!("invalid class index in class reference '{s}'"))?;
        Ok(Self { package, class })
    }
}

fn parse_index(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

/// One decoded line of a data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Free-text comment. The first three are title, date and file name.
    Comment(String),
    /// Declares the next package.
    Package(String),
    /// Declares a class in the most recently declared package.
    Source(String),
    /// A class-to-class dependency edge.
    Dependency {
        /// Importing class.
        source: ClassRef,
        /// Imported class.
        target: ClassRef,
    },
    /// A package-level dependency cycle; the last entry connects to the first.
    Cycle(Vec<u32>),
}

impl Record {
    /// The tag this record is written with.
    #[must_use]
    pub fn tag(&self) -> RecordTag {
        match self {
            Self::Comment(_) => RecordTag::Comment,
            Self::Package(_) => RecordTag::Package,
            Self::Source(_) => RecordTag::Source,
            Self::Dependency { .. } => RecordTag::Dependency,
            Self::Cycle(_) => RecordTag::Cycle,
        }
    }

    /// The payload text as it appears after the tag.
    #[must_use]
    pub fn payload(&self) -> String {
        match self {
            Self::Comment(text) | Self::Package(text) | Self::Source(text) => text.clone(),
            Self::Dependency { source, target } => format!("{source}{DEPENDENCY_ARROW}{target}"),
            Self::Cycle(packages) => encode_cycle(packages),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tag().as_char(), self.payload())
    }
}

/// Encode a cycle as its trailing-delimited payload, e.g. `0}3}1}`.
#[must_use]
pub fn encode_cycle(packages: &[u32]) -> String {
    packages.iter().map(|p| format!("{p}{CYCLE_ARROW}")).collect()
}

/// Decode a single line.
///
/// Returns `Ok(None)` for blank lines. Any other line must start with a
/// known tag and carry a well-formed payload.
///
/// # Errors
///
/// Returns [`Error::Format`] for an unknown tag, an empty name, or a
/// malformed dependency or cycle payload.
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<Record>> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() {
        tracing::trace!(line = line_number, "skipping blank line");
        return Ok(None);
    }

    let mut chars = line.chars();
    let Some(first) = chars.next() else {
        return Ok(None);
    };
    let tag = RecordTag::from_char(first)
        .ok_or_else(|| Error::format(line_number, format!("unknown tag '{first}'")))?;
    let payload = chars.as_str().trim();

    let record = match tag {
        RecordTag::Comment => Record::Comment(payload.to_string()),
        RecordTag::Package => Record::Package(non_empty(line_number, payload, "package")?),
        RecordTag::Source => Record::Source(non_empty(line_number, payload, "class")?),
        RecordTag::Dependency => parse_dependency(line_number, payload)?,
        RecordTag::Cycle => Record::Cycle(parse_cycle(line_number, payload)?),
    };

    tracing::trace!(line = line_number, ?tag, "decoded record");
    Ok(Some(record))
}

fn non_empty(line_number: usize, payload: &str, what: &str) -> Result<String> {
    if payload.is_empty() {
        return Err(Error::format(line_number, format!("empty {what} name")));
    }
    Ok(payload.to_string())
}

fn parse_dependency(line_number: usize, payload: &str) -> Result<Record> {
    let (source, target) = payload.split_once(DEPENDENCY_ARROW).ok_or_else(|| {
        Error::format(
            line_number,
            format!("dependency '{payload}' is missing '{DEPENDENCY_ARROW}'"),
        )
    })?;
    let source = source
        .parse()
        .map_err(|message: String| Error::format(line_number, message))?;
    let target = target
        .parse()
        .map_err(|message: String| Error::format(line_number, message))?;
    Ok(Record::Dependency { source, target })
}

fn parse_cycle(line_number: usize, payload: &str) -> Result<Vec<u32>> {
    let packages = payload
        .split(CYCLE_ARROW)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            parse_index(segment).ok_or_else(|| {
                Error::format(
                    line_number,
                    format!("invalid package index '{segment}' in cycle"),
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if packages.is_empty() {
        return Err(Error::format(line_number, "cycle has no packages"));
    }
    Ok(packages)
}

/// Running tallies of the records consumed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordCounts {
    /// `;` lines
    pub comments: usize,
    /// `P` lines
    pub packages: usize,
    /// `S` lines
    pub sources: usize,
    /// `D` lines
    pub dependencies: usize,
    /// `C` lines
    pub cycles: usize,
}

impl RecordCounts {
    /// Count one more record.
    pub fn record(&mut self, record: &Record) {
        match record {
            Record::Comment(_) => self.comments += 1,
            Record::Package(_) => self.packages += 1,
            Record::Source(_) => self.sources += 1,
            Record::Dependency { .. } => self.dependencies += 1,
            Record::Cycle(_) => self.cycles += 1,
        }
    }

    /// Total number of records counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.comments + self.packages + self.sources + self.dependencies + self.cycles
    }
}

/// Decode a whole in-memory data file.
///
/// # Errors
///
/// Stops at the first malformed line; see [`parse_line`].
pub fn parse_str(text: &str) -> Result<Vec<Record>> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| parse_line(i + 1, line).transpose())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::comment(";Java Package Dependency Data", Record::Comment("Java Package Dependency Data".into()))]
    #[case::empty_comment(";", Record::Comment(String::new()))]
    #[case::package("Pcom.acme.util", Record::Package("com.acme.util".into()))]
    #[case::package_spaced("P  com.acme  ", Record::Package("com.acme".into()))]
    #[case::source("SFoo", Record::Source("Foo".into()))]
    #[case::dependency("D0.1>2.3", Record::Dependency { source: ClassRef::new(0, 1), target: ClassRef::new(2, 3) })]
    #[case::cycle("C0}4}2}", Record::Cycle(vec![0, 4, 2]))]
    #[case::cycle_without_trailing("C 0}1", Record::Cycle(vec![0, 1]))]
    fn parses_tagged_lines(#[case] line: &str, #[case] expected: Record) {
        let record = parse_line(1, line).unwrap().unwrap();
        assert_eq!(record, expected);
    }

    #[rstest]
    #[case::unknown_tag("X something")]
    #[case::leading_space(" Pcom.acme")]
    #[case::empty_package("P")]
    #[case::empty_source("S   ")]
    #[case::missing_arrow("D0.1")]
    #[case::missing_dot("D0>1.0")]
    #[case::non_numeric("D0.a>1.0")]
    #[case::negative_index("D-1.0>1.0")]
    #[case::empty_cycle("C}}")]
    #[case::bad_cycle_member("C0}x}")]
    fn rejects_malformed_lines(#[case] line: &str) {
        let err = parse_line(3, line).unwrap_err();
        assert_eq!(err.line(), Some(3), "{err}");
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert!(parse_line(1, "").unwrap().is_none());
        assert!(parse_line(1, "   \r\n").unwrap().is_none());
    }

    #[test]
    fn display_writes_line_text() {
        let lines = [";title", "Pa.b", "SFoo", "D0.0>1.2", "C0}1}"];
        for line in lines {
            let record = parse_line(1, line).unwrap().unwrap();
            assert_eq!(record.to_string(), line);
        }
    }

    #[test]
    fn counts_track_each_kind() {
        let records = parse_str(";t\n;d\nPa\nSX\nPb\nSY\nD0.0>1.0\nC0}1}\n").unwrap();
        let mut counts = RecordCounts::default();
        for record in &records {
            counts.record(record);
        }
        assert_eq!(
            counts,
            RecordCounts {
                comments: 2,
                packages: 2,
                sources: 2,
                dependencies: 1,
                cycles: 1,
            }
        );
        assert_eq!(counts.total(), records.len());
    }

    #[test]
    fn parse_str_reports_the_failing_line() {
        let err = parse_str("Pa\nSX\n\nQ oops\n").unwrap_err();
        assert_eq!(err.line(), Some(4));
    }
}
