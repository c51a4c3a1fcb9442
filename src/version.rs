//! Maven-style comparable versions
//!
//! Orders version strings the way Maven's `ComparableVersion` does: numeric
//! items compare numerically, qualifiers compare by their well-known rank
//! (`alpha < beta < milestone < rc < snapshot < release < sp`) and unknown
//! qualifiers sort after the known ones. `3.3-M1` therefore sorts before `3.3`.

use crate::error::VersionError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const QUALIFIERS: [&str; 7] = ["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];
const RELEASE_QUALIFIER_INDEX: usize = 5;

/// Gradle dynamic selectors that always resolve to the newest release
const DYNAMIC_SELECTORS: [&str; 3] = ["+", "latest.release", "latest.integration"];

#[derive(Debug, Clone)]
enum Item {
    /// Decimal digits with leading zeros stripped ("0" for zero)
    Int(String),
    Str(String),
    List(Vec<Item>),
}

impl Item {
    fn int(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Item::Int("0".to_string())
        } else {
            Item::Int(trimmed.to_string())
        }
    }

    fn string(value: &str, followed_by_digit: bool) -> Self {
        let value = if followed_by_digit && value.len() == 1 {
            match value {
                "a" => "alpha",
                "b" => "beta",
                "m" => "milestone",
                other => other,
            }
        } else {
            value
        };

        let value = match value {
            "ga" | "final" | "release" => "",
            "cr" => "rc",
            other => other,
        };

        Item::Str(value.to_string())
    }

    fn is_null(&self) -> bool {
        match self {
            Item::Int(digits) => digits == "0",
            Item::Str(value) => value.is_empty(),
            Item::List(items) => items.is_empty(),
        }
    }

    fn compare(&self, other: Option<&Item>) -> Ordering {
        match (self, other) {
            (Item::Int(digits), None) => {
                if digits == "0" {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            (Item::Int(a), Some(Item::Int(b))) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Item::Int(_), Some(_)) => Ordering::Greater,

            (Item::Str(value), None) => {
                qualifier_rank(value).cmp(&RELEASE_QUALIFIER_INDEX.to_string())
            }
            (Item::Str(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::Str(a), Some(Item::Str(b))) => qualifier_rank(a).cmp(&qualifier_rank(b)),
            (Item::Str(_), Some(Item::List(_))) => Ordering::Less,

            (Item::List(items), None) => items
                .iter()
                .map(|item| item.compare(None))
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal),
            (Item::List(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::List(_), Some(Item::Str(_))) => Ordering::Greater,
            (Item::List(a), Some(Item::List(b))) => compare_lists(a, b),
        }
    }
}

fn compare_lists(left: &[Item], right: &[Item]) -> Ordering {
    for i in 0..left.len().max(right.len()) {
        let ord = match (left.get(i), right.get(i)) {
            (Some(l), r) => l.compare(r),
            (None, Some(r)) => r.compare(None).reverse(),
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Rank key compared as a string, known qualifiers first.
fn qualifier_rank(qualifier: &str) -> String {
    match QUALIFIERS.iter().position(|q| *q == qualifier) {
        Some(index) => index.to_string(),
        None => format!("{}-{}", QUALIFIERS.len(), qualifier),
    }
}

/// Drops trailing null items (`0`, `""`, empty lists) up to the first
/// non-null scalar.
fn normalize(items: &mut Vec<Item>) {
    let mut i = items.len();
    while i > 0 {
        i -= 1;
        if items[i].is_null() {
            items.remove(i);
        } else if !matches!(items[i], Item::List(_)) {
            break;
        }
    }
}

fn parse_item(is_digit: bool, token: &str) -> Item {
    if is_digit {
        Item::int(token)
    } else {
        Item::string(token, false)
    }
}

/// A parsed version that orders with Maven semantics
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    items: Vec<Item>,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(VersionError::Empty);
        }
        if let Some(character) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+')))
        {
            return Err(VersionError::InvalidCharacter {
                version: raw.to_string(),
                character,
            });
        }

        let version = raw.to_ascii_lowercase();
        let bytes = version.as_bytes();

        // Each '-' or digit/letter transition opens a nested list that the
        // remaining items are appended to.
        let mut stack: Vec<Vec<Item>> = vec![Vec::new()];
        let mut is_digit = false;
        let mut start = 0;

        for (i, &c) in bytes.iter().enumerate() {
            if c == b'.' {
                let item = if i == start {
                    Item::int("0")
                } else {
                    parse_item(is_digit, &version[start..i])
                };
                push_item(&mut stack, item);
                start = i + 1;
            } else if c == b'-' {
                let item = if i == start {
                    Item::int("0")
                } else {
                    parse_item(is_digit, &version[start..i])
                };
                push_item(&mut stack, item);
                start = i + 1;
                stack.push(Vec::new());
            } else if c.is_ascii_digit() {
                if !is_digit && i > start {
                    // `1.0.X1` is read as `1.0-X1`
                    if stack.last().is_some_and(|list| !list.is_empty()) {
                        stack.push(Vec::new());
                    }
                    push_item(&mut stack, Item::string(&version[start..i], true));
                    start = i;
                    stack.push(Vec::new());
                }
                is_digit = true;
            } else {
                if is_digit && i > start {
                    push_item(&mut stack, Item::int(&version[start..i]));
                    start = i;
                    stack.push(Vec::new());
                }
                is_digit = false;
            }
        }

        if version.len() > start {
            if !is_digit && stack.last().is_some_and(|list| !list.is_empty()) {
                stack.push(Vec::new());
            }
            push_item(&mut stack, parse_item(is_digit, &version[start..]));
        }

        let mut folded: Option<Vec<Item>> = None;
        while let Some(mut list) = stack.pop() {
            if let Some(child) = folded.take() {
                list.push(Item::List(child));
            }
            normalize(&mut list);
            folded = Some(list);
        }

        Ok(Self {
            raw: raw.to_string(),
            items: folded.unwrap_or_default(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn push_item(stack: &mut [Vec<Item>], item: Item) {
    if let Some(list) = stack.last_mut() {
        list.push(item);
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_lists(&self.items, &other.items)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

/// Compares two version strings; `None` when either cannot be parsed.
pub fn compare(a: &str, b: &str) -> Option<Ordering> {
    let a = Version::parse(a).ok()?;
    let b = Version::parse(b).ok()?;
    Some(a.cmp(&b))
}

/// Whether a declared plugin version is at least `minimum`.
///
/// An absent or empty version means the build resolves the newest plugin and
/// is accepted, as are Gradle's dynamic selectors. Versions that do not parse
/// are rejected.
pub fn satisfies_minimum(version: Option<&str>, minimum: &str) -> bool {
    let version = match version.map(str::trim) {
        None | Some("") => return true,
        Some(v) => v,
    };

    if DYNAMIC_SELECTORS.contains(&version) {
        return true;
    }

    match compare(version, minimum) {
        Some(ord) => ord != Ordering::Less,
        None => {
            tracing::debug!(version, minimum, "Version not comparable, rejecting");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        identical_milestone = { "3.3-M1", "3.3-M1", Ordering::Equal },
        older_release = { "3.2", "3.3-M1", Ordering::Less },
        newer_release = { "3.4", "3.3-M1", Ordering::Greater },
        release_after_milestone = { "3.3", "3.3-M1", Ordering::Greater },
        later_milestone = { "3.3-M2", "3.3-M1", Ordering::Greater },
        trailing_zeros = { "1.0.0", "1", Ordering::Equal },
        numeric_not_lexical = { "1.10", "1.9", Ordering::Greater },
        snapshot_before_release = { "1-SNAPSHOT", "1", Ordering::Less },
        rc_before_snapshot = { "1-rc1", "1-SNAPSHOT", Ordering::Less },
        cr_alias = { "1-cr1", "1-RC1", Ordering::Equal },
        alpha_before_beta = { "1.0-alpha1", "1.0-beta1", Ordering::Less },
        short_alias = { "2.0-a1", "2.0-alpha-1", Ordering::Equal },
        final_is_release = { "1.0.0.Final", "1.0.0", Ordering::Equal },
        service_pack_after_release = { "1-sp1", "1", Ordering::Greater },
        unknown_after_known = { "1-foo", "1-sp", Ordering::Greater },
        leading_zeros = { "3.01", "3.1", Ordering::Equal },
        wide_numbers = { "1.20240101000000000000", "1.2", Ordering::Greater },
    )]
    fn test_compare(a: &str, b: &str, expected: Ordering) {
        assert_eq!(compare(a, b), Some(expected));
        assert_eq!(compare(b, a), Some(expected.reverse()));
    }

    #[test]
    fn test_unparseable_versions() {
        assert_eq!(compare("", "3.3-M1"), None);
        assert_eq!(compare("${liberty.version}", "3.3-M1"), None);
        assert_eq!(compare("3.3-M1", "3 .4"), None);
        assert_eq!(Version::parse("   "), Err(VersionError::Empty));
    }

    #[test]
    fn test_satisfies_minimum() {
        assert!(satisfies_minimum(None, "3.3-M1"));
        assert!(satisfies_minimum(Some(""), "3.3-M1"));
        assert!(satisfies_minimum(Some("3.3-M1"), "3.3-M1"));
        assert!(satisfies_minimum(Some("3.4"), "3.3-M1"));
        assert!(!satisfies_minimum(Some("3.2"), "3.3-M1"));
        assert!(!satisfies_minimum(Some("${liberty.version}"), "3.3-M1"));
    }

    #[test]
    fn test_dynamic_selectors_are_accepted() {
        assert!(satisfies_minimum(Some("+"), "3.1-M1"));
        assert!(satisfies_minimum(Some("latest.release"), "3.1-M1"));
    }

    #[test]
    fn test_version_display_keeps_raw_input() {
        let version: Version = " 3.3-M1 ".parse().unwrap();
        assert_eq!(version.to_string(), "3.3-M1");
        assert_eq!(version.as_str(), "3.3-M1");
    }

    #[test]
    fn test_version_sorting() {
        let mut versions: Vec<Version> = ["3.4", "3.3", "3.3-M1", "3.2.1", "3.3-SNAPSHOT"]
            .iter()
            .map(|v| Version::parse(v).unwrap())
            .collect();
        versions.sort();

        let ordered: Vec<&str> = versions.iter().map(Version::as_str).collect();
        assert_eq!(ordered, vec!["3.2.1", "3.3-M1", "3.3-SNAPSHOT", "3.3", "3.4"]);
    }
}
