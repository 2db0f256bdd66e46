use std::str::Lines;

/// Iterator over the affiliation groups of one affiliation block.
///
/// Groups are newline-delimited. Each group is trimmed of surrounding
/// whitespace (exports indent continuation lines) and blank lines are
/// skipped. A clone replays the groups remaining at the point it was taken.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    lines: Lines<'a>,
}

pub fn segment(block: &str) -> Segments<'_> {
    Segments {
        lines: block.lines(),
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let group = line.trim();
            if !group.is_empty() {
                return Some(group);
            }
        }
        None
    }
}
