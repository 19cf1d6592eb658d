//! Struct used to efficiently slice source code at (row, column) Locations
//! and to map byte offsets back onto them.

use once_cell::unsync::OnceCell;
use rustpython_ast::Location;

use crate::ast::types::Range;

pub struct Locator<'a> {
    contents: &'a str,
    offsets: OnceCell<Vec<Vec<usize>>>,
}

/// For each row, the byte offset of every character on that row (including
/// the trailing newline, if any).
fn compute_offsets(contents: &str) -> Vec<Vec<usize>> {
    let mut offsets = Vec::with_capacity(contents.matches('\n').count() + 1);
    let mut current_row = Vec::new();
    let mut current_byte_offset = 0;
    for char in contents.chars() {
        current_row.push(current_byte_offset);
        if char == '\n' {
            offsets.push(current_row);
            current_row = Vec::new();
        }
        current_byte_offset += char.len_utf8();
    }
    offsets.push(current_row);
    offsets
}

fn truncate(location: Location, offsets: &[Vec<usize>], contents: &str) -> usize {
    if (location.row() - 1 == offsets.len() && location.column() == 0)
        || (location.row() - 1 == offsets.len() - 1
            && location.column() == offsets[location.row() - 1].len())
    {
        contents.len()
    } else {
        offsets[location.row() - 1][location.column()]
    }
}

impl<'a> Locator<'a> {
    pub fn new(contents: &'a str) -> Self {
        Locator {
            contents,
            offsets: OnceCell::new(),
        }
    }

    fn get_or_init_offsets(&self) -> &Vec<Vec<usize>> {
        self.offsets.get_or_init(|| compute_offsets(self.contents))
    }

    pub fn contents(&self) -> &'a str {
        self.contents
    }

    /// Return the byte offset of a (row, column) `Location`.
    pub fn offset(&self, location: Location) -> usize {
        let offsets = self.get_or_init_offsets();
        truncate(location, offsets, self.contents)
    }

    /// Return the `Location` of the character containing a byte offset.
    /// Offsets at or past the end of the document map to the end location.
    pub fn locate(&self, offset: usize) -> Location {
        let offsets = self.get_or_init_offsets();
        if offset >= self.contents.len() {
            let last_row = offsets.len() - 1;
            return Location::new(last_row + 1, offsets[last_row].len());
        }
        for (row, line) in offsets.iter().enumerate().rev() {
            if let Some(&first) = line.first() {
                if first <= offset {
                    // Clamp to the character containing the offset.
                    let column = line.partition_point(|&o| o <= offset) - 1;
                    return Location::new(row + 1, column);
                }
            }
        }
        Location::new(1, 0)
    }

    pub fn slice_source_code_until(&self, location: Location) -> &'a str {
        &self.contents[..self.offset(location)]
    }

    pub fn slice_source_code_at(&self, location: Location) -> &'a str {
        &self.contents[self.offset(location)..]
    }

    pub fn slice_source_code_range(&self, range: &Range) -> &'a str {
        let start = self.offset(range.location);
        let end = self.offset(range.end_location);
        &self.contents[start..end]
    }
}

#[cfg(test)]
mod tests {
    use rustpython_ast::Location;

    use crate::source_code::Locator;

    #[test]
    fn init() {
        let content = "x = 1";
        let locator = Locator::new(content);
        let offsets = locator.get_or_init_offsets();
        assert_eq!(offsets.len(), 1);
        assert_eq!(offsets[0], [0, 1, 2, 3, 4]);

        let content = "x = 1\ny = 2\nz = x + y\n";
        let locator = Locator::new(content);
        let offsets = locator.get_or_init_offsets();
        assert_eq!(offsets.len(), 4);
        assert_eq!(offsets[0], [0, 1, 2, 3, 4, 5]);
        assert_eq!(offsets[1], [6, 7, 8, 9, 10, 11]);
        assert_eq!(offsets[2], [12, 13, 14, 15, 16, 17, 18, 19, 20, 21]);
        assert_eq!(offsets[3], Vec::<usize>::new());

        let content = "# \u{4e9c}\nclass Foo:\n    \"\"\".\"\"\"";
        let locator = Locator::new(content);
        let offsets = locator.get_or_init_offsets();
        assert_eq!(offsets.len(), 3);
        assert_eq!(offsets[0], [0, 1, 2, 5]);
        assert_eq!(offsets[1], [6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
        assert_eq!(offsets[2], [17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27]);
    }

    #[test]
    fn locate() {
        let content = "x = 1\ny = 2\n";
        let locator = Locator::new(content);
        assert_eq!(locator.locate(0), Location::new(1, 0));
        assert_eq!(locator.locate(4), Location::new(1, 4));
        assert_eq!(locator.locate(5), Location::new(1, 5));
        assert_eq!(locator.locate(6), Location::new(2, 0));
        assert_eq!(locator.locate(10), Location::new(2, 4));
        // Past the end.
        assert_eq!(locator.locate(12), Location::new(3, 0));
        assert_eq!(locator.locate(100), Location::new(3, 0));
    }

    #[test]
    fn locate_multibyte() {
        let content = "x = '\u{4e9c}'\n";
        let locator = Locator::new(content);
        // Offsets inside the three-byte character clamp to it.
        assert_eq!(locator.locate(5), Location::new(1, 5));
        assert_eq!(locator.locate(6), Location::new(1, 5));
        assert_eq!(locator.locate(7), Location::new(1, 5));
        assert_eq!(locator.locate(8), Location::new(1, 6));
    }

    #[test]
    fn offset_round_trip() {
        let content = "a = dict(x=1)\nb = 2\n";
        let locator = Locator::new(content);
        for offset in [0, 4, 9, 13, 14, 19] {
            assert_eq!(locator.offset(locator.locate(offset)), offset);
        }
    }
}
