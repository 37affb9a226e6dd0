//! Edge-list text parsing.
//!
//! Format: one `origin destination` pair per line, whitespace separated.
//! Blank lines and lines starting with `#` are ignored. Any other line that
//! is not exactly two non-negative integers is skipped and counted, never
//! fatal.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::csr::NodeId;
use crate::error::LoadError;

/// Edges read from a source, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    pub edges: Vec<(NodeId, NodeId)>,
    /// Highest node id referenced by any edge. None when no edge was accepted.
    pub max_node: Option<NodeId>,
    /// Data lines seen (comments and blank lines excluded).
    pub lines_read: usize,
    /// Data lines dropped because they did not parse as an edge.
    pub skipped_lines: usize,
}

impl EdgeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from in-memory pairs, tracking `max_node` as the parser does.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut list = Self::new();
        for (from, to) in pairs {
            list.push(from, to);
        }
        list.lines_read = list.edges.len();
        list
    }

    fn push(&mut self, from: NodeId, to: NodeId) {
        let hi = from.max(to);
        self.max_node = Some(self.max_node.map_or(hi, |m| m.max(hi)));
        self.edges.push((from, to));
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Parse a single data line into an edge. Exactly two tokens are required.
fn parse_line(line: &str) -> Option<(NodeId, NodeId)> {
    let mut tokens = line.split_whitespace();
    let from = tokens.next()?.parse::<NodeId>().ok()?;
    let to = tokens.next()?.parse::<NodeId>().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((from, to))
}

/// Parse an edge list from any buffered reader.
///
/// Lines are read as raw bytes. A comment is any line whose first byte is
/// `#`, whatever its encoding. A data line that is not valid UTF-8 is
/// skipped like any other malformed line.
pub fn parse_edge_list<R: BufRead>(reader: R) -> io::Result<EdgeList> {
    let mut list = EdgeList::new();

    for line in reader.split(b'\n') {
        let line = line?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line[..]);

        if line.first() == Some(&b'#') || line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        list.lines_read += 1;
        match std::str::from_utf8(line).ok().and_then(parse_line) {
            Some((from, to)) => list.push(from, to),
            None => list.skipped_lines += 1,
        }
    }

    Ok(list)
}

/// Open `path` and parse it. Open and read failures are both `Unreadable`.
pub fn read_edge_list(path: &Path) -> Result<EdgeList, LoadError> {
    let unreadable = |source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(unreadable)?;
    parse_edge_list(BufReader::new(file)).map_err(unreadable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> EdgeList {
        parse_edge_list(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_basic() {
        let list = parse("0 1\n0 2\n1 2\n2 0\n");
        assert_eq!(list.edges, vec![(0, 1), (0, 2), (1, 2), (2, 0)]);
        assert_eq!(list.max_node, Some(2));
        assert_eq!(list.lines_read, 4);
        assert_eq!(list.skipped_lines, 0);
    }

    #[test]
    fn test_parse_comments_and_blanks() {
        let list = parse("# FromNodeId\tToNodeId\n\n   \n3\t7\n# trailing\n");
        assert_eq!(list.edges, vec![(3, 7)]);
        assert_eq!(list.max_node, Some(7));
        assert_eq!(list.lines_read, 1);
        assert_eq!(list.skipped_lines, 0);
    }

    #[test]
    fn test_parse_skips_malformed() {
        let list = parse("0 1\nfoo bar\n5\n-1 2\n1 2 3\n2 x\n4 4\n");
        assert_eq!(list.edges, vec![(0, 1), (4, 4)]);
        assert_eq!(list.skipped_lines, 5);
        assert_eq!(list.lines_read, 7);
        assert_eq!(list.max_node, Some(4));
    }

    #[test]
    fn test_parse_crlf() {
        let list = parse("0 1\r\n1 0\r\n");
        assert_eq!(list.edges, vec![(0, 1), (1, 0)]);
        assert_eq!(list.skipped_lines, 0);
    }

    #[test]
    fn test_parse_indented_hash_is_malformed() {
        // Only a '#' in the first column marks a comment.
        let list = parse("  # not a comment\n0 1\n");
        assert_eq!(list.edges, vec![(0, 1)]);
        assert_eq!(list.skipped_lines, 1);
    }

    #[test]
    fn test_parse_non_utf8_comment() {
        let list = parse_edge_list(&b"# Nodo caf\xe9\n0 1\n1 2\n"[..]).unwrap();
        assert_eq!(list.edges, vec![(0, 1), (1, 2)]);
        assert_eq!(list.skipped_lines, 0);
        assert_eq!(list.lines_read, 2);
    }

    #[test]
    fn test_parse_non_utf8_data_line_skipped() {
        let list = parse_edge_list(&b"0 1\n\xff\xfe 2\n1 2\r\n"[..]).unwrap();
        assert_eq!(list.edges, vec![(0, 1), (1, 2)]);
        assert_eq!(list.skipped_lines, 1);
        assert_eq!(list.lines_read, 3);
    }

    #[test]
    fn test_parse_empty_source() {
        let list = parse("# only comments\n\n");
        assert!(list.is_empty());
        assert_eq!(list.max_node, None);
    }

    #[test]
    fn test_parse_preserves_duplicates_and_order() {
        let list = parse("2 1\n0 1\n2 1\n");
        assert_eq!(list.edges, vec![(2, 1), (0, 1), (2, 1)]);
    }

    #[test]
    fn test_from_pairs_tracks_max() {
        let list = EdgeList::from_pairs(vec![(1, 9), (4, 2)]);
        assert_eq!(list.max_node, Some(9));
        assert_eq!(list.len(), 2);
        assert_eq!(EdgeList::from_pairs(Vec::new()).max_node, None);
    }

    #[test]
    fn test_read_edge_list_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# header").unwrap();
        writeln!(file, "0 1").unwrap();
        writeln!(file, "1 2").unwrap();
        let list = read_edge_list(file.path()).unwrap();
        assert_eq!(list.edges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_read_edge_list_latin1_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"# r\xe9seau\n0 1\n\xe9 1\n1 2\n").unwrap();
        let list = read_edge_list(file.path()).unwrap();
        assert_eq!(list.edges, vec![(0, 1), (1, 2)]);
        assert_eq!(list.skipped_lines, 1);
    }

    #[test]
    fn test_read_edge_list_missing_file() {
        let err = read_edge_list(Path::new("/nonexistent/neuronet/edges.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }));
        assert!(err.to_string().contains("edges.txt"));
    }
}
